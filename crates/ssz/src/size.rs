//! The Size Oracle: `fixed_size(T)` and `size(v, T)`.
//!
//! Both are pure functions over descriptors and never write any bytes.
//! Per spec.md §6.2, `size` is a fallible public entry point
//! (`size(value, type) -> nat | InvalidValue`): it validates `value`
//! against `type` before measuring it, the same way [`crate::encode::serialize`]
//! does before writing it. [`size_unchecked`] is the total, infallible
//! computation underneath, used internally once a value is already known
//! to be valid (`serialize` validates once up front and reuses that
//! guarantee rather than validating twice).

use ssz_schema::Type;

use crate::error::InvalidValue;
use crate::validate::validate;
use crate::value::Value;

/// The width, in bytes, of every offset slot in an aggregate's offset table.
pub const BYTES_PER_LENGTH_PREFIX: usize = 4;

/// `fixed_size(T)`: defined only when `T` is not variable-size.
///
/// # Panics
///
/// Panics if `ty` is variable-size; callers should check
/// [`ssz_schema::Type::is_variable_size`] first, or call [`size`] instead,
/// which handles both fixed- and variable-size types (at the cost of also
/// taking a value to measure and validate).
pub fn fixed_size(ty: &Type) -> usize {
    match ty {
        Type::Bool => 1,
        Type::Uint(u) => u.byte_length,
        Type::ByteVector { length } => *length,
        Type::Vector { element, length } => {
            assert!(!element.is_variable_size(), "fixed_size: vector of variable-size element");
            length * fixed_size(element)
        }
        Type::Container(fields) => fields.iter().map(|f| fixed_size(&f.ty)).sum(),
        Type::ByteList { .. } | Type::List { .. } => {
            panic!("fixed_size: called on variable-size type")
        }
    }
}

/// `size(v, T)`: total serialized length of `v` encoded as `T`.
///
/// Validates `v` against `T` first (spec.md §6.2's `size` is fallible for
/// this reason) and only measures once that succeeds.
pub fn size(value: &Value, ty: &Type) -> Result<usize, InvalidValue> {
    validate(value, ty, "$")?;
    Ok(size_unchecked(value, ty))
}

/// The Size Oracle's underlying computation, without the validation pass.
///
/// Callers that have already validated `value` against `ty` (the
/// serializer, which validates once up front and would otherwise pay for
/// the same recursive walk twice) can call this directly; every other
/// caller should go through [`size`].
pub(crate) fn size_unchecked(value: &Value, ty: &Type) -> usize {
    if !ty.is_variable_size() {
        return fixed_size(ty);
    }

    match (value, ty) {
        (Value::ByteList(bytes), Type::ByteList { .. }) => bytes.0.len(),
        (Value::List(items), Type::List { element, .. }) => {
            if element.is_variable_size() {
                items.len() * BYTES_PER_LENGTH_PREFIX
                    + items.iter().map(|v| size_unchecked(v, element)).sum::<usize>()
            } else {
                items.len() * fixed_size(element)
            }
        }
        (Value::Vector(items), Type::Vector { element, .. }) => {
            // Only reached when `element` is variable-size (the all-fixed
            // case returned above via `fixed_size`).
            items.len() * BYTES_PER_LENGTH_PREFIX
                + items.iter().map(|v| size_unchecked(v, element)).sum::<usize>()
        }
        (Value::Container(_), Type::Container(fields)) => fields
            .iter()
            .map(|f| {
                let Some(v) = value.field(&f.name.0) else {
                    // An invalid container (missing field) has no meaningful
                    // size; this function is only called on already-valid
                    // values (see the doc comment above), so this arm is
                    // unreachable in practice.
                    return 0;
                };
                if f.ty.is_variable_size() {
                    BYTES_PER_LENGTH_PREFIX + size_unchecked(v, &f.ty)
                } else {
                    fixed_size(&f.ty)
                }
            })
            .sum(),
        _ => unreachable!("size_unchecked: value/type mismatch should have been rejected by validate()"),
    }
}
