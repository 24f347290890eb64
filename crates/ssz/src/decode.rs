// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! The decoder: fully determined by the Serializer's layout (spec §4.5).
//!
//! Element counts for variable-size arrays are recovered from
//! `first_offset / BYTES_PER_LENGTH_PREFIX`; container field counts come
//! from the schema. Offsets are validated for monotonicity and bounds via
//! [`crate::layout`] before anything is decoded out of them.

use ssz_primitives::{Bytes, U256};
use ssz_schema::{Field, Type};

use crate::error::DecodeError;
use crate::layout::{read_offset_at, read_offset_or_end, validate_offset_table};
use crate::size::{fixed_size, BYTES_PER_LENGTH_PREFIX};
use crate::value::{UintValue, Value};

/// Decodes `bytes` as a `T`-typed value, honoring the same layout contract
/// [`crate::encode::serialize`] writes.
pub fn deserialize(bytes: &[u8], ty: &Type) -> Result<Value, DecodeError> {
    if !ty.is_variable_size() {
        let expected = fixed_size(ty);
        if bytes.len() != expected {
            return Err(DecodeError::InvalidByteLength { len: bytes.len(), expected });
        }
    }

    decode(bytes, ty)
}

fn decode(bytes: &[u8], ty: &Type) -> Result<Value, DecodeError> {
    match ty {
        Type::Bool => match bytes.first().copied() {
            Some(0) => Ok(Value::Bool(false)),
            Some(1) => Ok(Value::Bool(true)),
            Some(b) => Err(DecodeError::BytesInvalid(b)),
            None => Err(DecodeError::InvalidByteLength { len: 0, expected: 1 }),
        },
        Type::Uint(u) => decode_uint(u, bytes),
        Type::ByteVector { length } => {
            if bytes.len() != *length {
                return Err(DecodeError::InvalidByteLength { len: bytes.len(), expected: *length });
            }
            Ok(Value::ByteVector(bytes.to_vec()))
        }
        Type::ByteList { max_length } => {
            if bytes.len() > *max_length {
                return Err(DecodeError::InvalidByteLength { len: bytes.len(), expected: *max_length });
            }
            Ok(Value::ByteList(Bytes(bytes.to_vec())))
        }
        Type::Vector { element, length } => {
            let items = decode_array(bytes, element, Some(*length))?;
            Ok(Value::Vector(items))
        }
        Type::List { element, max_length } => {
            let items = decode_array(bytes, element, None)?;
            if items.len() > *max_length {
                return Err(DecodeError::InvalidByteLength { len: items.len(), expected: *max_length });
            }
            Ok(Value::List(items))
        }
        Type::Container(fields) => decode_container(bytes, fields),
    }
}

fn decode_uint(u: &ssz_schema::UintType, bytes: &[u8]) -> Result<Value, DecodeError> {
    if bytes.len() != u.byte_length {
        return Err(DecodeError::InvalidByteLength { len: bytes.len(), expected: u.byte_length });
    }

    if u.allows_infinity_sentinel() && bytes.iter().all(|&b| b == 0xFF) {
        return Ok(Value::Uint(UintValue::Infinity));
    }

    let mut buf = [0u8; 32];
    buf[..bytes.len()].copy_from_slice(bytes);
    let raw = U256::from_le_bytes(buf);

    let value = raw
        .checked_sub(U256::from(u.offset))
        .ok_or(DecodeError::UintUnderflowsOffset(u.offset))?;

    if u.byte_length <= 8 {
        Ok(Value::Uint(UintValue::Int(value.as_limbs()[0])))
    } else {
        Ok(Value::Uint(UintValue::Big(value)))
    }
}

/// Decodes a `Vector`/`List` body. `expected_len` fixes the element count
/// for a `Vector`; `None` lets a `List`'s count be recovered from the data.
fn decode_array(
    bytes: &[u8],
    element: &Type,
    expected_len: Option<usize>,
) -> Result<Vec<Value>, DecodeError> {
    if !element.is_variable_size() {
        return decode_fixed_element_array(bytes, element, expected_len);
    }

    if bytes.is_empty() {
        if let Some(expected) = expected_len {
            if expected != 0 {
                return Err(DecodeError::InvalidByteLength { len: 0, expected });
            }
        }
        return Ok(Vec::new());
    }

    if bytes.len() < BYTES_PER_LENGTH_PREFIX {
        return Err(DecodeError::InvalidByteLength {
            len: bytes.len(),
            expected: BYTES_PER_LENGTH_PREFIX,
        });
    }

    let mut first = [0u8; BYTES_PER_LENGTH_PREFIX];
    first.copy_from_slice(&bytes[..BYTES_PER_LENGTH_PREFIX]);
    let first_offset = u32::from_le_bytes(first) as usize;

    if first_offset % BYTES_PER_LENGTH_PREFIX != 0 || first_offset == 0 {
        return Err(DecodeError::OffsetIntoFixedPortion(first_offset));
    }

    let num_offsets = first_offset / BYTES_PER_LENGTH_PREFIX;

    if let Some(expected) = expected_len {
        if num_offsets != expected {
            return Err(DecodeError::InvalidByteLength { len: num_offsets, expected });
        }
    }

    validate_offset_table(bytes, first_offset, num_offsets)?;

    let mut out = Vec::with_capacity(num_offsets);
    for i in 0..num_offsets {
        let start = read_offset_or_end(bytes, first_offset, num_offsets, i)?;
        let end = read_offset_or_end(bytes, first_offset, num_offsets, i + 1)?;
        if end < start {
            return Err(DecodeError::OffsetsAreDecreasing(end));
        }
        out.push(decode(&bytes[start..end], element)?);
    }

    Ok(out)
}

fn decode_fixed_element_array(
    bytes: &[u8],
    element: &Type,
    expected_len: Option<usize>,
) -> Result<Vec<Value>, DecodeError> {
    let elem_size = fixed_size(element);

    if elem_size == 0 {
        return match expected_len {
            Some(n) => (0..n).map(|_| decode(&[], element)).collect(),
            None => Err(DecodeError::ZeroLengthItem),
        };
    }

    if bytes.len() % elem_size != 0 {
        return Err(DecodeError::InvalidByteLength {
            len: bytes.len(),
            expected: elem_size * (bytes.len() / elem_size.max(1) + 1),
        });
    }

    let count = bytes.len() / elem_size;
    if let Some(expected) = expected_len {
        if count != expected {
            return Err(DecodeError::InvalidByteLength { len: bytes.len(), expected: expected * elem_size });
        }
    }

    bytes.chunks_exact(elem_size).map(|chunk| decode(chunk, element)).collect()
}

fn decode_container(bytes: &[u8], fields: &[Field]) -> Result<Value, DecodeError> {
    let fixed_len: usize = fields
        .iter()
        .map(|f| if f.ty.is_variable_size() { BYTES_PER_LENGTH_PREFIX } else { fixed_size(&f.ty) })
        .sum();

    if bytes.len() < fixed_len {
        return Err(DecodeError::InvalidByteLength { len: bytes.len(), expected: fixed_len });
    }

    // A container's offset slots are interleaved with fixed fields in
    // declared order (spec.md §4.4; mirrored by `write_container`), not
    // packed contiguously at the end of the fixed region the way a
    // `Vector`/`List` of variable-size elements is. So each slot is read
    // at the fixed-region position `write_container` actually put it at,
    // not via the array-style contiguous-table helpers.
    let mut fixed_idx = 0;
    let mut offsets = Vec::new();

    for field in fields {
        if field.ty.is_variable_size() {
            let offset = read_offset_at(bytes, fixed_idx)?;

            match offsets.last() {
                None if offset != fixed_len => {
                    return Err(DecodeError::OffsetIntoFixedPortion(offset));
                }
                Some(&prev) if offset < prev => {
                    return Err(DecodeError::OffsetsAreDecreasing(offset));
                }
                _ => {}
            }
            if offset > bytes.len() {
                return Err(DecodeError::OffsetOutOfBounds(offset));
            }

            offsets.push(offset);
            fixed_idx += BYTES_PER_LENGTH_PREFIX;
        } else {
            fixed_idx += fixed_size(&field.ty);
        }
    }

    if offsets.is_empty() && bytes.len() != fixed_len {
        return Err(DecodeError::InvalidByteLength { len: bytes.len(), expected: fixed_len });
    }

    let mut out = Vec::with_capacity(fields.len());
    let mut fixed_idx = 0;
    let mut var_i = 0;

    for field in fields {
        if field.ty.is_variable_size() {
            let start = offsets[var_i];
            let end = offsets.get(var_i + 1).copied().unwrap_or(bytes.len());
            let value = decode(&bytes[start..end], &field.ty)?;
            out.push((field.name.0.clone(), value));
            fixed_idx += BYTES_PER_LENGTH_PREFIX;
            var_i += 1;
        } else {
            let sz = fixed_size(&field.ty);
            let value = decode(&bytes[fixed_idx..fixed_idx + sz], &field.ty)?;
            out.push((field.name.0.clone(), value));
            fixed_idx += sz;
        }
    }

    Ok(Value::Container(out))
}
