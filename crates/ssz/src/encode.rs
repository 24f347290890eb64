// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! The Serializer: the core `serialize(value, type) -> bytes` algorithm.
//!
//! Dispatch is a closed case analysis over [`Type`] — no open polymorphism,
//! so the compiler checks every variant is handled. Aggregates with
//! variable-size children are laid out as a fixed region (an offset table)
//! followed by a variable region (the children's bodies), exactly as
//! described by the Serializer component design.

use ssz_schema::{Field, Type, UintType};
use ssz_primitives::U256;

use crate::error::InvalidValue;
use crate::size::{fixed_size, size_unchecked, BYTES_PER_LENGTH_PREFIX};
use crate::validate::validate;
use crate::value::{UintValue, Value};

/// Serializes `value` as `type`, validating first.
///
/// `type` is assumed already normalized (built via
/// [`ssz_schema::parse_type`] or the `Type` constructors directly) — schema
/// construction is where `BadType` belongs, per the codec's lifecycle
/// (descriptors are built once, values are serialized many times), so this
/// entry point only ever fails with [`InvalidValue`].
pub fn serialize(value: &Value, ty: &Type) -> Result<Vec<u8>, InvalidValue> {
    validate(value, ty, "$")?;

    // `value` just passed validation, so the fallible `size` wrapper would
    // only validate it again; go straight to the underlying computation.
    let total = size_unchecked(value, ty);
    let mut out = vec![0u8; total];
    let end = write(value, ty, &mut out, 0);

    debug_assert_eq!(
        end, total,
        "serializer wrote {end} bytes into a buffer sized for {total}; this is a BufferOverrun \
         bug in the Size Oracle/Serializer pairing, not a caller error"
    );

    Ok(out)
}

fn write(value: &Value, ty: &Type, out: &mut [u8], start: usize) -> usize {
    match (ty, value) {
        (Type::Bool, Value::Bool(b)) => {
            out[start] = u8::from(*b);
            start + 1
        }
        (Type::Uint(u), Value::Uint(v)) => write_uint(u, v, out, start),
        (Type::ByteVector { length }, Value::ByteVector(bytes)) => {
            out[start..start + length].copy_from_slice(bytes);
            start + length
        }
        (Type::ByteList { .. }, Value::ByteList(bytes)) => {
            let end = start + bytes.0.len();
            out[start..end].copy_from_slice(&bytes.0);
            end
        }
        (Type::Vector { element, .. }, Value::Vector(items))
        | (Type::List { element, .. }, Value::List(items)) => {
            write_array(items, element, out, start)
        }
        (Type::Container(fields), Value::Container(_)) => write_container(fields, value, out, start),
        _ => unreachable!("write: value/type mismatch should have been rejected by validate()"),
    }
}

fn write_uint(u: &UintType, v: &UintValue, out: &mut [u8], start: usize) -> usize {
    let end = start + u.byte_length;

    if matches!(v, UintValue::Infinity) {
        out[start..end].fill(0xFF);
        return end;
    }

    let biased = v.magnitude() + U256::from(u.offset);
    let le = biased.to_le_bytes::<32>();
    out[start..end].copy_from_slice(&le[..u.byte_length]);
    end
}

/// Writes a `Vector`/`List` body: elements contiguously if `element` is
/// fixed-size, or an offset table followed by bodies if it's variable-size.
fn write_array(items: &[Value], element: &Type, out: &mut [u8], start: usize) -> usize {
    if !element.is_variable_size() {
        let mut cur = start;
        for item in items {
            cur = write(item, element, out, cur);
        }
        return cur;
    }

    let table_len = items.len() * BYTES_PER_LENGTH_PREFIX;
    let mut cur = start + table_len;

    for (i, item) in items.iter().enumerate() {
        let elem_start = cur;
        cur = write(item, element, out, cur);
        write_offset(out, start + i * BYTES_PER_LENGTH_PREFIX, elem_start - start);
    }

    cur
}

/// Writes a `Container` body: fixed fields inline, variable fields as an
/// offset slot in the fixed region plus a body in the variable region.
fn write_container(fields: &[Field], value: &Value, out: &mut [u8], start: usize) -> usize {
    let fixed_len: usize = fields
        .iter()
        .map(|f| if f.ty.is_variable_size() { BYTES_PER_LENGTH_PREFIX } else { fixed_size(&f.ty) })
        .sum();

    let mut fixed_idx = start;
    let mut cur = start + fixed_len;

    for field in fields {
        let field_value = value
            .field(&field.name.0)
            .expect("write_container: validated container is missing a declared field");

        if field.ty.is_variable_size() {
            let elem_start = cur;
            cur = write(field_value, &field.ty, out, cur);
            write_offset(out, fixed_idx, elem_start - start);
            fixed_idx += BYTES_PER_LENGTH_PREFIX;
        } else {
            fixed_idx = write(field_value, &field.ty, out, fixed_idx);
        }
    }

    cur
}

fn write_offset(out: &mut [u8], at: usize, offset: usize) {
    let offset = u32::try_from(offset).expect("offset exceeds u32::MAX");
    out[at..at + BYTES_PER_LENGTH_PREFIX].copy_from_slice(&offset.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use ssz_primitives::Bytes;
    use ssz_schema::{Field, FieldName, Type, UintType};

    use super::*;

    fn uint(byte_length: usize, v: u64) -> (Type, Value) {
        (Type::Uint(UintType::plain(byte_length)), Value::Uint(UintValue::Int(v)))
    }

    #[test]
    fn bool_scenarios() {
        assert_eq!(serialize(&Value::Bool(true), &Type::Bool).unwrap(), vec![0x01]);
        assert_eq!(serialize(&Value::Bool(false), &Type::Bool).unwrap(), vec![0x00]);
    }

    #[test]
    fn uint32_scenarios() {
        let (ty, v) = uint(4, 0);
        assert_eq!(serialize(&v, &ty).unwrap(), hex::decode("00000000").unwrap());

        let (ty, v) = uint(4, 1);
        assert_eq!(serialize(&v, &ty).unwrap(), hex::decode("01000000").unwrap());

        let (ty, v) = uint(4, 0xDEADBEEF);
        assert_eq!(serialize(&v, &ty).unwrap(), hex::decode("efbeadde").unwrap());
    }

    #[test]
    fn byte_vector_scenario_and_length_mismatch() {
        let ty = Type::ByteVector { length: 2 };
        let v = Value::ByteVector(hex::decode("abcd").unwrap());
        assert_eq!(serialize(&v, &ty).unwrap(), hex::decode("abcd").unwrap());

        let bad = Value::ByteVector(hex::decode("ab").unwrap());
        assert!(serialize(&bad, &ty).is_err());
    }

    #[test]
    fn fixed_vector_of_uint32() {
        let ty = Type::Vector { element: Box::new(Type::Uint(UintType::plain(4))), length: 6 };
        let v = Value::Vector(
            (0..6u64).map(|i| Value::Uint(UintValue::Int(i))).collect(),
        );
        let bytes = serialize(&v, &ty).unwrap();
        assert_eq!(bytes.len(), 24);
        assert_eq!(
            bytes,
            hex::decode("000000000100000002000000030000000400000005000000").unwrap()
        );
    }

    #[test]
    fn empty_list_is_zero_bytes() {
        let ty = Type::List { element: Box::new(Type::Uint(UintType::plain(4))), max_length: 10 };
        assert_eq!(serialize(&Value::List(vec![]), &ty).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn nested_variable_lists() {
        let inner_ty =
            Type::List { element: Box::new(Type::Uint(UintType::plain(4))), max_length: 10 };
        let outer_ty = Type::List { element: Box::new(inner_ty), max_length: 10 };

        let inner0 = Value::List(vec![Value::Uint(UintValue::Int(1))]);
        let inner1 =
            Value::List(vec![Value::Uint(UintValue::Int(2)), Value::Uint(UintValue::Int(3))]);
        let outer = Value::List(vec![inner0, inner1]);

        let bytes = serialize(&outer, &outer_ty).unwrap();
        assert_eq!(
            bytes,
            hex::decode("08000000 0c000000 01000000 02000000 03000000".replace(' ', "")).unwrap()
        );
    }

    #[test]
    fn all_fixed_container() {
        let ty = Type::container(vec![
            Field { name: FieldName::try_from("a").unwrap(), ty: Type::Uint(UintType::plain(2)) },
            Field { name: FieldName::try_from("b").unwrap(), ty: Type::Bool },
            Field { name: FieldName::try_from("c").unwrap(), ty: Type::ByteVector { length: 3 } },
        ]);

        let v = Value::Container(vec![
            ("a".to_owned(), Value::Uint(UintValue::Int(0x0102))),
            ("b".to_owned(), Value::Bool(true)),
            ("c".to_owned(), Value::ByteVector(hex::decode("aabbcc").unwrap())),
        ]);

        assert_eq!(serialize(&v, &ty).unwrap(), hex::decode("020101aabbcc").unwrap());
    }

    #[test]
    fn container_with_one_variable_field() {
        let ty = Type::container(vec![
            Field { name: FieldName::try_from("x").unwrap(), ty: Type::Uint(UintType::plain(2)) },
            Field {
                name: FieldName::try_from("y").unwrap(),
                ty: Type::List { element: Box::new(Type::Uint(UintType::plain(4))), max_length: 10 },
            },
        ]);

        let v = Value::Container(vec![
            ("x".to_owned(), Value::Uint(UintValue::Int(0x0102))),
            (
                "y".to_owned(),
                Value::List(vec![Value::Uint(UintValue::Int(9)), Value::Uint(UintValue::Int(10))]),
            ),
        ]);

        assert_eq!(
            serialize(&v, &ty).unwrap(),
            hex::decode("0201 06000000 09000000 0a000000".replace(' ', "")).unwrap()
        );
    }

    #[test]
    fn container_field_order_independence_of_input() {
        let ty = Type::container(vec![
            Field { name: FieldName::try_from("a").unwrap(), ty: Type::Bool },
            Field { name: FieldName::try_from("b").unwrap(), ty: Type::Uint(UintType::plain(1)) },
        ]);

        let in_order = Value::Container(vec![
            ("a".to_owned(), Value::Bool(true)),
            ("b".to_owned(), Value::Uint(UintValue::Int(7))),
        ]);
        let reordered = Value::Container(vec![
            ("b".to_owned(), Value::Uint(UintValue::Int(7))),
            ("a".to_owned(), Value::Bool(true)),
        ]);

        assert_eq!(
            serialize(&in_order, &ty).unwrap(),
            serialize(&reordered, &ty).unwrap()
        );
    }

    #[test]
    fn wide_uint_infinity_sentinel() {
        let ty = Type::Uint(UintType { byte_length: 32, use_number: true, offset: 0 });
        let bytes = serialize(&Value::Uint(UintValue::Infinity), &ty).unwrap();
        assert_eq!(bytes, vec![0xFFu8; 32]);
    }

    #[test]
    fn uint_offset_bias_is_applied() {
        let ty = Type::Uint(UintType { byte_length: 2, use_number: false, offset: 10 });
        let bytes = serialize(&Value::Uint(UintValue::Int(5)), &ty).unwrap();
        assert_eq!(bytes, 15u16.to_le_bytes().to_vec());
    }

    #[test]
    fn byte_list_uses_caller_bytes() {
        let ty = Type::ByteList { max_length: 8 };
        let v = Value::ByteList(Bytes(vec![1, 2, 3]));
        assert_eq!(serialize(&v, &ty).unwrap(), vec![1, 2, 3]);
    }
}
