//! The Value Validator: confirms a value conforms to its descriptor before
//! the Serializer ever touches it.
//!
//! Validation and serialization are kept as two separate passes (design
//! note in §9): this makes the serializer's internal buffer-overrun check a
//! pure assertion that should never fire, and keeps fuzzing simple (a
//! fuzzer can target the validator and the serializer independently).

use ssz_schema::Type;

use crate::error::{InvalidValue, InvalidValueReason as Reason};
use crate::value::{UintValue, Value};

/// Checks that `value` conforms to `ty`, recursing into aggregates.
///
/// `path` is the dotted field/index trail used to build `InvalidValue::path`
/// on failure; callers validating a top-level value should pass `"$"` or
/// any other root marker they'd like reported.
pub fn validate(value: &Value, ty: &Type, path: &str) -> Result<(), InvalidValue> {
    match (ty, value) {
        (Type::Bool, Value::Bool(_)) => Ok(()),
        (Type::Uint(u), Value::Uint(v)) => validate_uint(u, v, path),
        (Type::ByteVector { length }, Value::ByteVector(bytes)) => {
            if bytes.len() != *length {
                return Err(InvalidValue::new(
                    path,
                    Reason::WrongByteVectorLength { expected: *length, actual: bytes.len() },
                ));
            }
            Ok(())
        }
        (Type::ByteList { max_length }, Value::ByteList(bytes)) => {
            if bytes.0.len() > *max_length {
                return Err(InvalidValue::new(
                    path,
                    Reason::ListTooLong { max: *max_length, actual: bytes.0.len() },
                ));
            }
            Ok(())
        }
        (Type::Vector { element, length }, Value::Vector(items)) => {
            if items.len() != *length {
                return Err(InvalidValue::new(
                    path,
                    Reason::WrongVectorLength { expected: *length, actual: items.len() },
                ));
            }
            for (i, item) in items.iter().enumerate() {
                validate(item, element, &format!("{path}.{i}"))?;
            }
            Ok(())
        }
        (Type::List { element, max_length }, Value::List(items)) => {
            if items.len() > *max_length {
                return Err(InvalidValue::new(
                    path,
                    Reason::ListTooLong { max: *max_length, actual: items.len() },
                ));
            }
            for (i, item) in items.iter().enumerate() {
                validate(item, element, &format!("{path}.{i}"))?;
            }
            Ok(())
        }
        (Type::Container(fields), Value::Container(given)) => {
            let declared: std::collections::HashSet<&str> =
                fields.iter().map(|f| f.name.0.as_str()).collect();
            for (name, _) in given {
                if !declared.contains(name.as_str()) {
                    return Err(InvalidValue::new(path, Reason::UnexpectedField(name.clone())));
                }
            }

            for field in fields {
                let Some(field_value) = value.field(&field.name.0) else {
                    return Err(InvalidValue::new(
                        path,
                        Reason::MissingField(field.name.0.clone()),
                    ));
                };
                validate(field_value, &field.ty, &format!("{path}.{}", field.name.0))?;
            }
            Ok(())
        }
        _ => Err(InvalidValue::new(path, Reason::WrongType { expected: type_name(ty) })),
    }
}

fn validate_uint(u: &ssz_schema::UintType, v: &UintValue, path: &str) -> Result<(), InvalidValue> {
    if let UintValue::Infinity = v {
        return if u.allows_infinity_sentinel() {
            Ok(())
        } else {
            Err(InvalidValue::new(path, Reason::UintOutOfRange))
        };
    }

    let ceiling = if u.byte_length >= 32 {
        ssz_primitives::U256::MAX
    } else {
        (ssz_primitives::U256::from(1u64) << (u.byte_length * 8)) - ssz_primitives::U256::from(1u64)
    };

    let biased = v
        .magnitude()
        .checked_add(ssz_primitives::U256::from(u.offset))
        .ok_or_else(|| InvalidValue::new(path, Reason::UintOutOfRange))?;

    if biased > ceiling {
        return Err(InvalidValue::new(path, Reason::UintOutOfRange));
    }

    Ok(())
}

fn type_name(ty: &Type) -> &'static str {
    match ty {
        Type::Bool => "Bool",
        Type::Uint(_) => "Uint",
        Type::ByteVector { .. } => "ByteVector",
        Type::ByteList { .. } => "ByteList",
        Type::Vector { .. } => "Vector",
        Type::List { .. } => "List",
        Type::Container(_) => "Container",
    }
}

#[cfg(test)]
mod tests {
    use ssz_primitives::Bytes;
    use ssz_schema::{parse_type, Field, FieldName, Type, UintType};

    use super::*;

    #[test]
    fn bool_and_uint_roundtrip() {
        assert!(validate(&Value::Bool(true), &Type::Bool, "$").is_ok());
        assert!(validate(&Value::Bool(false), &Type::Bool, "$").is_ok());

        let ty = parse_type("uint8").unwrap();
        assert!(validate(&Value::Uint(UintValue::Int(255)), &ty, "$").is_ok());
        assert!(validate(&Value::Uint(UintValue::Int(256)), &ty, "$").is_err());
    }

    #[test]
    fn infinity_sentinel_requires_wide_use_number() {
        let narrow = Type::Uint(UintType::plain(8));
        assert!(validate(&Value::Uint(UintValue::Infinity), &narrow, "$").is_err());

        let wide_no_flag = Type::Uint(UintType { byte_length: 32, use_number: false, offset: 0 });
        assert!(validate(&Value::Uint(UintValue::Infinity), &wide_no_flag, "$").is_err());

        let wide_with_flag = Type::Uint(UintType { byte_length: 32, use_number: true, offset: 0 });
        assert!(validate(&Value::Uint(UintValue::Infinity), &wide_with_flag, "$").is_ok());
    }

    #[test]
    fn byte_vector_length_mismatch() {
        let ty = Type::ByteVector { length: 2 };
        assert!(validate(&Value::ByteVector(vec![1, 2]), &ty, "$").is_ok());
        let err = validate(&Value::ByteVector(vec![1]), &ty, "$").unwrap_err();
        assert_eq!(
            err.reason,
            crate::error::InvalidValueReason::WrongByteVectorLength { expected: 2, actual: 1 }
        );
    }

    #[test]
    fn byte_list_respects_max_length() {
        let ty = Type::ByteList { max_length: 2 };
        assert!(validate(&Value::ByteList(Bytes(vec![1, 2])), &ty, "$").is_ok());
        assert!(validate(&Value::ByteList(Bytes(vec![1, 2, 3])), &ty, "$").is_err());
    }

    #[test]
    fn container_requires_every_declared_field_and_rejects_extras() {
        let ty = Type::container(vec![
            Field { name: FieldName::try_from("a").unwrap(), ty: Type::Bool },
            Field { name: FieldName::try_from("b").unwrap(), ty: parse_type("uint8").unwrap() },
        ]);

        let ok = Value::Container(vec![
            ("a".to_owned(), Value::Bool(true)),
            ("b".to_owned(), Value::Uint(UintValue::Int(1))),
        ]);
        assert!(validate(&ok, &ty, "$").is_ok());

        let missing = Value::Container(vec![("a".to_owned(), Value::Bool(true))]);
        assert!(validate(&missing, &ty, "$").is_err());

        let extra = Value::Container(vec![
            ("a".to_owned(), Value::Bool(true)),
            ("b".to_owned(), Value::Uint(UintValue::Int(1))),
            ("c".to_owned(), Value::Bool(false)),
        ]);
        assert!(validate(&extra, &ty, "$").is_err());

        // Reordered fields still validate (invariant 6 is about encoder
        // output order, not input acceptance order).
        let reordered = Value::Container(vec![
            ("b".to_owned(), Value::Uint(UintValue::Int(1))),
            ("a".to_owned(), Value::Bool(true)),
        ]);
        assert!(validate(&reordered, &ty, "$").is_ok());
    }
}
