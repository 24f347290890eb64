//! Normalizes shorthand type specifications into the closed [`Type`] variant set.
//!
//! Two input shapes are accepted, per the Type Descriptor Model:
//!
//! - **Shorthand strings** for primitives (`"bool"`, `"uintN"`, `"bytes"`,
//!   `"bytesN"`), via [`Shorthand::Str`] / the `From<&str>` impl.
//! - **Composite shorthand**: a single element denotes `List<T>`, an
//!   `(elementType, length)` pair denotes `Vector<T, length>`, and a
//!   `(name, fields)` record denotes `Container`.
//!
//! The unbounded `"bytes"` string and the single-element `List<T>` shape
//! both require an explicit bound in this implementation: the shorthand
//! `"bytes"` string and [`Shorthand::List`] without a `max_length` are
//! rejected with [`BadType::UnboundedByteList`], per the resolved Open
//! Question on unbounded lists (consensus schemas require an explicit
//! bound at descriptor-construction time).

use std::collections::HashSet;

use crate::{
    error::BadType,
    names::FieldName,
    types::{Field, Type, UintType, SUPPORTED_UINT_BYTE_LENGTHS},
};

/// Caller-facing shorthand input, normalized into a [`Type`] by [`parse_type`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shorthand {
    /// `"bool"`, `"uintN"`, `"bytes"`, or `"bytesN"`.
    Str(String),

    /// An explicitly bounded byte list: `ByteList{max_length}`.
    ByteList(usize),

    /// `List<T, maxLength>`. Composite shorthand with an explicit bound.
    List { element: Box<Shorthand>, max_length: usize },

    /// `Vector<T, length>`. Composite shorthand `(elementType, length)`.
    Vector { element: Box<Shorthand>, length: usize },

    /// `Container` record shorthand: an ordered sequence of `(fieldName, fieldType)`.
    Container { name: Option<String>, fields: Vec<(String, Shorthand)> },
}

impl From<&str> for Shorthand {
    fn from(s: &str) -> Self {
        Shorthand::Str(s.to_owned())
    }
}

impl From<String> for Shorthand {
    fn from(s: String) -> Self {
        Shorthand::Str(s)
    }
}

/// Normalizes a shorthand specification into a fully-qualified [`Type`].
pub fn parse_type(spec: impl Into<Shorthand>) -> Result<Type, BadType> {
    normalize(spec.into())
}

fn normalize(spec: Shorthand) -> Result<Type, BadType> {
    match spec {
        Shorthand::Str(s) => normalize_str(&s),
        Shorthand::ByteList(max_length) => Ok(Type::ByteList { max_length }),
        Shorthand::List { element, max_length } => {
            let element = Box::new(normalize(*element)?);
            Ok(Type::List { element, max_length })
        }
        Shorthand::Vector { element, length } => {
            if length == 0 {
                return Err(BadType::NonPositiveLength(0));
            }
            let element = Box::new(normalize(*element)?);
            Ok(Type::Vector { element, length })
        }
        Shorthand::Container { fields, .. } => normalize_container(fields),
    }
}

fn normalize_str(s: &str) -> Result<Type, BadType> {
    if s == "bool" {
        return Ok(Type::Bool);
    }

    if s == "bytes" {
        return Err(BadType::UnboundedByteList);
    }

    if let Some(bits) = s.strip_prefix("uint") {
        let bits: usize = bits
            .parse()
            .map_err(|_| BadType::UnknownShorthand(s.to_owned()))?;
        if bits % 8 != 0 || !SUPPORTED_UINT_BYTE_LENGTHS.contains(&(bits / 8)) {
            return Err(BadType::UnsupportedUintWidth(bits));
        }
        return Ok(Type::Uint(UintType::plain(bits / 8)));
    }

    if let Some(n) = s.strip_prefix("bytes") {
        let length: usize = n
            .parse()
            .map_err(|_| BadType::UnknownShorthand(s.to_owned()))?;
        if length == 0 {
            return Err(BadType::NonPositiveLength(0));
        }
        return Ok(Type::ByteVector { length });
    }

    Err(BadType::UnknownShorthand(s.to_owned()))
}

fn normalize_container(fields: Vec<(String, Shorthand)>) -> Result<Type, BadType> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(fields.len());

    for (raw_name, field_spec) in fields {
        if !seen.insert(raw_name.clone()) {
            return Err(BadType::DuplicateFieldName(raw_name));
        }

        let name = FieldName::try_from(raw_name.as_str())
            .map_err(|e| BadType::InvalidFieldName(raw_name.clone(), e.to_string()))?;
        let ty = normalize(field_spec)?;
        out.push(Field { name, ty });
    }

    Ok(Type::Container(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primitive_strings() {
        assert_eq!(parse_type("bool").unwrap(), Type::Bool);
        assert_eq!(
            parse_type("uint32").unwrap(),
            Type::Uint(UintType::plain(4))
        );
        assert_eq!(
            parse_type("bytes4").unwrap(),
            Type::ByteVector { length: 4 }
        );
    }

    #[test]
    fn rejects_unknown_and_unsupported() {
        assert_eq!(
            parse_type("uint24"),
            Err(BadType::UnsupportedUintWidth(24))
        );
        assert_eq!(
            parse_type("nonsense"),
            Err(BadType::UnknownShorthand("nonsense".to_owned()))
        );
        assert_eq!(parse_type("bytes"), Err(BadType::UnboundedByteList));
    }

    #[test]
    fn composite_vector_and_list() {
        let vec_ty = Shorthand::Vector { element: Box::new("uint8".into()), length: 3 };
        assert_eq!(
            normalize(vec_ty).unwrap(),
            Type::Vector { element: Box::new(Type::Uint(UintType::plain(1))), length: 3 }
        );

        let list_ty = Shorthand::List { element: Box::new("uint32".into()), max_length: 16 };
        assert_eq!(
            normalize(list_ty).unwrap(),
            Type::List { element: Box::new(Type::Uint(UintType::plain(4))), max_length: 16 }
        );
    }

    #[test]
    fn zero_length_vector_is_rejected() {
        let vec_ty = Shorthand::Vector { element: Box::new("bool".into()), length: 0 };
        assert_eq!(normalize(vec_ty), Err(BadType::NonPositiveLength(0)));
    }

    #[test]
    fn container_rejects_duplicate_field_names() {
        let spec = Shorthand::Container {
            name: Some("Foo".to_owned()),
            fields: vec![
                ("a".to_owned(), "bool".into()),
                ("a".to_owned(), "uint8".into()),
            ],
        };
        assert_eq!(normalize(spec), Err(BadType::DuplicateFieldName("a".to_owned())));
    }

    #[test]
    fn container_preserves_declared_order() {
        let spec = Shorthand::Container {
            name: None,
            fields: vec![
                ("b".to_owned(), "bool".into()),
                ("a".to_owned(), "uint8".into()),
            ],
        };
        let Type::Container(fields) = normalize(spec).unwrap() else {
            panic!("expected container");
        };
        assert_eq!(fields[0].name.0, "b");
        assert_eq!(fields[1].name.0, "a");
    }
}
