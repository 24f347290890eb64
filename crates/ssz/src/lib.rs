// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Provides encoding (serialization) and decoding (deserialization) in the
//! SimpleSerialize (SSZ) format designed for use in Ethereum consensus
//! clients, driven by runtime type descriptors rather than a derive macro.
//!
//! A schema is built once from [`ssz_schema::parse_type`] (or the
//! [`ssz_schema::Type`] constructors directly), and the same descriptor then
//! drives all four codec components:
//!
//! - the Size Oracle ([`size`], [`fixed_size`]),
//! - the Value Validator ([`validate`]),
//! - the Serializer ([`serialize`]),
//! - the Decoder ([`deserialize`]).
//!
//! ```rust
//! use ssz::{serialize, deserialize, Value, UintValue};
//! use ssz_schema::parse_type;
//!
//! let ty = parse_type("uint32").unwrap();
//! let value = Value::Uint(UintValue::Int(42));
//!
//! let bytes = serialize(&value, &ty).unwrap();
//! assert_eq!(bytes, vec![42, 0, 0, 0]);
//!
//! let decoded = deserialize(&bytes, &ty).unwrap();
//! assert_eq!(decoded, value);
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod layout;
pub mod size;
pub mod validate;
pub mod value;

pub use decode::deserialize;
pub use encode::serialize;
pub use error::{DecodeError, InvalidValue, InvalidValueReason};
pub use size::{fixed_size, size, BYTES_PER_LENGTH_PREFIX};
pub use validate::validate;
pub use value::{UintValue, Value};

pub use ssz_schema::BadType;
