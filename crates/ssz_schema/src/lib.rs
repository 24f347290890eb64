//! The SSZ Type Descriptor Model.
//!
//! A closed set of tagged type variants ([`types::Type`]) plus a normalizer
//! ([`shorthand::parse_type`]) that accepts shorthand syntax (strings for
//! primitives, small composite shapes for vectors/lists/containers) and
//! produces a fully-qualified descriptor.

mod error;
pub use error::BadType;

mod names;
pub use names::{FieldName, NameError};

mod types;
pub use types::{Field, Type, UintType, SUPPORTED_UINT_BYTE_LENGTHS};

mod shorthand;
pub use shorthand::{parse_type, Shorthand};
