//! Failure modes of the Type Descriptor Model.

use thiserror::Error;

/// The descriptor is malformed: an unknown shorthand, an unsupported uint
/// width, a duplicate field name, or a non-positive vector/list length.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum BadType {
    #[error("unknown shorthand type '{0}'")]
    UnknownShorthand(String),

    #[error("unsupported uint bit width {0}, expected one of 8, 16, 32, 64, 128, 256")]
    UnsupportedUintWidth(usize),

    #[error("duplicate field name '{0}'")]
    DuplicateFieldName(String),

    #[error("invalid field name '{0}': {1}")]
    InvalidFieldName(String, String),

    #[error("non-positive length {0} for vector/list type")]
    NonPositiveLength(i64),

    #[error(
        "unbounded byte list/list shorthand is not supported; supply an explicit max length"
    )]
    UnboundedByteList,
}
