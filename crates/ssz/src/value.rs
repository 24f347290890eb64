//! Runtime SSZ values: the `v` half of every `(value, type)` pair the codec
//! operates on.

use ssz_primitives::{Bytes, U256};

/// A `Uint` value.
///
/// Widths up to 6 bytes are comfortably native; this is still represented
/// as `Int` up to `u64` (8 bytes) since Rust has no "unsafe integer" ceiling
/// the way the `useNumber` flag implies for a host language with only
/// double-precision numbers. `Big` covers `Uint128`/`Uint256` and any value
/// a caller chooses to hand over as a big integer. `Infinity` is the
/// `useNumber` sentinel described in the Type Descriptor Model: valid only
/// for `byte_length > 6` fields with `use_number` set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UintValue {
    Int(u64),
    Big(U256),
    Infinity,
}

impl UintValue {
    /// Widens this value to a `U256` for range-checking and biasing.
    /// `Infinity` widens to `U256::MAX`; callers must check
    /// [`crate::validate`] first to confirm the sentinel was actually
    /// licensed for this field.
    pub fn magnitude(&self) -> U256 {
        match self {
            UintValue::Int(v) => U256::from(*v),
            UintValue::Big(v) => *v,
            UintValue::Infinity => U256::MAX,
        }
    }
}

impl From<u64> for UintValue {
    fn from(v: u64) -> Self {
        UintValue::Int(v)
    }
}

impl From<U256> for UintValue {
    fn from(v: U256) -> Self {
        UintValue::Big(v)
    }
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for UintValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        match u.int_in_range(0..=2)? {
            0 => Ok(UintValue::Int(u64::arbitrary(u)?)),
            1 => {
                let limbs: [u64; 4] = u.arbitrary()?;
                Ok(UintValue::Big(U256::from_limbs(limbs)))
            }
            _ => Ok(UintValue::Infinity),
        }
    }
}

/// A runtime value conforming (once validated) to some [`ssz_schema::Type`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Uint(UintValue),
    ByteVector(Vec<u8>),
    ByteList(Bytes),
    Vector(Vec<Value>),
    List(Vec<Value>),
    /// Field values in caller-given order. The order here need not match the
    /// container's declared field order (invariant 6: the encoder uses the
    /// *type's* declared order, not the value's); use [`Value::field`] to
    /// look a field up by name instead of indexing positionally.
    Container(Vec<(String, Value)>),
}

impl Value {
    /// Looks up a container field by name, regardless of the order it was
    /// supplied in.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Container(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }
}
