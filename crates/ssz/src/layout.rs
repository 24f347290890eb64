// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Offset-table layout validation, shared by the decoder's container and
//! array paths (an aggregate with variable-size children always has the
//! same fixed-region-then-variable-region shape, whether the aggregate is a
//! `Container`, a `Vector`, or a `List`).

use crate::error::DecodeError;
use crate::size::BYTES_PER_LENGTH_PREFIX;

/// Validates the offset table of an aggregate with `num_offsets` variable
/// children, whose fixed region (offset table) is `fixed_portion_size`
/// bytes long, against the complete aggregate `bytes`.
///
/// Checks, per the decoder contract:
/// - every offset slot is in-bounds,
/// - the first offset equals `fixed_portion_size` (the fixed/variable
///   region boundary),
/// - offsets are non-decreasing,
/// - no offset exceeds the buffer length.
pub fn validate_offset_table(
    bytes: &[u8],
    fixed_portion_size: usize,
    num_offsets: usize,
) -> Result<(), DecodeError> {
    if num_offsets == 0 {
        return Ok(());
    }

    if bytes.len() < fixed_portion_size {
        return Err(DecodeError::InvalidByteLength { len: bytes.len(), expected: fixed_portion_size });
    }

    let mut prev: Option<usize> = None;
    for i in 0..num_offsets {
        let offset = read_offset(bytes, fixed_portion_size, num_offsets, i)?;

        if i == 0 {
            if offset != fixed_portion_size {
                return Err(DecodeError::OffsetIntoFixedPortion(offset));
            }
        } else if let Some(p) = prev {
            if offset < p {
                return Err(DecodeError::OffsetsAreDecreasing(offset));
            }
        }

        if offset > bytes.len() {
            return Err(DecodeError::OffsetOutOfBounds(offset));
        }

        prev = Some(offset);
    }

    Ok(())
}

/// Reads offset slot `index` (0-based) out of `num_offsets` total slots
/// occupying the first `fixed_portion_size` bytes of `bytes`.
///
/// This assumes the offset table is packed contiguously at the end of the
/// fixed region, which holds for a `Vector`/`List` of variable-size
/// elements (every slot is an offset, so the table is the whole fixed
/// region) but does **not** hold for a `Container`, whose offset slots can
/// be interleaved with fixed fields in declared order. Container decoding
/// locates each slot itself and reads it through [`read_offset_at`]
/// instead.
pub fn read_offset(
    bytes: &[u8],
    fixed_portion_size: usize,
    num_offsets: usize,
    index: usize,
) -> Result<usize, DecodeError> {
    debug_assert!(index < num_offsets);

    let table_start = fixed_portion_size - num_offsets * BYTES_PER_LENGTH_PREFIX;
    read_offset_at(bytes, table_start + index * BYTES_PER_LENGTH_PREFIX)
}

/// Reads a raw 4-byte little-endian offset value at an explicit byte
/// position, rather than one computed from a contiguous offset-table
/// layout.
pub fn read_offset_at(bytes: &[u8], slot: usize) -> Result<usize, DecodeError> {
    if slot + BYTES_PER_LENGTH_PREFIX > bytes.len() {
        return Err(DecodeError::InvalidByteLength {
            len: bytes.len(),
            expected: slot + BYTES_PER_LENGTH_PREFIX,
        });
    }

    let mut buf = [0u8; BYTES_PER_LENGTH_PREFIX];
    buf.copy_from_slice(&bytes[slot..slot + BYTES_PER_LENGTH_PREFIX]);
    Ok(u32::from_le_bytes(buf) as usize)
}

/// Like [`read_offset`], but `index == num_offsets` yields the buffer's
/// length (the end of the last element's body) instead of an error.
pub fn read_offset_or_end(
    bytes: &[u8],
    fixed_portion_size: usize,
    num_offsets: usize,
    index: usize,
) -> Result<usize, DecodeError> {
    if index == num_offsets {
        Ok(bytes.len())
    } else {
        read_offset(bytes, fixed_portion_size, num_offsets, index)
    }
}
