//! MPT disk header decoding.
//!
//! An MPT file begins with a fixed 4096-byte header region. Only the first
//! 56 bytes carry fields; the remainder is reserved padding. All fields are
//! little endian. Field layout (byte offsets):
//!
//! ```text
//! 0  magic          8 bytes  b"MPT\x01FILE"
//! 8  stored_len     u64      limb count of the body
//! 16 allocated_len  u64      reserved capacity, ignored here
//! 24 kind           u64      1 = integer, 2 = fixed point
//! 32 negative       u64      sign flag
//! 40 stored_base    u64      reserved
//! 48 exponent       i64      integer-part limb count
//! ```

use crate::MptError;

/// Signature at the start of every MPT file.
pub const MPT_MAGIC: [u8; 8] = *b"MPT\x01FILE";

/// Total size of the on-disk header region; the limb body starts here.
pub const DISK_HEADER_SIZE: u64 = 4096;

/// Bytes of the header region actually occupied by fields.
pub const HEADER_FIELD_BYTES: usize = 56;

/// On-disk number representation discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// Plain integer (`kind == 1`). Not decodable by the digit reader.
    Integer,
    /// Fixed-point binary fraction (`kind == 2`).
    FixedPoint,
}

/// Parsed MPT header. Read once at open time, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MptHeader {
    /// Total count of 64-bit limbs stored in the body.
    pub stored_len: u64,
    /// Reserved capacity; not consumed by the reader.
    pub allocated_len: u64,
    pub kind: NumberKind,
    /// Sign flag, informational only.
    pub negative: bool,
    /// Base metadata of the stored representation; reserved.
    pub stored_base: u64,
    /// Number of limbs, counted from the end of the array, that form the
    /// integer part of the value. Always non-negative after decoding.
    pub exponent: i64,
}

fn field_u64(data: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(data[offset..offset + 8].try_into().unwrap())
}

/// Decode an MPT header from the first bytes of a file.
///
/// Fails if fewer than [`HEADER_FIELD_BYTES`] bytes are supplied, if the
/// magic does not match, if the number kind is not fixed point, or if the
/// exponent is negative. Never reads limb data.
pub fn decode_mpt_header(data: &[u8]) -> Result<MptHeader, MptError> {
    if data.len() < HEADER_FIELD_BYTES {
        return Err(MptError::Format("header too short".into()));
    }
    if data[..8] != MPT_MAGIC {
        return Err(MptError::Format("bad magic, not an MPT file".into()));
    }
    let kind = match field_u64(data, 24) {
        1 => {
            return Err(MptError::Format(
                "integer-kind MPT files are not supported".into(),
            ))
        }
        2 => NumberKind::FixedPoint,
        other => {
            return Err(MptError::Format(format!("unknown number kind {other}")));
        }
    };
    let exponent = field_u64(data, 48) as i64;
    if exponent < 0 {
        return Err(MptError::Format("negative exponent".into()));
    }
    Ok(MptHeader {
        stored_len: field_u64(data, 8),
        allocated_len: field_u64(data, 16),
        kind,
        negative: field_u64(data, 32) != 0,
        stored_base: field_u64(data, 40),
        exponent,
    })
}
