//! Digit extraction from MPT binary files.
//!
//! An MPT file stores one very large fixed-point number as an array of
//! 64-bit limbs behind a fixed 4096-byte header. This crate decodes that
//! format and streams individual digits in base 10, 2, 4 or 16, starting at
//! an arbitrary digit position, paging limb data in a bounded buffer rather
//! than loading the whole body.

pub mod error;
pub mod header;
pub mod io_utils;
pub mod reader;

pub use error::MptError;
pub use header::{decode_mpt_header, MptHeader, NumberKind, DISK_HEADER_SIZE, MPT_MAGIC};
pub use reader::{digit_to_char, MptReader, DECIMAL_DIGITS_PER_LIMB, MAX_BUF_LIMBS};
