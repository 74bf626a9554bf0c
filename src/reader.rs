//! Streaming digit reader over MPT files.
//!
//! Digit position 0 (the most significant digit of the stored value) lives
//! in the *highest* limb of the file body, so the reader walks the body
//! back-to-front: it pages a bounded window of limbs into memory, consumes
//! them from the top index down, and refills by seeking toward the start of
//! the file. Seeks are monotonically decreasing even though the emitted
//! digit stream runs forward.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::header::{decode_mpt_header, MptHeader, DISK_HEADER_SIZE, HEADER_FIELD_BYTES};
use crate::MptError;

/// A 64-bit limb always fits in 19 decimal digits.
pub const DECIMAL_DIGITS_PER_LIMB: usize = 19;

/// Bits per stored limb.
const LIMB_BITS: u32 = 64;

/// Bytes per stored limb.
const LIMB_BYTES: u64 = 8;

/// Default limb buffer capacity (8 MiB of limb data).
pub const MAX_BUF_LIMBS: usize = 1 << 20;

/// Per-limb decode state, fixed to one variant for the reader's lifetime.
#[derive(Debug, Clone)]
enum DigitCursor {
    /// Base 10: digits of the current limb, least significant at index 0,
    /// emitted by reading the array from its high index downward.
    Decimal {
        digits: [u8; DECIMAL_DIGITS_PER_LIMB],
        remaining: u32,
    },
    /// Power-of-two base: the raw limb consumed by shifting. `remaining`
    /// counts bits, `exp` is log2 of the base.
    Binary {
        limb: u64,
        remaining: u32,
        exp: u32,
        mask: u64,
    },
}

impl DigitCursor {
    fn exhausted(&self) -> bool {
        match self {
            DigitCursor::Decimal { remaining, .. } => *remaining == 0,
            DigitCursor::Binary { remaining, .. } => *remaining == 0,
        }
    }

    /// Begin decoding `value`, discarding `skip` leading digits (bits for
    /// the binary variant).
    fn load(&mut self, value: u64, skip: u32) {
        match self {
            DigitCursor::Decimal { digits, remaining } => {
                let mut a = value;
                for d in digits.iter_mut() {
                    *d = (a % 10) as u8;
                    a /= 10;
                }
                *remaining = DECIMAL_DIGITS_PER_LIMB as u32 - skip;
            }
            DigitCursor::Binary {
                limb, remaining, ..
            } => {
                *limb = value;
                *remaining = LIMB_BITS - skip;
            }
        }
    }

    fn emit(&mut self) -> u8 {
        match self {
            DigitCursor::Decimal { digits, remaining } => {
                *remaining -= 1;
                digits[*remaining as usize]
            }
            DigitCursor::Binary {
                limb,
                remaining,
                exp,
                mask,
            } => {
                *remaining -= *exp;
                ((*limb >> *remaining) & *mask) as u8
            }
        }
    }
}

/// Streaming reader over one open MPT file.
///
/// Each reader owns its file handle and limb buffer outright; dropping it
/// releases both. Multiple readers over the same file are independent.
pub struct MptReader {
    file: File,
    header: MptHeader,
    buf: Vec<u64>,
    /// Index of the next unconsumed limb in `buf`, counting down.
    buf_pos: usize,
    /// Limb index (from the body start) of the region not yet paged in.
    /// Decreases toward zero as refills proceed.
    file_pos: u64,
    /// Digits (bits for power-of-two bases) to discard from the first limb
    /// decoded, when the start position is not limb aligned. Zeroed after
    /// first use.
    start_digit: u32,
    capacity: usize,
    cursor: DigitCursor,
}

impl MptReader {
    /// Open `path` for digit streaming in `base`, starting at `start_pos`
    /// digits past the most significant digit of the stored value.
    ///
    /// Supported bases are 10 and the powers of two whose digit width
    /// evenly divides the 64-bit limb width, i.e. 2, 4 and 16. Base 8 is
    /// rejected because three bits do not tile a limb.
    pub fn open<P: AsRef<Path>>(path: P, base: u32, start_pos: u64) -> Result<Self, MptError> {
        Self::open_with_capacity(path, base, start_pos, MAX_BUF_LIMBS)
    }

    /// Like [`open`](Self::open) with an explicit limb buffer capacity.
    /// Digit output is identical for any capacity ≥ 1; small capacities
    /// just refill more often.
    pub fn open_with_capacity<P: AsRef<Path>>(
        path: P,
        base: u32,
        start_pos: u64,
        capacity: usize,
    ) -> Result<Self, MptError> {
        let (cursor, digits_per_limb, scaled_pos) = match base {
            10 => (
                DigitCursor::Decimal {
                    digits: [0; DECIMAL_DIGITS_PER_LIMB],
                    remaining: 0,
                },
                DECIMAL_DIGITS_PER_LIMB as u64,
                start_pos,
            ),
            2 | 4 | 8 | 16 => {
                let exp = base.trailing_zeros();
                if LIMB_BITS % exp != 0 {
                    return Err(MptError::UnsupportedBase(base));
                }
                // Power-of-two position bookkeeping is in bits, not digits.
                // A position whose bit count overflows u64 lies far past any
                // representable body.
                let scaled = start_pos
                    .checked_mul(exp as u64)
                    .ok_or(MptError::PositionOutOfRange(start_pos))?;
                (
                    DigitCursor::Binary {
                        limb: 0,
                        remaining: 0,
                        exp,
                        mask: (base - 1) as u64,
                    },
                    LIMB_BITS as u64,
                    scaled,
                )
            }
            other => return Err(MptError::UnsupportedBase(other)),
        };

        let mut file = File::open(path)?;
        let mut raw = [0u8; HEADER_FIELD_BYTES];
        file.read_exact(&mut raw)?;
        let header = decode_mpt_header(&raw)?;

        // Walk backward from the integer/fraction limb boundary to the limb
        // holding the requested digit. i128 keeps the subtraction exact for
        // any u64 position or length.
        let limb_offset = header.stored_len as i128
            - header.exponent as i128
            - (scaled_pos / digits_per_limb) as i128;
        if limb_offset <= 0 {
            return Err(MptError::PositionOutOfRange(start_pos));
        }
        // Positive and at most stored_len, so it fits in u64.
        let file_pos = limb_offset as u64;

        Ok(Self {
            file,
            header,
            buf: Vec::new(),
            buf_pos: 0,
            file_pos,
            start_digit: (scaled_pos % digits_per_limb) as u32,
            capacity,
            cursor,
        })
    }

    /// Header decoded at open time.
    pub fn header(&self) -> &MptHeader {
        &self.header
    }

    /// Page in the next window of limbs, ending at the previous window's
    /// start. Returns `false` when the body is exhausted.
    fn refill(&mut self) -> Result<bool, MptError> {
        let load = self.file_pos.min(self.capacity as u64) as usize;
        if load == 0 {
            return Ok(false);
        }
        self.file_pos -= load as u64;
        let offset = self
            .file_pos
            .checked_mul(LIMB_BYTES)
            .and_then(|o| o.checked_add(DISK_HEADER_SIZE))
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "limb offset exceeds u64")
            })?;
        self.file.seek(SeekFrom::Start(offset))?;
        // A short read means the body contradicts the header's stored_len;
        // read_exact surfaces that as an unrecoverable I/O error.
        let mut raw = vec![0u8; load * LIMB_BYTES as usize];
        self.file.read_exact(&mut raw)?;
        self.buf.clear();
        self.buf.extend(
            raw.chunks_exact(LIMB_BYTES as usize)
                .map(|c| u64::from_le_bytes(c.try_into().unwrap())),
        );
        self.buf_pos = load;
        Ok(true)
    }

    fn next_limb(&mut self) -> Result<Option<u64>, MptError> {
        if self.buf_pos == 0 && !self.refill()? {
            return Ok(None);
        }
        self.buf_pos -= 1;
        Ok(Some(self.buf[self.buf_pos]))
    }

    /// Produce the next digit value (`0..base`), or `None` once the stored
    /// data runs out. Running out is a normal terminal state, not an error.
    pub fn next_digit(&mut self) -> Result<Option<u8>, MptError> {
        if self.cursor.exhausted() {
            let limb = match self.next_limb()? {
                Some(l) => l,
                None => return Ok(None),
            };
            let skip = std::mem::take(&mut self.start_digit);
            self.cursor.load(limb, skip);
        }
        Ok(Some(self.cursor.emit()))
    }

    /// Like [`next_digit`](Self::next_digit) but mapped to a printable
    /// character.
    pub fn next_char(&mut self) -> Result<Option<char>, MptError> {
        Ok(self.next_digit()?.map(digit_to_char))
    }

    /// Release the file handle and buffer. Dropping the reader does the
    /// same; consuming `self` makes a double close unrepresentable.
    pub fn close(self) {}
}

/// Map a digit value to its printable form: `0..=9` to `'0'..='9'`, `10..=15`
/// to `'A'..='F'`.
pub fn digit_to_char(digit: u8) -> char {
    if digit < 10 {
        (b'0' + digit) as char
    } else {
        (b'A' + digit - 10) as char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_cursor_emits_most_significant_first() {
        let mut cursor = DigitCursor::Decimal {
            digits: [0; DECIMAL_DIGITS_PER_LIMB],
            remaining: 0,
        };
        cursor.load(3141592653589793238, 0);
        let out: Vec<u8> = (0..DECIMAL_DIGITS_PER_LIMB).map(|_| cursor.emit()).collect();
        assert_eq!(out, [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9, 3, 2, 3, 8]);
        assert!(cursor.exhausted());
    }

    #[test]
    fn binary_cursor_emits_high_nibbles_first() {
        let mut cursor = DigitCursor::Binary {
            limb: 0,
            remaining: 0,
            exp: 4,
            mask: 0xF,
        };
        cursor.load(0x0123_4567_89AB_CDEF, 0);
        let out: Vec<u8> = (0..16).map(|_| cursor.emit()).collect();
        assert_eq!(out, (0..16).collect::<Vec<u8>>());
    }

    #[test]
    fn load_skip_discards_leading_digits() {
        let mut cursor = DigitCursor::Decimal {
            digits: [0; DECIMAL_DIGITS_PER_LIMB],
            remaining: 0,
        };
        cursor.load(3141592653589793238, 2);
        assert_eq!(cursor.emit(), 4);
    }

    #[test]
    fn digit_chars() {
        assert_eq!(digit_to_char(0), '0');
        assert_eq!(digit_to_char(9), '9');
        assert_eq!(digit_to_char(10), 'A');
        assert_eq!(digit_to_char(15), 'F');
    }
}
