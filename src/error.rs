use thiserror::Error;

#[derive(Error, Debug)]
pub enum MptError {
    /// Malformed or invalid MPT header.
    #[error("format error: {0}")]
    Format(String),

    /// Requested base outside the supported set, or one whose digit width
    /// does not evenly divide the 64-bit limb width.
    #[error("unsupported base {0}")]
    UnsupportedBase(u32),

    /// Requested start digit lies before the beginning of the stored data.
    #[error("position out of range: digit {0} precedes the stored data")]
    PositionOutOfRange(u64),

    /// Propagated I/O error. Includes short reads against a file whose
    /// header claims more limbs than the body holds.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
