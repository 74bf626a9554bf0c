use std::fmt;
use std::io;
use std::path::Path;

use crate::MptError;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Simple CLI error from string.
pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_string(),
        source: None,
    }
}

/// Format a user friendly I/O error message with suggestions.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "Check permissions or run as a different user.",
        UnexpectedEof => "File appears truncated or corrupted.",
        _ => "Check the file and try again.",
    };
    format!(
        "Error {} '{}': {}. {}",
        operation,
        path.display(),
        err,
        suggestion
    )
}

/// Convert an MPT library error into a CLI error naming the file. I/O
/// failures carry the suggestion text from [`format_io_error`].
pub fn mpt_cli_error(path: &Path, err: MptError) -> CliError {
    let msg = match &err {
        MptError::Io(io) => format_io_error("reading", path, io),
        other => format!("{}: {}", path.display(), cli_hint(other)),
    };
    CliError {
        msg,
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for an MPT error variant.
pub fn cli_hint(err: &MptError) -> String {
    use MptError::*;
    match err {
        Format(msg) => format!("{msg}. Verify the file is an intact MPT dump."),
        UnsupportedBase(b) => format!("base {b} is not supported; use 10, 2, 4 or 16."),
        PositionOutOfRange(_) => "cannot display at this position.".to_string(),
        Io(io) => format!("{io}"),
    }
}
