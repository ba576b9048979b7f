//! Error module
//!
//! Defines the crate-wide error type using `thiserror`. Only fatal conditions
//! live here: malformed lines inside an oto file are tolerated by the parser
//! and never surface as an [`OtoError`].

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for oto file handling.
///
/// # Error Categories
///
/// - **File errors**: missing input files and general I/O failures
/// - **Encoding errors**: unknown labels, strict decode and encode failures
/// - **CLI errors**: invalid arguments, failed validation, JSON output
///
/// # Example
///
/// ```rust,ignore
/// use oto_file::error::OtoError;
/// use oto_file::oto::OtoFile;
///
/// fn example() -> Result<(), OtoError> {
///     let mut oto = OtoFile::new();
///     oto.load("voice/oto.ini", None)?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum OtoError {
    /// The file to load does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// General I/O error.
    ///
    /// Covers reading the source file, creating parent directories and
    /// writing the target file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The encoding label is unknown, or names an encoding that cannot be
    /// used in the requested direction (UTF-16 cannot be written).
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// The file is not valid text in an explicitly requested encoding.
    ///
    /// Auto-detection never produces this error; it falls back to UTF-8.
    #[error("Failed to decode {} as {encoding}", .path.display())]
    Decode {
        /// The file being loaded.
        path: PathBuf,
        /// The encoding label that was requested.
        encoding: String,
    },

    /// An entry contains characters the target encoding cannot represent.
    #[error("Entry for {filename:?} cannot be encoded as {encoding}")]
    Encode {
        /// The encoding label being written.
        encoding: String,
        /// Filename of the first entry that failed to encode.
        filename: String,
    },

    /// JSON serialization error (CLI `--json` output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The validation report found lines the loader would drop.
    ///
    /// The report has already been printed; this error signals that the
    /// process should exit with code 3.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
