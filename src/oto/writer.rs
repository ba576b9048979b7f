use std::fs;
use std::path::Path;

use super::encoding::encode_strict;
use super::record::OtoEntry;
use crate::error::OtoError;

/// Line terminator written after every entry, on every platform.
pub const LINE_TERMINATOR: &str = "\n";

/// Serializes entries into encoded oto text.
///
/// Each entry becomes `filename=alias,offset,consonant,cutoff,preutter,overlap`
/// followed by `\n`, in sequence order.
///
/// # Errors
///
/// - [`OtoError::UnsupportedEncoding`] if the label is unknown or unwritable
/// - [`OtoError::Encode`] naming the first entry that contains characters
///   the encoding cannot represent
pub fn serialize(entries: &[OtoEntry], encoding: &str) -> Result<Vec<u8>, OtoError> {
    let mut buffer = Vec::new();
    for entry in entries {
        let line = format!("{}{}", entry, LINE_TERMINATOR);
        let bytes = encode_strict(&line, encoding)?.ok_or_else(|| OtoError::Encode {
            encoding: encoding.to_string(),
            filename: entry.filename.clone(),
        })?;
        buffer.extend_from_slice(&bytes);
    }
    Ok(buffer)
}

/// Writes entries to `path`, creating missing parent directories.
///
/// The whole file is encoded before anything touches the disk, so an
/// encode failure leaves any existing file untouched.
///
/// # Errors
///
/// See [`serialize`]; also [`OtoError::Io`] for filesystem failures.
pub fn write_entries(path: &Path, entries: &[OtoEntry], encoding: &str) -> Result<(), OtoError> {
    let buffer = serialize(entries, encoding)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, buffer)?;
    Ok(())
}
