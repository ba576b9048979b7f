//! Text encoding support for oto files.
//!
//! Oto files predate any agreement on text encoding: older voicebanks are
//! written in the Japanese Windows code page, newer ones in UTF-8, and a few
//! in whatever ANSI code page the author's machine used. Labels are resolved
//! through [`encoding_rs`], with the Windows-specific labels `cp932` and
//! `mbcs` mapped onto their closest WHATWG encodings.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8, WINDOWS_1252};
use tracing::debug;

use crate::error::OtoError;

/// The label that requests automatic detection.
pub const AUTO_ENCODING: &str = "auto";

/// The encoding used when nothing else is known.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Candidate encodings tried by [`detect_encoding`], in priority order.
///
/// UTF-8 must come first: the legacy code pages accept most UTF-8 byte
/// sequences without error and would shadow it.
pub const CANDIDATE_ENCODINGS: [&str; 3] = ["utf-8", "cp932", "mbcs"];

/// Returns true if the label requests automatic detection.
///
/// `None`, the empty string and `"auto"` (in any case) all mean auto.
///
/// # Examples
///
/// ```
/// use oto_file::oto::encoding::is_auto;
///
/// assert!(is_auto(None));
/// assert!(is_auto(Some("")));
/// assert!(is_auto(Some("AUTO")));
/// assert!(!is_auto(Some("cp932")));
/// ```
#[must_use]
pub fn is_auto(label: Option<&str>) -> bool {
    match label.map(str::trim) {
        None | Some("") => true,
        Some(label) => label.eq_ignore_ascii_case(AUTO_ENCODING),
    }
}

/// Resolves an encoding label to an [`Encoding`].
///
/// `cp932` resolves to Shift_JIS (which `encoding_rs` implements as
/// windows-31j, the same repertoire). `mbcs` names the Windows ANSI code
/// page of the current locale; it resolves to windows-1252. Every other
/// label goes through the WHATWG label table.
///
/// # Errors
///
/// Returns [`OtoError::UnsupportedEncoding`] for unknown labels.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, OtoError> {
    let trimmed = label.trim();
    if trimmed.eq_ignore_ascii_case("cp932") {
        return Ok(SHIFT_JIS);
    }
    if trimmed.eq_ignore_ascii_case("mbcs") {
        return Ok(WINDOWS_1252);
    }
    Encoding::for_label(trimmed.as_bytes())
        .ok_or_else(|| OtoError::UnsupportedEncoding(label.to_string()))
}

/// Decodes bytes in the given encoding, failing on any malformed sequence.
///
/// A leading UTF-8 byte order mark is dropped when decoding as UTF-8.
/// Returns `Ok(None)` when the bytes are not valid in that encoding.
///
/// # Errors
///
/// Returns [`OtoError::UnsupportedEncoding`] if the label is unknown.
pub fn decode_strict<'a>(bytes: &'a [u8], label: &str) -> Result<Option<Cow<'a, str>>, OtoError> {
    let encoding = resolve_encoding(label)?;
    let bytes = if encoding == UTF_8 {
        bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
    } else {
        bytes
    };
    Ok(encoding.decode_without_bom_handling_and_without_replacement(bytes))
}

/// Encodes text in the given encoding, failing on unrepresentable characters.
///
/// Returns `Ok(None)` when some character has no mapping in the target
/// encoding.
///
/// # Errors
///
/// Returns [`OtoError::UnsupportedEncoding`] if the label is unknown or the
/// encoding cannot be written (UTF-16 and `replacement` encode as UTF-8 in
/// `encoding_rs`, which would silently change the file's encoding).
pub fn encode_strict<'a>(text: &'a str, label: &str) -> Result<Option<Cow<'a, [u8]>>, OtoError> {
    let encoding = resolve_encoding(label)?;
    if encoding.output_encoding() != encoding {
        return Err(OtoError::UnsupportedEncoding(label.to_string()));
    }
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        return Ok(None);
    }
    Ok(Some(bytes))
}

/// Picks the first candidate encoding that decodes `bytes` without error.
///
/// Falls back to [`DEFAULT_ENCODING`] if no candidate succeeds.
#[must_use]
pub fn detect_encoding_bytes(bytes: &[u8]) -> &'static str {
    CANDIDATE_ENCODINGS
        .into_iter()
        .find(|label| matches!(decode_strict(bytes, label), Ok(Some(_))))
        .unwrap_or(DEFAULT_ENCODING)
}

/// Detects the encoding of the file at `path`.
///
/// Reads the whole file once and probes [`CANDIDATE_ENCODINGS`] in order.
/// Detection never fails: an unreadable file or undecodable content yields
/// [`DEFAULT_ENCODING`]. Callers read the file again for the actual parse.
#[must_use]
pub fn detect_encoding(path: &Path) -> &'static str {
    match std::fs::read(path) {
        Ok(bytes) => {
            let detected = detect_encoding_bytes(&bytes);
            debug!(path = %path.display(), encoding = detected, "detected encoding");
            detected
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "encoding probe failed, assuming utf-8");
            DEFAULT_ENCODING
        }
    }
}
