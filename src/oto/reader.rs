//! Oto line parser.
//!
//! The format is loose: hand-edited files routinely contain stray lines,
//! and the alias may appear before or after the five numeric fields. Every
//! line is classified by [`parse_line`]; [`parse_text`] keeps the entries
//! and drops the rest, and the validator reports on the rest.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use super::encoding::decode_strict;
use super::record::OtoEntry;
use crate::error::OtoError;

/// Number of numeric fields on every line.
pub const FIELD_COUNT: usize = 5;

/// Number of leading tokens considered when an alias may be present.
pub const ALIAS_WINDOW: usize = FIELD_COUNT + 1;

/// Names of the numeric fields, in wire order.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = ["offset", "consonant", "cutoff", "preutter", "overlap"];

/// Where the alias sits among the first six tokens of a line.
///
/// The three cases are mutually exclusive by construction; see
/// [`AliasPlacement::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasPlacement {
    /// `alias,offset,consonant,cutoff,preutter,overlap`
    AliasFirst,
    /// `offset,consonant,cutoff,preutter,overlap,alias`
    AliasLast,
    /// Neither pattern matched. The first five tokens are the numeric fields,
    /// the alias is empty and the sixth token is dropped.
    Ambiguous,
}

impl AliasPlacement {
    /// Classifies a six-token window.
    ///
    /// `AliasFirst` when only the first token is non-numeric, `AliasLast`
    /// when only the last one is, `Ambiguous` otherwise. The empty string
    /// counts as non-numeric, so `=,0,100,200,50,10` is `AliasFirst` with an
    /// empty alias.
    #[must_use]
    pub fn classify(window: &[&str; ALIAS_WINDOW]) -> Self {
        let numeric = window.map(is_number);
        if !numeric[0] && numeric[1..].iter().all(|&n| n) {
            AliasPlacement::AliasFirst
        } else if !numeric[FIELD_COUNT] && numeric[..FIELD_COUNT].iter().all(|&n| n) {
            AliasPlacement::AliasLast
        } else {
            AliasPlacement::Ambiguous
        }
    }

    /// Splits a window into `(alias, numeric tokens, dropped token)`.
    fn split<'w, 'a>(
        self,
        window: &'w [&'a str; ALIAS_WINDOW],
    ) -> (&'a str, &'w [&'a str], Option<&'a str>) {
        match self {
            AliasPlacement::AliasFirst => (window[0], &window[1..], None),
            AliasPlacement::AliasLast => (window[FIELD_COUNT], &window[..FIELD_COUNT], None),
            AliasPlacement::Ambiguous => ("", &window[..FIELD_COUNT], Some(window[FIELD_COUNT])),
        }
    }
}

/// Why a line was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The line has no `=`.
    MissingSeparator,
    /// Nothing precedes the `=`.
    EmptyFilename,
    /// Fewer than five comma-separated tokens follow the `=`.
    TooFewFields {
        /// Number of tokens found.
        found: usize,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingSeparator => write!(f, "missing '=' separator"),
            SkipReason::EmptyFilename => write!(f, "empty filename"),
            SkipReason::TooFewFields { found } => {
                write!(f, "expected at least {} fields, found {}", FIELD_COUNT, found)
            }
        }
    }
}

/// A line that produced an entry, with what the parser had to do to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// The parsed entry.
    pub entry: OtoEntry,
    /// The alias placement applied; `None` for lines with exactly five tokens.
    pub placement: Option<AliasPlacement>,
    /// Numeric fields whose token did not parse and were set to 0.
    pub defaulted: Vec<&'static str>,
    /// Tokens that were not used (beyond the sixth, or the sixth in the
    /// ambiguous case).
    pub discarded: Vec<String>,
}

/// Outcome of parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line or `#` comment.
    Ignored,
    /// Malformed line, dropped.
    Skipped(SkipReason),
    /// Line produced an entry.
    Parsed(ParsedLine),
}

/// Returns true if the token parses as a floating-point literal.
///
/// `nan` and `inf` count as numbers; the empty string does not.
#[must_use]
pub fn is_number(token: &str) -> bool {
    token.parse::<f64>().is_ok()
}

/// Parses a numeric token into whole milliseconds.
///
/// Rounds to nearest with ties to even (`10.5` becomes 10, `11.5` becomes
/// 12). Returns `None` if the token is not a number or is not finite.
#[must_use]
pub fn parse_millis(token: &str) -> Option<i64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value.round_ties_even() as i64)
}

/// Parses a single line.
///
/// # Examples
///
/// ```
/// use oto_file::oto::reader::{parse_line, AliasPlacement, LineOutcome};
///
/// let LineOutcome::Parsed(parsed) = parse_line("a.wav=10,20,30,40,50,alias_y") else {
///     panic!("line should parse");
/// };
/// assert_eq!(parsed.entry.alias, "alias_y");
/// assert_eq!(parsed.entry.overlap, 50);
/// assert_eq!(parsed.placement, Some(AliasPlacement::AliasLast));
/// ```
pub fn parse_line(raw: &str) -> LineOutcome {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return LineOutcome::Ignored;
    }

    let Some((left, right)) = line.split_once('=') else {
        return LineOutcome::Skipped(SkipReason::MissingSeparator);
    };

    let filename = left.trim();
    if filename.is_empty() {
        return LineOutcome::Skipped(SkipReason::EmptyFilename);
    }

    let parts: Vec<&str> = right.split(',').map(str::trim).collect();
    if parts.len() < FIELD_COUNT {
        return LineOutcome::Skipped(SkipReason::TooFewFields { found: parts.len() });
    }

    let window: Option<&[&str; ALIAS_WINDOW]> = parts
        .get(..ALIAS_WINDOW)
        .and_then(|head| head.try_into().ok());

    let mut discarded = Vec::new();
    let (alias, numeric, placement) = match window {
        Some(window) => {
            let placement = AliasPlacement::classify(window);
            let (alias, numeric, dropped) = placement.split(window);
            discarded.extend(dropped.map(str::to_string));
            (alias, numeric, Some(placement))
        }
        None => ("", &parts[..FIELD_COUNT], None),
    };
    if let Some(extra) = parts.get(ALIAS_WINDOW..) {
        discarded.extend(extra.iter().map(|token| token.to_string()));
    }

    let mut defaulted = Vec::new();
    let mut values = [0i64; FIELD_COUNT];
    for ((value, token), name) in values.iter_mut().zip(numeric).zip(FIELD_NAMES) {
        match parse_millis(token) {
            Some(millis) => *value = millis,
            None => defaulted.push(name),
        }
    }
    let [offset, consonant, cutoff, preutter, overlap] = values;

    LineOutcome::Parsed(ParsedLine {
        entry: OtoEntry::new(filename, alias, offset, consonant, cutoff, preutter, overlap),
        placement,
        defaulted,
        discarded,
    })
}

/// Splits text into lines with universal-newline semantics.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().flat_map(|line| line.split('\r'))
}

/// Parses decoded oto text into entries, in source order.
///
/// Blank lines, comments and malformed lines are dropped.
pub fn parse_text(text: &str) -> Vec<OtoEntry> {
    let mut entries = Vec::new();
    for (index, line) in split_lines(text).enumerate() {
        match parse_line(line) {
            LineOutcome::Parsed(parsed) => entries.push(parsed.entry),
            LineOutcome::Skipped(reason) => {
                debug!(line = index + 1, %reason, "skipping malformed oto line");
            }
            LineOutcome::Ignored => {}
        }
    }
    entries
}

/// Reads a file and decodes it strictly with an explicit encoding label.
///
/// # Errors
///
/// - [`OtoError::NotFound`] if the file does not exist
/// - [`OtoError::Io`] for other read failures
/// - [`OtoError::UnsupportedEncoding`] if the label is unknown
/// - [`OtoError::Decode`] if the content is not valid in that encoding
pub fn read_text(path: &Path, encoding: &str) -> Result<String, OtoError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => OtoError::NotFound(path.to_path_buf()),
        _ => OtoError::Io(e),
    })?;

    let text = decode_strict(&bytes, encoding)?.ok_or_else(|| OtoError::Decode {
        path: path.to_path_buf(),
        encoding: encoding.to_string(),
    })?;
    Ok(text.into_owned())
}

/// Reads and parses an oto file with an explicit encoding label.
///
/// # Errors
///
/// See [`read_text`]. Malformed lines never cause an error.
pub fn read_entries(path: &Path, encoding: &str) -> Result<Vec<OtoEntry>, OtoError> {
    let text = read_text(path, encoding)?;
    Ok(parse_text(&text))
}
