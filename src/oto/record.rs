//! Oto entry type.
//!
//! Defines [`OtoEntry`], one line of an oto file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single oto entry: a sample filename, an optional alias and five timing
/// markers in milliseconds.
///
/// The markers are stored as-is; their meaning belongs to whatever synthesis
/// engine consumes the entries.
///
/// # Fields
///
/// * `filename` - The sample file, as written left of the first `=`
/// * `alias` - Free-text label; the empty string means "no alias"
/// * `offset` - Start of the usable region
/// * `consonant` - End of the fixed (non-stretched) region, relative to offset
/// * `cutoff` - End of the usable region (negative values are relative to offset)
/// * `preutter` - Pre-utterance marker
/// * `overlap` - Overlap with the previous note
///
/// # Example
///
/// ```
/// use oto_file::oto::OtoEntry;
///
/// let entry = OtoEntry::new("_ka.wav", "- ka", 120, 80, -200, 60, 20);
/// assert_eq!(entry.to_string(), "_ka.wav=- ka,120,80,-200,60,20");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OtoEntry {
    /// The sample filename (never empty for parsed entries).
    pub filename: String,

    /// Human-readable alias distinguishing entries that share a filename.
    pub alias: String,

    /// Offset marker in milliseconds.
    pub offset: i64,

    /// Consonant (fixed region) marker in milliseconds.
    pub consonant: i64,

    /// Cutoff marker in milliseconds.
    pub cutoff: i64,

    /// Pre-utterance marker in milliseconds.
    pub preutter: i64,

    /// Overlap marker in milliseconds.
    pub overlap: i64,
}

impl OtoEntry {
    /// Creates a new entry with the given values.
    pub fn new(
        filename: impl Into<String>,
        alias: impl Into<String>,
        offset: i64,
        consonant: i64,
        cutoff: i64,
        preutter: i64,
        overlap: i64,
    ) -> Self {
        Self {
            filename: filename.into(),
            alias: alias.into(),
            offset,
            consonant,
            cutoff,
            preutter,
            overlap,
        }
    }

    /// Returns true when the entry carries a non-empty alias.
    #[must_use]
    pub fn has_alias(&self) -> bool {
        !self.alias.is_empty()
    }
}

/// Renders the entry as one oto line, without the line terminator.
impl fmt::Display for OtoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={},{},{},{},{},{}",
            self.filename,
            self.alias,
            self.offset,
            self.consonant,
            self.cutoff,
            self.preutter,
            self.overlap
        )
    }
}
