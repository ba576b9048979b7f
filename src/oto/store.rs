use std::path::Path;

use tracing::info;

use super::encoding::{detect_encoding, is_auto, resolve_encoding, DEFAULT_ENCODING};
use super::reader::read_entries;
use super::record::OtoEntry;
use super::writer::write_entries;
use crate::error::OtoError;

/// An in-memory oto file: an ordered list of entries plus the text encoding
/// last used to read or write it.
///
/// Entry order is meaningful to consumers (it decides lookup priority when
/// several entries share a filename or alias), so [`OtoFile::load`] keeps
/// source line order and [`OtoFile::save`] writes in vector order.
///
/// The store is not synchronized; share it behind a lock if several threads
/// load or save through it.
///
/// # Example
///
/// ```no_run
/// use oto_file::oto::{OtoEntry, OtoFile};
///
/// let mut oto = OtoFile::new();
/// oto.load("voice/oto.ini", None).unwrap();
/// oto.entries.push(OtoEntry::new("_a.wav", "- a", 100, 60, -300, 40, 10));
/// oto.save("voice/oto.ini", None).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtoFile {
    /// Entries in file order.
    pub entries: Vec<OtoEntry>,
    encoding_used: String,
}

impl Default for OtoFile {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            encoding_used: DEFAULT_ENCODING.to_string(),
        }
    }
}

impl OtoFile {
    /// Creates an empty store using UTF-8.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given entries.
    pub fn from_entries(entries: Vec<OtoEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Label of the encoding used by the last successful load or save.
    pub fn encoding_used(&self) -> &str {
        &self.encoding_used
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, OtoEntry> {
        self.entries.iter()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: OtoEntry) {
        self.entries.push(entry);
    }

    /// All entries for a sample filename, in order.
    pub fn find<'a>(&'a self, filename: &'a str) -> impl Iterator<Item = &'a OtoEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.filename == filename)
    }

    /// The first entry carrying `alias`.
    pub fn find_alias(&self, alias: &str) -> Option<&OtoEntry> {
        self.entries.iter().find(|entry| entry.alias == alias)
    }

    /// Loads entries from `path`, replacing the current contents.
    ///
    /// `encoding` of `None`, `""` or `"auto"` probes the candidate encodings
    /// (see [`super::encoding::detect_encoding`]); anything else must be a
    /// supported label and the file must decode strictly in it.
    ///
    /// On error the store is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`OtoError::NotFound`] if `path` does not exist
    /// - [`OtoError::UnsupportedEncoding`] for an unknown label
    /// - [`OtoError::Decode`] if the file is not valid in the explicit encoding
    /// - [`OtoError::Io`] for other read failures
    pub fn load(&mut self, path: impl AsRef<Path>, encoding: Option<&str>) -> Result<(), OtoError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OtoError::NotFound(path.to_path_buf()));
        }

        let encoding = match encoding {
            Some(label) if !is_auto(Some(label)) => label.trim().to_string(),
            _ => detect_encoding(path).to_string(),
        };

        let entries = read_entries(path, &encoding)?;
        info!(
            path = %path.display(),
            encoding = %encoding,
            entries = entries.len(),
            "loaded oto file"
        );

        self.entries = entries;
        self.encoding_used = encoding;
        Ok(())
    }

    /// Writes all entries to `path`, one line each.
    ///
    /// `encoding` of `None`, `""` or `"auto"` reuses [`Self::encoding_used`].
    /// Missing parent directories are created. On success the encoding
    /// written becomes the new `encoding_used`; entries are never modified.
    ///
    /// # Errors
    ///
    /// - [`OtoError::UnsupportedEncoding`] for an unknown or unwritable label
    /// - [`OtoError::Encode`] if an entry cannot be represented
    /// - [`OtoError::Io`] for filesystem failures
    pub fn save(&mut self, path: impl AsRef<Path>, encoding: Option<&str>) -> Result<(), OtoError> {
        let path = path.as_ref();
        let encoding = match encoding {
            Some(label) if !is_auto(Some(label)) => label.trim().to_string(),
            _ if self.encoding_used.is_empty() => DEFAULT_ENCODING.to_string(),
            _ => self.encoding_used.clone(),
        };
        resolve_encoding(&encoding)?;

        write_entries(path, &self.entries, &encoding)?;
        info!(
            path = %path.display(),
            encoding = %encoding,
            entries = self.entries.len(),
            "saved oto file"
        );

        self.encoding_used = encoding;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a OtoFile {
    type Item = &'a OtoEntry;
    type IntoIter = std::slice::Iter<'a, OtoEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
