//! Oto Validation Module
//!
//! Reports what the loader would silently do to a file: which lines it
//! drops, which numeric tokens it turns into 0 and which tokens it ignores.
//! Useful before trusting a hand-edited `oto.ini`.
//!
//! # Overview
//!
//! The validator runs every line through the same
//! [`parse_line`](crate::oto::reader::parse_line) the loader uses, so the
//! report always matches load behavior. Findings are split into:
//! - **errors**: lines the loader drops entirely
//! - **warnings**: lines that load, but not exactly as written
//!
//! # Example
//!
//! ```rust,ignore
//! use oto_file::validator::OtoValidator;
//! use std::path::Path;
//!
//! let validator = OtoValidator::new(None);
//! let stats = validator.validate(Path::new("oto.ini"))?;
//!
//! println!("Entries: {}", stats.entries);
//! println!("Skipped lines: {}", stats.skipped_lines);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::OtoError;
use crate::oto::encoding::{detect_encoding, is_auto};
use crate::oto::reader::{parse_line, read_text, split_lines, LineOutcome, SkipReason};

/// One finding about one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineIssue {
    /// The line was dropped by the loader.
    Skipped(SkipReason),

    /// Numeric tokens that did not parse and were loaded as 0.
    DefaultedFields {
        /// Names of the affected fields, in wire order.
        fields: Vec<&'static str>,
    },

    /// Tokens the loader ignored.
    ///
    /// Either tokens past the sixth, or the sixth token of a line where the
    /// alias position could not be determined.
    DiscardedTokens {
        /// The ignored tokens, trimmed.
        tokens: Vec<String>,
    },

    /// A non-empty alias already used by an earlier line.
    ///
    /// Consumers resolve aliases first-match, so the later entry is
    /// unreachable by alias.
    DuplicateAlias {
        /// The repeated alias.
        alias: String,
        /// Line number of the first occurrence.
        first_line: u64,
    },
}

impl LineIssue {
    /// Returns true for issues that drop the line.
    pub fn is_error(&self) -> bool {
        matches!(self, LineIssue::Skipped(_))
    }
}

impl fmt::Display for LineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineIssue::Skipped(reason) => write!(f, "skipped: {}", reason),
            LineIssue::DefaultedFields { fields } => {
                write!(f, "non-numeric {} loaded as 0", fields.join(", "))
            }
            LineIssue::DiscardedTokens { tokens } => {
                write!(f, "ignored tokens: {}", tokens.join(", "))
            }
            LineIssue::DuplicateAlias { alias, first_line } => {
                write!(f, "alias \"{}\" already defined on line {}", alias, first_line)
            }
        }
    }
}

/// An issue together with the 1-based line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    /// Line number in the file, starting at 1.
    pub line_number: u64,
    /// The finding.
    pub issue: LineIssue,
}

impl fmt::Display for LineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = if self.issue.is_error() { "error" } else { "warning" };
        write!(f, "Line {}: {}: {}", self.line_number, severity, self.issue)
    }
}

/// Statistics collected during validation.
#[derive(Debug, Default, Clone)]
pub struct ValidationStats {
    /// Encoding the file was read with.
    pub encoding: String,

    /// Total number of lines in the file.
    pub total_lines: u64,

    /// Lines that produced an entry.
    pub entries: u64,

    /// Blank and comment lines.
    pub ignored_lines: u64,

    /// Lines dropped as malformed.
    pub skipped_lines: u64,

    /// Entries with an alias.
    pub aliased_entries: u64,

    /// All findings, in line order.
    pub issues: Vec<LineReport>,
}

impl ValidationStats {
    /// Creates empty statistics for a file read in `encoding`.
    pub fn new(encoding: impl Into<String>) -> Self {
        Self {
            encoding: encoding.into(),
            ..Self::default()
        }
    }

    /// Returns true if no line was dropped.
    pub fn is_valid(&self) -> bool {
        self.skipped_lines == 0
    }

    /// Returns true if there are no findings at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of warnings (findings that do not drop the line).
    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|r| !r.issue.is_error()).count()
    }

    fn push(&mut self, line_number: u64, issue: LineIssue) {
        self.issues.push(LineReport { line_number, issue });
    }
}

impl fmt::Display for ValidationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Oto Validation Report")?;
        writeln!(f, "=====================")?;
        writeln!(
            f,
            "Status: {}",
            if self.is_valid() { "PASSED" } else { "FAILED" }
        )?;
        writeln!(f)?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Encoding:          {:>10}", self.encoding)?;
        writeln!(f, "  Total lines:       {:>10}", self.total_lines)?;
        writeln!(f, "  Entries:           {:>10}", self.entries)?;
        writeln!(f, "  Aliased entries:   {:>10}", self.aliased_entries)?;
        writeln!(f, "  Ignored lines:     {:>10}", self.ignored_lines)?;
        writeln!(f, "  Skipped lines:     {:>10}", self.skipped_lines)?;
        writeln!(f, "  Warnings:          {:>10}", self.warning_count())?;

        if !self.issues.is_empty() {
            writeln!(f)?;
            writeln!(f, "Issues:")?;
            for report in &self.issues {
                writeln!(f, "  {}", report)?;
            }
        }

        Ok(())
    }
}

/// Validates oto files line by line.
#[derive(Debug, Clone, Default)]
pub struct OtoValidator {
    /// Explicit encoding label, or `None` to auto-detect.
    encoding: Option<String>,
}

impl OtoValidator {
    /// Creates a validator. `None`, `""` or `"auto"` auto-detects the
    /// encoding the same way [`OtoFile::load`](crate::oto::OtoFile::load) does.
    pub fn new(encoding: Option<&str>) -> Self {
        Self {
            encoding: encoding
                .filter(|label| !is_auto(Some(*label)))
                .map(|label| label.trim().to_string()),
        }
    }

    /// Validate a file and return statistics.
    ///
    /// Continues past every malformed line so the report is complete.
    ///
    /// # Errors
    ///
    /// Fails only where loading would: missing file, unknown encoding label,
    /// or a strict decode failure with an explicit encoding.
    pub fn validate(&self, path: &Path) -> Result<ValidationStats, OtoError> {
        if !path.exists() {
            return Err(OtoError::NotFound(path.to_path_buf()));
        }
        let encoding = match &self.encoding {
            Some(label) => label.clone(),
            None => detect_encoding(path).to_string(),
        };
        let text = read_text(path, &encoding)?;
        Ok(self.validate_text(&text, encoding))
    }

    /// Validate already decoded text.
    pub fn validate_text(&self, text: &str, encoding: impl Into<String>) -> ValidationStats {
        let mut stats = ValidationStats::new(encoding);
        let mut aliases: HashMap<String, u64> = HashMap::new();

        for (index, line) in split_lines(text).enumerate() {
            let line_number = index as u64 + 1;
            stats.total_lines += 1;

            match parse_line(line) {
                LineOutcome::Ignored => stats.ignored_lines += 1,
                LineOutcome::Skipped(reason) => {
                    stats.skipped_lines += 1;
                    stats.push(line_number, LineIssue::Skipped(reason));
                }
                LineOutcome::Parsed(parsed) => {
                    stats.entries += 1;
                    if !parsed.defaulted.is_empty() {
                        stats.push(
                            line_number,
                            LineIssue::DefaultedFields {
                                fields: parsed.defaulted,
                            },
                        );
                    }
                    if !parsed.discarded.is_empty() {
                        stats.push(
                            line_number,
                            LineIssue::DiscardedTokens {
                                tokens: parsed.discarded,
                            },
                        );
                    }
                    if parsed.entry.has_alias() {
                        stats.aliased_entries += 1;
                        if let Some(&first_line) = aliases.get(&parsed.entry.alias) {
                            stats.push(
                                line_number,
                                LineIssue::DuplicateAlias {
                                    alias: parsed.entry.alias,
                                    first_line,
                                },
                            );
                        } else {
                            aliases.insert(parsed.entry.alias, line_number);
                        }
                    }
                }
            }
        }

        stats
    }
}
