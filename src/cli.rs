//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros.
//! This module defines the `Mode` enum for operation modes and the `Args` struct
//! containing all CLI arguments with validation logic.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Operation mode for the oto tool.
///
/// - **Dump**: Load a file and print its entries in normalized form
/// - **Validate**: Report lines the loader would drop or alter
/// - **Convert**: Load a file and write it back, optionally re-encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Print the parsed entries
    #[default]
    Dump,
    /// Check a file for malformed lines
    Validate,
    /// Rewrite a file in normalized form and a chosen encoding
    Convert,
}

/// Command-line arguments for the oto tool.
///
/// Use the `validate()` method after parsing to ensure argument combinations are valid.
///
/// # Example
///
/// ```rust,ignore
/// use clap::Parser;
/// use oto_file::cli::Args;
///
/// let args = Args::parse();
/// args.validate()?;
/// ```
#[derive(Parser, Debug)]
#[command(name = "oto-file")]
#[command(about = "Inspect, validate and convert oto.ini voicebank files")]
#[command(version)]
pub struct Args {
    /// Oto file to read
    #[arg(short = 'f', long)]
    pub file: PathBuf,

    /// Operation mode
    #[arg(long, value_enum, default_value_t = Mode::Dump)]
    pub mode: Mode,

    /// Input encoding label, or "auto" to detect (utf-8, cp932, mbcs)
    #[arg(long, default_value = "auto")]
    pub encoding: String,

    /// Output file path for convert mode
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output encoding label for convert mode ("auto" keeps the input encoding)
    #[arg(long, default_value = "auto")]
    pub output_encoding: String,

    /// Print entries as a JSON array (dump mode)
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Treat warnings as failures (validate mode)
    #[arg(long, default_value = "false")]
    pub strict: bool,
}

impl Args {
    /// Validate argument combinations.
    ///
    /// - `--output` is required for convert mode and only allowed there
    /// - `--output-encoding` other than "auto" is only allowed in convert mode
    /// - `--json` is only allowed in dump mode
    /// - `--strict` is only allowed in validate mode
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the argument combination is valid
    /// - `Err(String)` with a descriptive error message if validation fails
    pub fn validate(&self) -> Result<(), String> {
        match self.mode {
            Mode::Convert => {
                if self.output.is_none() {
                    return Err("--output is required for convert mode".to_string());
                }
            }
            Mode::Dump | Mode::Validate => {
                if self.output.is_some() {
                    return Err("--output can only be used with convert mode".to_string());
                }
                if !self.output_encoding.eq_ignore_ascii_case("auto") {
                    return Err("--output-encoding can only be used with convert mode".to_string());
                }
            }
        }

        if self.json && self.mode != Mode::Dump {
            return Err("--json can only be used with dump mode".to_string());
        }

        if self.strict && self.mode != Mode::Validate {
            return Err("--strict can only be used with validate mode".to_string());
        }

        Ok(())
    }
}
