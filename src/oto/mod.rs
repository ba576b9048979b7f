//! Oto file handling.
//!
//! Reads and writes `oto.ini` files: one line per sample, mapping a sample
//! filename to an optional alias and five timing markers in milliseconds.
//!
//! # File Format
//!
//! ```text
//! # comments and blank lines are ignored
//! _ka.wav=- ka,120,80,-200,60,20
//! _ka.wav=120,80,-200,60,20,a ka
//! _sa.wav=40,90,-150,70,30
//! ```
//!
//! The alias may precede or follow the numeric fields, or be absent; see
//! [`reader::AliasPlacement`]. Files are written with the alias first.
//!
//! # Example
//!
//! ```no_run
//! use oto_file::oto::OtoFile;
//!
//! let mut oto = OtoFile::new();
//! oto.load("voice/oto.ini", None).unwrap();
//! for entry in &oto {
//!     println!("{} -> {}", entry.alias, entry.filename);
//! }
//! ```

pub mod encoding;
pub mod reader;
pub mod record;
pub mod store;
pub mod writer;

pub use encoding::{detect_encoding, AUTO_ENCODING, CANDIDATE_ENCODINGS, DEFAULT_ENCODING};
pub use reader::{parse_line, parse_text, AliasPlacement, LineOutcome, ParsedLine, SkipReason};
pub use record::OtoEntry;
pub use store::OtoFile;
