//! oto-file library
//!
//! Reads, validates and writes `oto.ini` files, the per-sample timing
//! tables of concatenative singing-synthesis voicebanks. It includes modules
//! for the oto format itself, line-level validation reports, and the CLI
//! argument definitions used by the `oto-file` binary.

pub mod cli;
pub mod error;
pub mod oto;
pub mod validator;
