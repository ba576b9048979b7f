//! oto-file - Inspect, validate and convert oto.ini files
//!
//! This CLI tool provides three operational modes:
//! - **Dump**: Load a file and print its entries (plain lines or JSON)
//! - **Validate**: Report lines the loader would drop or alter
//! - **Convert**: Load a file and write it back, optionally in another encoding
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 3 | File, encoding or validation error |
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use oto_file::cli::{Args, Mode};
use oto_file::error::OtoError;
use oto_file::oto::OtoFile;
use oto_file::validator::OtoValidator;

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for file I/O and encoding errors
const EXIT_IO_ERROR: u8 = 3;
/// Exit code for validation failure (same as IO error)
const EXIT_VALIDATION_FAILURE: u8 = 3;

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: Configuration error: {}", e);
        eprintln!("  Hint: Use --help for usage information");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    match run(&args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<(), OtoError> {
    match args.mode {
        Mode::Dump => run_dump_mode(args),
        Mode::Validate => run_validate_mode(args),
        Mode::Convert => run_convert_mode(args),
    }
}

/// Run in dump mode.
///
/// Prints every entry in normalized form, or a JSON array with `--json`.
fn run_dump_mode(args: &Args) -> Result<(), OtoError> {
    let mut oto = OtoFile::new();
    oto.load(&args.file, Some(args.encoding.as_str()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &oto.entries)?;
        writeln!(out)?;
    } else {
        for entry in &oto {
            writeln!(out, "{}", entry)?;
        }
    }

    eprintln!(
        "{} entries read from {:?} ({})",
        oto.len(),
        args.file,
        oto.encoding_used()
    );
    Ok(())
}

/// Run in validate mode.
///
/// Prints the validation report. Fails when lines were skipped, or with
/// `--strict` when there are any findings.
fn run_validate_mode(args: &Args) -> Result<(), OtoError> {
    eprintln!("Validating file: {:?}", args.file);

    let validator = OtoValidator::new(Some(args.encoding.as_str()));
    let stats = validator.validate(&args.file)?;

    println!("{}", stats);

    if !stats.is_valid() {
        eprintln!(
            "Validation failed. {} of {} lines were skipped.",
            stats.skipped_lines, stats.total_lines
        );
        return Err(OtoError::ValidationFailed(format!(
            "{} malformed lines found",
            stats.skipped_lines
        )));
    }

    if args.strict && !stats.is_clean() {
        eprintln!(
            "Validation failed. {} warnings in strict mode.",
            stats.warning_count()
        );
        return Err(OtoError::ValidationFailed(format!(
            "{} warnings found",
            stats.warning_count()
        )));
    }

    eprintln!("Validation complete. {} entries are valid.", stats.entries);
    Ok(())
}

/// Run in convert mode.
///
/// Loads the input and saves every entry to `--output`. Comments, blank lines
/// and malformed lines are not carried over.
fn run_convert_mode(args: &Args) -> Result<(), OtoError> {
    let output = args
        .output
        .as_ref()
        .ok_or_else(|| OtoError::InvalidArgument("--output is required".to_string()))?;

    let mut oto = OtoFile::new();
    oto.load(&args.file, Some(args.encoding.as_str()))?;
    let input_encoding = oto.encoding_used().to_string();

    oto.save(output, Some(args.output_encoding.as_str()))?;

    eprintln!(
        "Converted {} entries: {:?} ({}) -> {:?} ({})",
        oto.len(),
        args.file,
        input_encoding,
        output,
        oto.encoding_used()
    );
    Ok(())
}

fn error_to_exit_code(error: &OtoError) -> u8 {
    match error {
        OtoError::InvalidArgument(_) => EXIT_CONFIG_ERROR,
        OtoError::UnsupportedEncoding(_) => EXIT_CONFIG_ERROR,
        OtoError::ValidationFailed(_) => EXIT_VALIDATION_FAILURE,
        OtoError::NotFound(_) => EXIT_IO_ERROR,
        OtoError::Io(_) => EXIT_IO_ERROR,
        OtoError::Decode { .. } => EXIT_IO_ERROR,
        OtoError::Encode { .. } => EXIT_IO_ERROR,
        OtoError::Json(_) => EXIT_IO_ERROR,
    }
}
