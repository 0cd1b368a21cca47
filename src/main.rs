use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::{CommandFactory, Parser};
use csvquote::{Mode, QuoteConfig, QuoteError, Transcoder, copy, copy_paths};
use tracing_subscriber::EnvFilter;

/// Make quoted CSV/TSV safe for line- and field-oriented tools.
///
/// Inside quoted fields the delimiter becomes 0x1F and the record separator
/// becomes 0x1E. `-u` turns them back.
#[derive(Parser, Debug)]
#[command(name = "csvquote")]
#[command(override_usage = "csvquote [-hut] [-d DELIM] [-q QUOTE] [-r RECSEP] [FILE]...")]
#[command(disable_help_flag = true, disable_version_flag = true, args_override_self = true)]
struct Cli {
    /// Header mode (recognized, performs no transformation)
    #[arg(short = 'h', overrides_with = "restore")]
    header: bool,

    /// Restore sanitized input
    #[arg(short = 'u', overrides_with = "header")]
    restore: bool,

    /// Field delimiter, first byte of the operand
    #[arg(short = 'd', value_name = "DELIM", value_parser = byte_operand())]
    #[arg(allow_hyphen_values = true, overrides_with = "tab")]
    delimiter: Option<u8>,

    /// Use tab as the field delimiter
    #[arg(short = 't', overrides_with = "delimiter")]
    tab: bool,

    /// Quote character, first byte of the operand
    #[arg(short = 'q', value_name = "QUOTE", value_parser = byte_operand())]
    #[arg(allow_hyphen_values = true)]
    quote: Option<u8>,

    /// Record separator, first byte of the operand
    #[arg(short = 'r', value_name = "RECSEP", value_parser = byte_operand())]
    #[arg(allow_hyphen_values = true)]
    record_separator: Option<u8>,

    /// Input files, read in order as one stream (stdin if none)
    files: Vec<PathBuf>,
}

impl Cli {
    fn config(&self) -> Result<QuoteConfig, QuoteError> {
        let mode = if self.header {
            Mode::Header
        } else if self.restore {
            Mode::Restore
        } else {
            Mode::Sanitize
        };

        let mut config = QuoteConfig::default().with_mode(mode);
        if self.tab {
            config = config.with_delimiter(b'\t');
        } else if let Some(delimiter) = self.delimiter {
            config = config.with_delimiter(delimiter);
        }
        if let Some(quote) = self.quote {
            config = config.with_quote(quote);
        }
        if let Some(record_separator) = self.record_separator {
            config = config.with_record_separator(record_separator);
        }

        config.validate()?;
        Ok(config)
    }
}

/// First raw byte of the operand, any encoding. An empty operand selects NUL.
fn byte_operand() -> impl TypedValueParser<Value = u8> {
    OsStringValueParser::new().map(|s| s.as_encoded_bytes().first().copied().unwrap_or(0))
}

fn is_broken_pipe(e: &QuoteError) -> bool {
    matches!(e, QuoteError::Io(io) if io.kind() == io::ErrorKind::BrokenPipe)
}

fn run(cli: &Cli, config: QuoteConfig) -> csvquote::Result<u64> {
    let mut transcoder = Transcoder::new(config);
    let stdout = io::stdout().lock();

    if cli.files.is_empty() {
        copy(&mut transcoder, io::stdin().lock(), stdout)
    } else {
        copy_paths(&mut transcoder, &cli.files, stdout)
    }
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only transcoded bytes.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Not every clap error renders the usage line
            if !e.render().to_string().contains("Usage:") {
                eprintln!("{}", Cli::command().render_usage());
            }
            return ExitCode::FAILURE;
        }
    };

    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("csvquote: {}", e);
            eprintln!("{}", Cli::command().render_usage());
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, config) {
        Ok(written) => {
            tracing::debug!(written, "done");
            ExitCode::SUCCESS
        }
        Err(e) if is_broken_pipe(&e) => {
            // Reader went away downstream; nothing useful to report
            tracing::debug!("output closed early");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("csvquote: {}", e);
            ExitCode::FAILURE
        }
    }
}
