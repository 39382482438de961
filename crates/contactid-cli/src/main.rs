use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contactid_core::{CidError, Field, FramerConfig, ReplayReport, framer};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("CONTACTID_BUILD_COMMIT"),
    "\nbuilt from: ",
    env!("CONTACTID_BUILD_DATE"),
);

#[derive(Parser, Debug)]
#[command(name = "contactid")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Contact ID alarm receiver tools: replay serial captures and decode sentences.",
    long_about = None,
    after_help = "Examples:\n  contactid capture decode panel.log -o report.json\n  contactid capture decode panel.log --stdout --pretty\n  contactid sentence parse AL00123418162701000##"
)]
struct Cli {
    /// Log framing and decoding details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on raw serial captures.
    Capture {
        #[command(subcommand)]
        command: CaptureCommands,
    },
    /// Operations on single sentences.
    Sentence {
        #[command(subcommand)]
        command: SentenceCommands,
    },
}

#[derive(Subcommand, Debug)]
enum CaptureCommands {
    /// Replay a raw serial capture and generate a versioned JSON report.
    Decode {
        /// Path to a raw byte capture of the panel's serial output
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any sentence failed to frame or decode
        #[arg(long)]
        strict: bool,

        /// List framing and decoding errors after the replay
        #[arg(long)]
        list_errors: bool,

        /// Bytes pulled from the source per read
        #[arg(long, default_value_t = framer::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Longest sentence accepted before resynchronizing
        #[arg(long, default_value_t = framer::DEFAULT_MAX_SENTENCE_LEN)]
        max_sentence_len: usize,
    },
}

#[derive(Subcommand, Debug)]
enum SentenceCommands {
    /// Decode one sentence, e.g. AL00123418162701000##
    Parse {
        sentence: String,

        /// Print the decoded message as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let quiet = matches!(
        &cli.command,
        Commands::Capture {
            command: CaptureCommands::Decode { quiet: true, .. }
        }
    );
    init_tracing(cli.verbose, quiet);

    let result = match cli.command {
        Commands::Capture { command } => match command {
            CaptureCommands::Decode {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_errors,
                chunk_size,
                max_sentence_len,
            } => {
                let config = FramerConfig {
                    chunk_size,
                    // Captures are read whole; there is nothing to wait for.
                    poll_interval: Duration::ZERO,
                    max_sentence_len,
                };
                cmd_capture_decode(
                    &input,
                    report,
                    stdout,
                    pretty,
                    compact,
                    quiet,
                    strict,
                    list_errors,
                    config,
                )
            }
        },
        Commands::Sentence { command } => match command {
            SentenceCommands::Parse { sentence, json } => cmd_sentence_parse(&sentence, json),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else if quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::registry()
        .with(level)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_capture_decode(
    input: &Path,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_errors: bool,
    config: FramerConfig,
) -> Result<(), CliError> {
    validate_input_file(input)?;
    if let Err(err) = config.validate() {
        return Err(CliError::new(
            err.to_string(),
            Some(format!(
                "use --chunk-size >= 1 and --max-sentence-len >= {}",
                contactid_core::protocols::contact_id::layout::MIN_SENTENCE_LEN
            )),
        ));
    }

    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(input, report_path)?;
    }

    tracing::debug!(input = %input.display(), ?config, "replaying capture");
    let rep = contactid_core::replay_capture_file(input, config)
        .with_context(|| format!("capture replay failed: {}", input.display()))?;
    let json = serialize_report(&rep, pretty, compact)?;

    if let Some(report_path) = report.as_ref() {
        if let Some(parent) = report_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(report_path, json)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
    } else {
        print!("{}", json);
    }

    if list_errors && !quiet {
        print_errors(&rep);
    }
    if let Some(report_path) = report.as_ref() {
        if !quiet {
            eprintln!(
                "OK: {} events, {} errors -> {}",
                rep.summary.events_decoded,
                rep.errors.len(),
                report_path.display()
            );
        }
    }
    if strict && !rep.errors.is_empty() {
        return Err(CliError::new(
            "framing or decoding errors detected",
            Some("use --list-errors to inspect".to_string()),
        ));
    }
    Ok(())
}

fn cmd_sentence_parse(sentence: &str, json: bool) -> Result<(), CliError> {
    let message = contactid_core::parse_sentence(sentence.as_bytes()).map_err(|err| {
        CliError::new(format!("failed to decode sentence: {err}"), decode_hint(&err))
    })?;

    if json {
        let out = serde_json::to_string_pretty(&message).context("JSON serialization failed")?;
        println!("{}", out);
    } else {
        println!("{}", message);
    }
    Ok(())
}

fn decode_hint(err: &CidError) -> Option<String> {
    let hint = match err.field() {
        None => "expected AL[00]AAAAEEtCCCZZUUU## (terminator at offset 17 or 19)".to_string(),
        Some(field) => format!(
            "{} must be {} decimal digits",
            field,
            field_width(field)
        ),
    };
    Some(hint)
}

fn field_width(field: Field) -> usize {
    use contactid_core::protocols::contact_id::layout;

    let range = match field {
        Field::Account => layout::ACCOUNT_RANGE,
        Field::EventId => layout::EVENT_ID_RANGE,
        Field::EventType => layout::EVENT_TYPE_RANGE,
        Field::EventCode => layout::EVENT_CODE_RANGE,
        Field::AreaId => layout::AREA_ID_RANGE,
        Field::UserOrZone => layout::USER_OR_ZONE_RANGE,
    };
    range.len()
}

fn serialize_report(rep: &ReplayReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_errors(rep: &ReplayReport) {
    eprintln!("Replay errors:");
    for error in &rep.errors {
        match &error.sentence {
            Some(sentence) => eprintln!("  {}: {}", error.message, sentence),
            None => eprintln!("  {}", error.message),
        }
    }
}

fn ensure_distinct_output(input: &Path, report_path: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_dir = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent).ok(),
        _ => fs::canonicalize(".").ok(),
    };
    let (Some(report_dir), Some(file_name)) = (report_dir, report_path.file_name()) else {
        return Ok(());
    };
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a raw capture of the panel's serial output".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a raw capture of the panel's serial output".to_string()),
        ));
    }
    Ok(())
}
