mod cli;

use bmchecksum::{
    Mode, Statistics, create_checksums, upgrade_legacy, verify_subdirectories, verify_tree,
};
use cli::{Cli, Command, LogLevel, ModeArg};
use std::fmt as stdfmt;
use std::io::{IsTerminal, stderr};
use std::path::Path;
use std::process::ExitCode;
use tracing::{Event, Level, Subscriber, error, info};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

struct ChecksumExitCode;

impl ChecksumExitCode {
    /// Exit code used when verification found at least one error.
    fn verification_failed() -> ExitCode {
        ExitCode::from(1)
    }

    /// Exit code used for other errors (I/O errors, invalid arguments, etc.).
    fn any_error() -> ExitCode {
        ExitCode::from(255)
    }
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Both => Mode::Both,
            ModeArg::Md5 => Mode::Md5Only,
            ModeArg::Sha1 => Mode::Sha1Only,
        }
    }
}

fn print_message(message: &str) {
    println!("{message}");
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_level);

    let result: anyhow::Result<ExitCode> = match cli.command {
        Command::Create { path, mode } => handle_create(&path, mode.into()),
        Command::Verify { path } => handle_verify(&path),
        Command::VerifySubdirs { path } => handle_verify_subdirs(&path),
        Command::Upgrade { path } => handle_upgrade(&path),
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(err) => {
            error!("{err}");
            ChecksumExitCode::any_error()
        }
    }
}

fn handle_create(path: &Path, mode: Mode) -> anyhow::Result<ExitCode> {
    let result = create_checksums(path, mode, &mut print_message)?;
    info!("Wrote {} checksum files", result.sidecars_written.len());
    Ok(ExitCode::SUCCESS)
}

fn handle_verify(path: &Path) -> anyhow::Result<ExitCode> {
    let outcome = verify_tree(path, Statistics::Emit, &mut print_message)?;

    if outcome.error_count() > 0 {
        error!(
            "Verification failed: {} error(s) found",
            outcome.error_count()
        );
        return Ok(ChecksumExitCode::verification_failed());
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_verify_subdirs(path: &Path) -> anyhow::Result<ExitCode> {
    let outcomes = verify_subdirectories(path, &mut print_message)?;

    let failed: Vec<_> = outcomes
        .iter()
        .filter(|o| o.outcome.error_count() > 0)
        .collect();

    if failed.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    for subdirectory in &failed {
        error!(
            "Verification failed in {}: {} error(s) found",
            subdirectory.name.display(),
            subdirectory.outcome.error_count()
        );
    }
    Ok(ChecksumExitCode::verification_failed())
}

fn handle_upgrade(path: &Path) -> anyhow::Result<ExitCode> {
    upgrade_legacy(path, &mut print_message)?;
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: u8, log_level: Option<LogLevel>) {
    let stderr_is_terminal = stderr().is_terminal();
    let formatter = EmojiFormatter { stderr_is_terminal };

    let explicit_level = match (log_level, verbose) {
        (Some(level), _) => Some(level.as_filter()),
        (None, 0) => None,
        (None, 1) => Some("info"),
        (None, _) => Some("debug"),
    };

    let filter = match explicit_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let fmt_layer = tracing_fmt::layer()
        .event_format(formatter)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

struct EmojiFormatter {
    stderr_is_terminal: bool,
}

impl<S, N> FormatEvent<S, N> for EmojiFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> stdfmt::Result {
        if self.stderr_is_terminal {
            match *event.metadata().level() {
                Level::DEBUG => write!(writer, "🔍 ")?,
                Level::INFO => write!(writer, "ℹ️ ")?,
                Level::WARN => write!(writer, "⚠️  ")?,
                Level::ERROR => write!(writer, "❌️ ")?,
                _ => {}
            }
        } else {
            match *event.metadata().level() {
                Level::DEBUG => writer.write_str("DEBUG: ")?,
                Level::INFO => writer.write_str("INFO: ")?,
                Level::WARN => writer.write_str("WARN: ")?,
                Level::ERROR => writer.write_str("ERROR: ")?,
                _ => {}
            }
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
