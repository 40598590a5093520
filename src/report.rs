//! Progress and result reporting.
//!
//! Engine operations never print. Every user-facing line goes through a
//! `MessageSink` supplied by the caller, so the same operation can feed a
//! terminal, a log panel, or a test that collects the lines.

use chrono::{DateTime, Local, TimeDelta};

pub trait MessageSink {
    fn emit(&mut self, message: &str);
}

impl<F> MessageSink for F
where
    F: FnMut(&str),
{
    fn emit(&mut self, message: &str) {
        self(message)
    }
}

impl MessageSink for Vec<String> {
    fn emit(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Wall-clock timer for an operation.
pub struct Stopwatch {
    started: DateTime<Local>,
}

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch {
            started: Local::now(),
        }
    }

    pub fn elapsed(&self) -> TimeDelta {
        Local::now() - self.started
    }
}

/// Counts gathered by a full verification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationReport {
    pub files_scanned: usize,
    pub md5_matched: usize,
    pub sha1_matched: usize,
    pub errors: usize,
}

impl OperationReport {
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Files processed: {}", self.files_scanned),
            format!("MD5 checksums processed: {}", self.md5_matched),
            format!("SHA-1 checksums processed: {}", self.sha1_matched),
            format!("Errors found: {}\n", self.errors),
        ]
    }
}

/// Formats a duration as e.g. `1 hours, 2 minutes and 3 seconds.`.
///
/// Each component is rounded on its own; hours and minutes are left out
/// while they are zero.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let millis = elapsed.num_milliseconds().max(0);
    let hours = millis / 3_600_000;
    let minutes = (millis / 60_000) % 60;
    let seconds = ((millis % 60_000) as f64 / 1000.0).round() as i64;

    if hours > 0 {
        format!("{hours} hours, {minutes} minutes and {seconds} seconds.")
    } else if minutes > 0 {
        format!("{minutes} minutes and {seconds} seconds.")
    } else {
        format!("{seconds} seconds.")
    }
}
