mod help_text;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use help_text::{ROOT_LONG_ABOUT, VERIFY_LONG_ABOUT};
use std::path::PathBuf;

/// Store and later verify the checksums of files in a directory tree
#[derive(Parser, Debug)]
#[command(name = "bmchecksum", version, about, long_about = ROOT_LONG_ABOUT)]
pub struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug). Takes precedence over RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Set the log level explicitly. Takes precedence over RUST_LOG.
    #[arg(long, value_name = "LEVEL", global = true, conflicts_with = "verbose")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create checksums for all files that do not have one yet
    Create {
        /// Base directory to checksum
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Which checksums to create
        #[arg(long, value_enum, default_value_t = ModeArg::Both)]
        mode: ModeArg,
    },

    /// Verify file checksums below the base directory
    #[command(long_about = VERIFY_LONG_ABOUT)]
    Verify {
        /// Base directory to verify
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Verify file checksums in every direct subdirectory of the base directory
    VerifySubdirs {
        /// Directory whose subdirectories are verified
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Upgrade version 1.0 checksums to the current layout
    Upgrade {
        /// Base directory to upgrade
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// MD5 and SHA-1
    Both,
    /// MD5 only
    Md5,
    /// SHA-1 only
    Sha1,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
