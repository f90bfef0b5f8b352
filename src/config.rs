//! Command-line configuration.
//!
//! Options can also be set through the environment:
//!
//! - `DCMSORT_THREADS` - worker threads used to parse files (default: one per core)

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Directory scanned when none is given.
pub const DEFAULT_DIR: &str = ".";

/// Name of the per-series file list written by `export`.
pub const FILE_LIST_NAME: &str = "FileList.txt";

/// Groups DICOM files into series in a single pass and orders their slices.
#[derive(Parser, Debug, Clone)]
#[command(name = "dcmsort")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG still applies.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads parsing files.
    #[arg(long, env = "DCMSORT_THREADS", global = true)]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Recursively scan directories and print every series with its files.
    ///
    /// Full paths are printed when more than one directory is given.
    List {
        #[arg(default_value = DEFAULT_DIR)]
        dirs: Vec<PathBuf>,
    },

    /// Scan each directory (not recursively) and write one file list per
    /// series into a new subdirectory of it.
    Export {
        #[arg(default_value = DEFAULT_DIR)]
        dirs: Vec<PathBuf>,
    },
}

impl Config {
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        match self.verbose {
            0 => None,
            1 => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_defaults_to_current_directory() {
        let config = Config::parse_from(["dcmsort", "list"]);
        match &config.command {
            Command::List { dirs } => assert_eq!(*dirs, [PathBuf::from(DEFAULT_DIR)]),
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(config.log_level(), None);
    }

    #[test]
    fn export_takes_several_directories() {
        let config = Config::parse_from(["dcmsort", "-vv", "export", "a", "b"]);
        match &config.command {
            Command::Export { dirs } => assert_eq!(dirs.len(), 2),
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(config.log_level(), Some(log::LevelFilter::Trace));
    }
}
