use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use crate::config::{Command, Config, FILE_LIST_NAME};
use crate::model::SeriesSet;
use crate::utils::{series_list_dir_name, slice_counts};

const APP_TITLE: &str = "dcmsort";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("output: {0}")]
    Output(#[from] io::Error),
}

pub fn run() -> ExitCode {
    let config = Config::parse();
    init_logging(&config);

    if let Some(threads) = config.threads {
        if let Err(err) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            log::warn!("Unable to size the worker pool: {err}");
        }
    }

    let result = match &config.command {
        Command::List { dirs } => list(dirs, &mut io::stdout().lock()),
        Command::Export { dirs } => export(dirs, &mut io::stderr().lock()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{APP_TITLE}: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &Config) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.format_timestamp_secs();
    if let Some(level) = config.log_level() {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

/// Scans `dirs` recursively into one set and prints the series count, the
/// slice count of each series, then every series with its files.
pub fn list(dirs: &[PathBuf], out: &mut impl Write) -> Result<(), AppError> {
    let with_path = dirs.len() > 1;
    let mut set = SeriesSet::new();
    for dir in dirs {
        set.scan_directory(dir, with_path, true);
    }

    writeln!(out, "{}", set.len())?;
    writeln!(out, "{}", slice_counts(&set))?;
    for series in &set {
        writeln!(out, "SeriesInstanceUID={}", series.series_instance_uid)?;
        for slice in series.slices() {
            writeln!(out, "{}", slice.file.display())?;
        }
    }
    Ok(())
}

/// Scans each directory on its own and writes `FileList.txt` for every
/// series into a numbered subdirectory. Progress goes to `out`.
pub fn export(dirs: &[PathBuf], out: &mut impl Write) -> Result<(), AppError> {
    for dir in dirs {
        let mut set = SeriesSet::new();
        set.scan_directory(dir, false, false);

        writeln!(out, "{}", set.len())?;
        writeln!(out, "{}", slice_counts(&set))?;
        for (index, series) in (1_u64..).zip(&set) {
            let list_dir = dir.join(series_list_dir_name(index));
            fs::create_dir_all(&list_dir).map_err(|source| AppError::Write {
                path: list_dir.clone(),
                source,
            })?;
            let list_path = list_dir.join(FILE_LIST_NAME);
            writeln!(out, "{}", list_path.display())?;
            write_file_list(&list_path, series.slices().map(|slice| slice.file.as_path()))
                .map_err(|source| AppError::Write {
                    path: list_path.clone(),
                    source,
                })?;
        }
    }
    Ok(())
}

fn write_file_list<'a>(path: &Path, files: impl Iterator<Item = &'a Path>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for file in files {
        writeln!(writer, "{}", file.display())?;
    }
    writer.flush()
}
