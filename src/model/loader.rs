use std::fs;
use std::path::{Path, PathBuf};

use dicom::object::{DefaultDicomObject, OpenFileOptions};
use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use super::series::Series;
use super::series_set::describe;
use super::slice::Slice;
use crate::tags;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}: failed to open DICOM file ({message})", .path.display())]
    Open { path: PathBuf, message: String },
}

/// One enumerated file: `path` is what gets opened, `name` is what gets
/// recorded on its slice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileRef {
    pub path: PathBuf,
    pub name: PathBuf,
}

/// Regular files under `root`, sorted by path. Without `with_path` the
/// recorded names are relative to `root`.
pub fn list_files(root: &Path, with_path: bool, recurse: bool) -> Vec<FileRef> {
    let mut walker = WalkDir::new(root).min_depth(1);
    if !recurse {
        walker = walker.max_depth(1);
    }

    let mut files: Vec<FileRef> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("{}: {err}", root.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let path = entry.into_path();
            let name = if with_path {
                path.clone()
            } else {
                path.strip_prefix(root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| path.clone())
            };
            FileRef { path, name }
        })
        .collect();
    files.sort();
    files
}

/// Opens one file as a tag store. Parsing stops before the pixel data.
pub fn open_tag_store(path: &Path) -> Result<DefaultDicomObject, LoadError> {
    log::trace!("Loading DICOM file: {}", path.display());
    OpenFileOptions::new()
        .read_until(tags::PIXEL_DATA)
        .open_file(path)
        .map_err(|err| LoadError::Open {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

/// Opens `file` once and fills its descriptors. `Ok(None)` means the file
/// was read but cannot be grouped.
pub fn describe_file(file: &FileRef) -> Result<Option<(Series, Slice)>, LoadError> {
    let object = open_tag_store(&file.path)?;
    let file_size = fs::metadata(&file.path).map(|meta| meta.len()).unwrap_or(0);
    Ok(describe(&object, file.name.clone()).map(|(series, mut slice)| {
        slice.file_size = file_size;
        (series, slice)
    }))
}

/// Describes every file on the rayon pool. Results keep the order of `files`.
pub fn describe_files(files: &[FileRef]) -> Vec<Result<Option<(Series, Slice)>, LoadError>> {
    files.par_iter().map(describe_file).collect()
}
