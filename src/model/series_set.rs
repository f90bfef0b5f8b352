use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::loader;
use super::series::Series;
use super::series_key::SeriesKey;
use super::slice::Slice;
use crate::tag_store::TagStore;

/// Fills both descriptors of one file. `None` means the file cannot be
/// grouped: it has no instance UID, or neither a series nor a study UID.
pub fn describe<S: TagStore + ?Sized>(
    store: &S,
    file: impl Into<PathBuf>,
) -> Option<(Series, Slice)> {
    let slice = Slice::from_tags(store, file)?;
    let series = Series::from_tags(store)?;
    Some((series, slice))
}

/// Per-scan counts. Skips are never errors; callers decide whether to show them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files: usize,
    pub unreadable: usize,
    pub skipped: usize,
    pub duplicates: usize,
}

impl ScanSummary {
    pub fn stored(&self) -> usize {
        self.files
            .saturating_sub(self.unreadable)
            .saturating_sub(self.skipped)
            .saturating_sub(self.duplicates)
    }

    pub fn merge(&mut self, other: ScanSummary) {
        self.files += other.files;
        self.unreadable += other.unreadable;
        self.skipped += other.skipped;
        self.duplicates += other.duplicates;
    }
}

/// Series found so far, enumerated in presentation order.
///
/// Series live in an append-only arena. `order` holds arena indices in
/// presentation order, fixed when each series is created; `index` maps
/// identities to arena indices and is the only thing consulted when a new
/// file arrives.
#[derive(Debug, Default)]
pub struct SeriesSet {
    series: Vec<Series>,
    order: Vec<usize>,
    index: HashMap<SeriesKey, usize>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Series> + '_ {
        self.order.iter().map(move |&idx| &self.series[idx])
    }

    pub fn get(&self, key: &SeriesKey) -> Option<&Series> {
        self.index.get(key).map(|&idx| &self.series[idx])
    }

    /// Adds `slice` to the series identified by `series`, creating that
    /// series if no existing one matches. Returns `false` when an equal
    /// slice was already stored.
    pub fn insert(&mut self, series: Series, slice: Slice) -> bool {
        let Some(key) = series.key() else {
            self.create(series, slice);
            return true;
        };

        match self.index.get(&key) {
            Some(&idx) => self.series[idx].insert_slice(slice),
            None => {
                let idx = self.create(series, slice);
                self.index.insert(key, idx);
                true
            }
        }
    }

    /// Describes one file and inserts it. Returns `false` when the file is
    /// unusable or duplicates a stored slice.
    pub fn ingest<S: TagStore + ?Sized>(&mut self, store: &S, file: impl Into<PathBuf>) -> bool {
        match describe(store, file) {
            Some((series, slice)) => self.insert(series, slice),
            None => false,
        }
    }

    /// Reads every file under `dir` once and groups it.
    ///
    /// `with_path` records full paths on the slices instead of paths relative
    /// to `dir`. Files are parsed on the rayon pool; insertion happens on the
    /// calling thread in enumeration order.
    pub fn scan_directory(&mut self, dir: &Path, with_path: bool, recurse: bool) -> ScanSummary {
        let files = loader::list_files(dir, with_path, recurse);
        let described = loader::describe_files(&files);

        let mut summary = ScanSummary {
            files: files.len(),
            ..Default::default()
        };
        for (file, result) in files.iter().zip(described) {
            match result {
                Ok(Some((series, slice))) => {
                    if !self.insert(series, slice) {
                        log::debug!("{}: duplicate slice ignored", file.path.display());
                        summary.duplicates += 1;
                    }
                }
                Ok(None) => {
                    log::debug!("{}: no instance, series or study UID", file.path.display());
                    summary.skipped += 1;
                }
                Err(err) => {
                    log::warn!("{err}");
                    summary.unreadable += 1;
                }
            }
        }

        log::info!(
            "{}: {} files, {} stored, {} unreadable, {} skipped, {} series",
            dir.display(),
            summary.files,
            summary.stored(),
            summary.unreadable,
            summary.skipped,
            self.len()
        );
        summary
    }

    fn create(&mut self, mut series: Series, slice: Slice) -> usize {
        series.insert_slice(slice);
        let position = self
            .order
            .partition_point(|&idx| self.series[idx].precedes(&series));
        let idx = self.series.len();
        self.series.push(series);
        self.order.insert(position, idx);
        idx
    }
}

impl<'a> IntoIterator for &'a SeriesSet {
    type Item = &'a Series;
    type IntoIter = Box<dyn Iterator<Item = &'a Series> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
