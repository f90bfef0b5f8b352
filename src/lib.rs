//! Single-pass DICOM series sorter.
//!
//! Every file is opened exactly once. Its metadata is reduced to a
//! [`Slice`] and a [`Series`] descriptor, the series is found by identity
//! (or created) in a [`SeriesSet`], and the slice is placed inside it by
//! position along the image normal, falling back through slice location,
//! acquisition/temporal/instance numbers and finally UID and file name.
//!
//! ```no_run
//! use dcmsort::SeriesSet;
//! use std::path::Path;
//!
//! let mut set = SeriesSet::new();
//! set.scan_directory(Path::new("dicom"), false, true);
//! for series in &set {
//!     println!("{} ({} slices)", series.series_instance_uid, series.len());
//! }
//! ```

pub mod app;
pub mod config;
pub mod model;
pub mod tag_store;
pub mod tags;
pub mod utils;

pub use model::{
    describe, FileRef, LoadError, Orientation, ScanSummary, Series, SeriesKey, SeriesSet, Slice,
    SpacingKind, Vector3,
};
pub use tag_store::{Region, Search, Sources, TagError, TagKind, TagStore, TagValue};
