pub mod geometry;
pub mod loader;
pub mod series;
pub mod series_key;
pub mod series_set;
pub mod slice;

pub use geometry::{Orientation, Vector3};
pub use loader::{FileRef, LoadError};
pub use series::Series;
pub use series_key::SeriesKey;
pub use series_set::{describe, ScanSummary, SeriesSet};
pub use slice::{Slice, SpacingKind};
