use std::cmp::Ordering;
use std::path::PathBuf;

use super::geometry::{squared_distance, Orientation, Vector3};
use crate::tag_store::{Sources, TagStore};
use crate::tags;

/// Slices closer than this along the mean normal are geometrically indistinguishable.
pub const POSITION_TOLERANCE: f64 = 0.0001;
pub const LOCATION_TOLERANCE: f64 = 0.0001;
pub const MAX_TILT_DIFFERENCE: f64 = 10.0;
/// Maximum squared axis difference for two planes to count as parallel.
pub const ORIENTATION_TOLERANCE: f64 = 0.000_000_01;
/// Maximum squared spacing difference, relative to the squared spacing.
pub const SPACING_TOLERANCE: f64 = 0.1;

/// Where PixelSpacing was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpacingKind {
    InPatient,
    AtDetector,
    #[default]
    Unknown,
}

/// Attributes of one file needed to place it inside its series.
///
/// Absent integers sort after every present value and an absent slice
/// location sorts as `f64::MAX`.
#[derive(Debug, Clone)]
pub struct Slice {
    pub acquisition_number: Option<i64>,
    pub temporal_position: Option<i64>,
    pub instance_number: Option<i64>,
    pub file_size: u64,
    /// R or L for paired body parts, U unpaired, B both.
    pub laterality: String,
    /// CC, ML, MLO, ...
    pub view_position: String,
    pub sop_instance_uid: String,
    pub file: PathBuf,
    pub position: Option<Vector3>,
    pub orientation: Option<Orientation>,
    pub gantry_tilt: f64,
    pub slice_location: Option<f64>,
    pub pixel_spacing: [f64; 2],
    pub spacing_kind: SpacingKind,
    pub rows: i64,
    pub columns: i64,
    pub number_of_frames: i64,
}

impl Slice {
    /// A slice with every optional attribute absent.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            acquisition_number: None,
            temporal_position: None,
            instance_number: None,
            file_size: 0,
            laterality: String::new(),
            view_position: String::new(),
            sop_instance_uid: String::new(),
            file: file.into(),
            position: None,
            orientation: None,
            gantry_tilt: 0.0,
            slice_location: None,
            pixel_spacing: [1.0, 1.0],
            spacing_kind: SpacingKind::Unknown,
            rows: 0,
            columns: 0,
            number_of_frames: 1,
        }
    }

    /// Reads the slice attributes of one file. Returns `None` when no
    /// instance UID can be found, which makes the file unusable.
    pub fn from_tags<S: TagStore + ?Sized>(store: &S, file: impl Into<PathBuf>) -> Option<Self> {
        let item = Sources::dataset();
        let sop_instance_uid = [
            tags::SOP_INSTANCE_UID,
            tags::REFERENCED_SOP_INSTANCE_UID_IN_FILE,
            tags::MEDIA_STORAGE_SOP_INSTANCE_UID,
        ]
        .into_iter()
        .map(|tag| store.tag_string(tag, item))
        .find(|uid| !uid.is_empty())?;

        let mut slice = Slice::new(file);
        slice.sop_instance_uid = sop_instance_uid;

        slice.laterality = store.tag_string(tags::IMAGE_LATERALITY, item);
        if slice.laterality.is_empty() {
            slice.laterality = store.tag_string(tags::LATERALITY, item);
        }
        slice.view_position = store.tag_string(tags::VIEW_POSITION, item);
        if slice.view_position.is_empty() {
            slice.view_position = store
                .sequence_item_lookup(tags::VIEW_CODE_SEQUENCE, tags::CODE_VALUE)
                .and_then(|code| view_from_code(&code))
                .unwrap_or_default()
                .to_string();
        }

        let nested = item.nested();
        slice.instance_number = store.tag_integer(tags::INSTANCE_NUMBER, nested);
        slice.acquisition_number = store.tag_integer(tags::ACQUISITION_NUMBER, nested);
        slice.temporal_position = store.tag_integer(tags::TEMPORAL_POSITION_INDEX, nested);
        slice.position = store
            .tag_vector(tags::IMAGE_POSITION_PATIENT, 3, nested)
            .and_then(|values| Vector3::from_slice(&values));
        slice.orientation = store.tag_orientation(tags::IMAGE_ORIENTATION_PATIENT, nested);
        if let Some(tilt) = store.tag_real(tags::GANTRY_DETECTOR_TILT, nested) {
            slice.gantry_tilt = tilt;
        }
        slice.slice_location = store.tag_real(tags::SLICE_LOCATION, nested);
        slice.rows = store.tag_integer(tags::ROWS, nested).unwrap_or(0);
        slice.columns = store.tag_integer(tags::COLUMNS, nested).unwrap_or(0);
        slice.number_of_frames = store.tag_integer(tags::NUMBER_OF_FRAMES, nested).unwrap_or(1);

        if let Some(spacing) = store.tag_vector(tags::PIXEL_SPACING, 2, nested) {
            slice.pixel_spacing = [spacing[0], spacing[1]];
            slice.spacing_kind = SpacingKind::InPatient;
        } else if let Some(spacing) = store.tag_vector(tags::IMAGER_PIXEL_SPACING, 2, nested) {
            slice.pixel_spacing = [spacing[0], spacing[1]];
            slice.spacing_kind = SpacingKind::AtDetector;
        }

        Some(slice)
    }

    /// Both ImagePositionPatient and ImageOrientationPatient are present.
    pub fn has_geometry(&self) -> bool {
        self.position.is_some() && self.orientation.is_some()
    }

    /// A projection radiograph of a paired organ, e.g. one mammography view.
    pub fn is_paired_body_part(&self) -> bool {
        self.position.is_none() && !self.laterality.is_empty()
    }

    pub fn normal(&self) -> Option<Vector3> {
        self.orientation.map(|orientation| orientation.normal())
    }

    /// Tilt, spacing and plane orientation agree closely enough for positions
    /// to be compared along the normal.
    fn same_acquisition_context(&self, other: &Slice) -> bool {
        let (Some(a), Some(b)) = (self.orientation, other.orientation) else {
            return false;
        };
        let reference = squared_distance(&self.pixel_spacing, &[0.0, 0.0])
            .min(squared_distance(&other.pixel_spacing, &[0.0, 0.0]));

        (self.gantry_tilt - other.gantry_tilt).abs() <= MAX_TILT_DIFFERENCE
            && self.spacing_kind == other.spacing_kind
            && squared_distance(&self.pixel_spacing, &other.pixel_spacing)
                <= SPACING_TOLERANCE * reference
            && (a.row - b.row).norm_squared() <= ORIENTATION_TOLERANCE
            && (a.column - b.column).norm_squared() <= ORIENTATION_TOLERANCE
    }

    /// Signed distance from this slice to `other` along the sum of both normals.
    fn displacement_along_normal(&self, other: &Slice) -> Option<f64> {
        let normal = self.normal()? + other.normal()?;
        let displacement = other.position? - self.position?;
        Some(normal.dot(&displacement))
    }

    /// Strict ordering of slices within a series.
    ///
    /// Nothing here can be relied on to be present, so the tests run from
    /// the most meaningful signal (position along the normal) down to the
    /// file name, which always exists.
    pub fn precedes(&self, other: &Slice) -> bool {
        if self.has_geometry() != other.has_geometry() {
            return !self.has_geometry();
        }

        if self.has_geometry() && self.same_acquisition_context(other) {
            if let Some(distance) = self.displacement_along_normal(other) {
                if distance.abs() > POSITION_TOLERANCE {
                    return distance > 0.0;
                }
            }
        }

        if self.position.is_none()
            && other.position.is_none()
            && !self.laterality.is_empty()
            && !other.laterality.is_empty()
        {
            if let Some(order) = paired_view_order(self, other) {
                return order == Ordering::Less;
            }
        }

        let (location, other_location) = (self.location_key(), other.location_key());
        if (location - other_location).abs() > LOCATION_TOLERANCE {
            return location < other_location;
        }

        let numbers = [
            (self.acquisition_number, other.acquisition_number),
            (self.temporal_position, other.temporal_position),
            (self.instance_number, other.instance_number),
        ];
        for (a, b) in numbers {
            let (a, b) = (absent_last(a), absent_last(b));
            if a != b {
                return a < b;
            }
        }

        if self.sop_instance_uid != other.sop_instance_uid {
            return self.sop_instance_uid < other.sop_instance_uid;
        }
        self.file.as_os_str() < other.file.as_os_str()
    }

    fn location_key(&self) -> f64 {
        self.slice_location.unwrap_or(f64::MAX)
    }
}

/// View position ascending ("CC" before "ML"/"MLO"), then laterality
/// descending ("R" before "L"). `None` when both agree.
pub(crate) fn paired_view_order(a: &Slice, b: &Slice) -> Option<Ordering> {
    if a.view_position != b.view_position {
        return Some(a.view_position.cmp(&b.view_position));
    }
    if a.laterality != b.laterality {
        return Some(b.laterality.cmp(&a.laterality));
    }
    None
}

pub(crate) fn absent_last(value: Option<i64>) -> i64 {
    value.unwrap_or(i64::MAX)
}

fn view_from_code(code: &str) -> Option<&'static str> {
    match code {
        "R-10242" => Some("CC"),
        "R-10224" => Some("ML"),
        "R-10226" => Some("MLO"),
        _ => None,
    }
}

impl Ord for Slice {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.precedes(other) {
            Ordering::Less
        } else if other.precedes(self) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl PartialOrd for Slice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Slice {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slice {}
