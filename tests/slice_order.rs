//! Property tests for the slice ordering relation.
//!
//! The relation is antisymmetric for any inputs. It is only transitive among
//! slices sharing one acquisition context (orientation, tilt and spacing) or
//! among unpositioned lateral views; mixed contexts can form cycles.

use std::cmp::Ordering;

use dcmsort::{Orientation, Series, SeriesSet, Slice, SpacingKind, Vector3};
use proptest::prelude::*;
use proptest::sample::select;

const AXIAL: Orientation = Orientation::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
const SAGITTAL: Orientation =
    Orientation::new(Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 0.0, -1.0));

fn number() -> impl Strategy<Value = Option<i64>> {
    prop::option::of(0_i64..3)
}

fn location() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(select(vec![-2.5, 0.0, 2.5]))
}

fn uid() -> impl Strategy<Value = &'static str> {
    select(vec!["", "1.2.1", "1.2.2"])
}

fn file() -> impl Strategy<Value = &'static str> {
    select(vec!["a", "b"])
}

/// Absent or shared orientation, no laterality.
fn volumetric_slice() -> impl Strategy<Value = Slice> {
    (
        any::<bool>(),
        0_i32..4,
        location(),
        number(),
        number(),
        number(),
        uid(),
        file(),
    )
        .prop_map(|(placed, z, location, acquisition, temporal, instance, uid, file)| {
            let mut slice = Slice::new(file);
            if placed {
                slice.position = Some(Vector3::new(0.0, 0.0, f64::from(z)));
                slice.orientation = Some(AXIAL);
            }
            slice.slice_location = location;
            slice.acquisition_number = acquisition;
            slice.temporal_position = temporal;
            slice.instance_number = instance;
            slice.sop_instance_uid = uid.to_string();
            slice
        })
}

/// Projection views of a paired organ: never positioned, always lateral.
fn paired_slice() -> impl Strategy<Value = Slice> {
    (
        select(vec!["CC", "ML", "MLO", ""]),
        select(vec!["R", "L", "B"]),
        location(),
        number(),
        uid(),
        file(),
    )
        .prop_map(|(view, laterality, location, instance, uid, file)| {
            let mut slice = Slice::new(file);
            slice.view_position = view.to_string();
            slice.laterality = laterality.to_string();
            slice.slice_location = location;
            slice.instance_number = instance;
            slice.sop_instance_uid = uid.to_string();
            slice
        })
}

/// Anything goes, including mixed orientations, spacings and tilts.
fn any_slice() -> impl Strategy<Value = Slice> {
    (
        prop::option::of(-3_i32..3),
        prop::option::of(select(vec![AXIAL, SAGITTAL])),
        select(vec![0.0, 15.0]),
        select(vec![[1.0, 1.0], [0.5, 0.5], [0.52, 0.5]]),
        select(vec![
            SpacingKind::InPatient,
            SpacingKind::AtDetector,
            SpacingKind::Unknown,
        ]),
        select(vec!["", "R", "L"]),
        location(),
        number(),
        uid(),
        file(),
    )
        .prop_map(
            |(z, orientation, tilt, spacing, kind, laterality, location, instance, uid, file)| {
                let mut slice = Slice::new(file);
                slice.position = z.map(|z| Vector3::new(1.0, f64::from(z) * 0.5, f64::from(z)));
                slice.orientation = orientation;
                slice.gantry_tilt = tilt;
                slice.pixel_spacing = spacing;
                slice.spacing_kind = kind;
                slice.laterality = laterality.to_string();
                slice.slice_location = location;
                slice.instance_number = instance;
                slice.sop_instance_uid = uid.to_string();
                slice
            },
        )
}

fn assert_strict_weak_order(a: &Slice, b: &Slice, c: &Slice) -> Result<(), TestCaseError> {
    if a.precedes(b) && b.precedes(c) {
        prop_assert!(a.precedes(c), "ordering must be transitive");
    }
    if a.cmp(b) == Ordering::Equal && b.cmp(c) == Ordering::Equal {
        prop_assert_eq!(a.cmp(c), Ordering::Equal);
    }
    Ok(())
}

proptest! {
    #[test]
    fn never_both_directions(a in any_slice(), b in any_slice()) {
        prop_assert!(!(a.precedes(&b) && b.precedes(&a)));
        prop_assert!(!a.precedes(&a));
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn single_context_volumes_are_transitive(
        a in volumetric_slice(),
        b in volumetric_slice(),
        c in volumetric_slice(),
    ) {
        assert_strict_weak_order(&a, &b, &c)?;
    }

    #[test]
    fn unpositioned_lateral_views_are_transitive(
        a in paired_slice(),
        b in paired_slice(),
        c in paired_slice(),
    ) {
        assert_strict_weak_order(&a, &b, &c)?;
    }

    #[test]
    fn sorting_yields_a_non_decreasing_sequence(mut slices in prop::collection::vec(volumetric_slice(), 0..16)) {
        slices.sort();
        for pair in slices.windows(2) {
            prop_assert!(!pair[1].precedes(&pair[0]));
        }
    }

    #[test]
    fn inserting_slices_again_stores_nothing(slices in prop::collection::vec(any_slice(), 1..12)) {
        let mut set = SeriesSet::new();
        for slice in slices.iter().cloned() {
            set.insert(ct_series(), slice);
        }
        let stored = set.iter().next().map(Series::len);

        for slice in slices {
            prop_assert!(!set.insert(ct_series(), slice));
        }
        prop_assert_eq!(set.len(), 1);
        prop_assert_eq!(set.iter().next().map(Series::len), stored);
    }
}

fn ct_series() -> Series {
    let mut series = Series::default();
    series.study_instance_uid = "1.2.3".to_string();
    series.series_instance_uid = "1.2.3.1".to_string();
    series
}

fn axial_at(file: &str, z: f64, location: f64, tilt: f64) -> Slice {
    let mut slice = Slice::new(file);
    slice.sop_instance_uid = format!("1.2.3.1.{file}");
    slice.position = Some(Vector3::new(0.0, 0.0, z));
    slice.orientation = Some(AXIAL);
    slice.slice_location = Some(location);
    slice.gantry_tilt = tilt;
    slice
}

#[test]
fn mixed_tilts_form_an_ordering_cycle() {
    let a = axial_at("a", 0.0, 3.0, 0.0);
    let b = axial_at("b", 9.0, 2.0, 15.0);
    let c = axial_at("c", 5.0, 1.0, 0.0);

    // position decides at equal tilt, slice location once tilts differ by over 10
    assert!(a.precedes(&c));
    assert!(c.precedes(&b));
    assert!(b.precedes(&a));

    let mut set = SeriesSet::new();
    for slice in [&a, &b, &c, &a, &b, &c] {
        set.insert(ct_series(), slice.clone());
    }
    assert_eq!(set.iter().next().map(Series::len), Some(3));
}

#[test]
fn all_absent_slices_order_by_file_name() {
    let a = Slice::new("IM_0001");
    let b = Slice::new("IM_0002");
    assert_eq!(a.cmp(&b), Ordering::Less);
    assert_eq!(b.cmp(&a), Ordering::Greater);
}
