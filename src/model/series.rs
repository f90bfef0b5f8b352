use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use super::series_key::SeriesKey;
use super::slice::{absent_last, paired_view_order, Slice};
use crate::tag_store::{Sources, TagStore};
use crate::tags;

/// Patient, study and series attributes shared by the files of one series,
/// together with its slices in slice order.
#[derive(Debug, Clone, Default)]
pub struct Series {
    pub patient_id: String,
    pub issuer_of_patient_id: String,
    pub patient_name: String,
    pub patient_birth_date: String,

    pub study_date: String,
    pub study_id: String,
    pub study_instance_uid: String,

    pub series_number: Option<i64>,
    pub series_time: String,
    pub series_instance_uid: String,
    pub modality: String,
    pub sop_class_uid: String,

    slices: BTreeSet<Slice>,
    // (instance UID, file) of every stored slice
    members: HashSet<(String, PathBuf)>,
}

impl Series {
    /// Reads the series attributes of one file. Returns `None` when neither
    /// a SeriesInstanceUID nor a StudyInstanceUID is present.
    pub fn from_tags<S: TagStore + ?Sized>(store: &S) -> Option<Self> {
        let item = Sources::dataset();
        let series_instance_uid = store.tag_string(tags::SERIES_INSTANCE_UID, item);
        let study_instance_uid = store.tag_string(tags::STUDY_INSTANCE_UID, item);
        if series_instance_uid.is_empty() && study_instance_uid.is_empty() {
            return None;
        }

        let meta_first = Sources::meta_first();
        Some(Self {
            patient_id: store.tag_string(tags::PATIENT_ID, meta_first),
            issuer_of_patient_id: store.tag_string(tags::ISSUER_OF_PATIENT_ID, meta_first),
            patient_name: store.tag_string(tags::PATIENT_NAME, item),
            patient_birth_date: store.tag_string(tags::PATIENT_BIRTH_DATE, item),
            study_date: store.tag_string(tags::STUDY_DATE, item),
            study_id: store.tag_string(tags::STUDY_ID, item),
            study_instance_uid,
            series_number: store.tag_integer(tags::SERIES_NUMBER, item),
            series_time: store.tag_string(tags::SERIES_TIME, item),
            series_instance_uid,
            modality: store.tag_string(tags::MODALITY, item),
            sop_class_uid: store.tag_string(tags::SOP_CLASS_UID, item),
            slices: BTreeSet::new(),
            members: HashSet::new(),
        })
    }

    pub fn key(&self) -> Option<SeriesKey> {
        SeriesKey::from_uids(&self.series_instance_uid, &self.study_instance_uid)
    }

    pub fn slices(&self) -> impl ExactSizeIterator<Item = &Slice> + DoubleEndedIterator {
        self.slices.iter()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Stores `slice` at its place in slice order. A slice with the instance
    /// UID and file of one already stored is dropped and the stored one kept.
    ///
    /// The membership check does not go through the slice order, which is not
    /// transitive across acquisition contexts.
    pub(crate) fn insert_slice(&mut self, slice: Slice) -> bool {
        let member = (slice.sop_instance_uid.clone(), slice.file.clone());
        if self.members.contains(&member) {
            return false;
        }
        if !self.slices.insert(slice) {
            return false;
        }
        self.members.insert(member);
        true
    }

    fn single_slice(&self) -> Option<&Slice> {
        if self.slices.len() == 1 {
            self.slices.first()
        } else {
            None
        }
    }

    /// Presentation order of series: patient, then study, then series.
    ///
    /// Only used to enumerate series. Whether a file joins an existing
    /// series is decided by [`Series::key`].
    pub fn precedes(&self, other: &Series) -> bool {
        if self.patient_id != other.patient_id
            && self.issuer_of_patient_id != other.issuer_of_patient_id
        {
            let fields = [
                (&self.patient_name, &other.patient_name),
                (&self.patient_birth_date, &other.patient_birth_date),
                (&self.issuer_of_patient_id, &other.issuer_of_patient_id),
            ];
            if let Some((a, b)) = fields.into_iter().find(|(a, b)| a != b) {
                return a < b;
            }
            return self.patient_id < other.patient_id;
        }

        if self.study_instance_uid != other.study_instance_uid {
            let fields = [
                (&self.study_date, &other.study_date),
                (&self.study_id, &other.study_id),
            ];
            if let Some((a, b)) = fields.into_iter().find(|(a, b)| a != b) {
                return a < b;
            }
            return self.study_instance_uid < other.study_instance_uid;
        }

        if self.series_instance_uid != other.series_instance_uid {
            if let (Some(x), Some(y)) = (self.single_slice(), other.single_slice()) {
                if x.is_paired_body_part() || y.is_paired_body_part() {
                    if let Some(order) = paired_view_order(x, y) {
                        return order == Ordering::Less;
                    }
                }
            }

            let (number, other_number) = (
                absent_last(self.series_number),
                absent_last(other.series_number),
            );
            if number != other_number {
                return number < other_number;
            }
            let fields = [
                (&self.series_time, &other.series_time),
                (&self.modality, &other.modality),
                (&self.sop_class_uid, &other.sop_class_uid),
            ];
            if let Some((a, b)) = fields.into_iter().find(|(a, b)| a != b) {
                return a < b;
            }
            return self.series_instance_uid < other.series_instance_uid;
        }

        false
    }
}
