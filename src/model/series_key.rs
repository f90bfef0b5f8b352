/// Identity of a series for grouping purposes.
///
/// Two files belong to the same series when their SeriesInstanceUIDs are
/// equal and non-empty, or when both lack a SeriesInstanceUID and share a
/// non-empty StudyInstanceUID. Presentation order is a separate relation
/// ([`Series::precedes`](super::Series::precedes)).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKey {
    Series(String),
    Study(String),
}

impl SeriesKey {
    pub fn series(uid: &str) -> Self {
        Self::Series(uid.to_string())
    }

    pub fn study(uid: &str) -> Self {
        Self::Study(uid.to_string())
    }

    /// `None` when both UIDs are empty: such a series can never be matched.
    pub fn from_uids(series_instance_uid: &str, study_instance_uid: &str) -> Option<Self> {
        if !series_instance_uid.is_empty() {
            Some(Self::series(series_instance_uid))
        } else if !study_instance_uid.is_empty() {
            Some(Self::study(study_instance_uid))
        } else {
            None
        }
    }
}
