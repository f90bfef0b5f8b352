//! Attribute tags read by the crate, taken from the standard dictionary.

pub use dicom::dictionary_std::tags::{
    ACQUISITION_NUMBER, CODE_VALUE, COLUMNS, GANTRY_DETECTOR_TILT, IMAGER_PIXEL_SPACING,
    IMAGE_LATERALITY, IMAGE_ORIENTATION_PATIENT, IMAGE_POSITION_PATIENT,
    IMPLEMENTATION_CLASS_UID, IMPLEMENTATION_VERSION_NAME, INSTANCE_NUMBER,
    ISSUER_OF_PATIENT_ID, LATERALITY, MEDIA_STORAGE_SOP_CLASS_UID,
    MEDIA_STORAGE_SOP_INSTANCE_UID, MODALITY, NUMBER_OF_FRAMES, PATIENT_BIRTH_DATE,
    PATIENT_ID, PATIENT_NAME, PIXEL_DATA, PIXEL_SPACING,
    REFERENCED_SOP_INSTANCE_UID_IN_FILE, ROWS, SERIES_INSTANCE_UID, SERIES_NUMBER,
    SERIES_TIME, SLICE_LOCATION, SOP_CLASS_UID, SOP_INSTANCE_UID,
    SOURCE_APPLICATION_ENTITY_TITLE, STUDY_DATE, STUDY_ID, STUDY_INSTANCE_UID,
    TEMPORAL_POSITION_INDEX, TRANSFER_SYNTAX_UID, VIEW_CODE_SEQUENCE, VIEW_POSITION,
};

#[cfg(test)]
mod tests {
    use super::*;
    use dicom::core::Tag;

    #[test]
    fn test_tag_values() {
        assert_eq!(SOP_INSTANCE_UID, Tag(0x0008, 0x0018));
        assert_eq!(SERIES_INSTANCE_UID, Tag(0x0020, 0x000E));
        assert_eq!(IMAGE_ORIENTATION_PATIENT, Tag(0x0020, 0x0037));
        assert_eq!(VIEW_CODE_SEQUENCE, Tag(0x0054, 0x0220));
        assert!(MEDIA_STORAGE_SOP_INSTANCE_UID.group() == 0x0002);
    }
}
