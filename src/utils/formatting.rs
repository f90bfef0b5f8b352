use dicom::core::Tag;

use crate::model::SeriesSet;

const LIST_DIR_PREFIX: &str = "1B7B7B67-5793-4FC4";
const LOW_BITS: u64 = 0xffff_ffff_ffff;

pub fn format_tag(tag: Tag) -> String {
    format!("{:04X},{:04X}", tag.group(), tag.element())
}

/// Directory name for the `index`-th exported series, shaped like a GUID:
/// the top 16 bits and the low 48 bits of `index` fill the last two groups.
pub fn series_list_dir_name(index: u64) -> String {
    format!(
        "{{{LIST_DIR_PREFIX}-{:04x}-{:012x}}}",
        index >> 48,
        index & LOW_BITS
    )
}

/// Slice count of every series in enumeration order, space separated.
pub fn slice_counts(set: &SeriesSet) -> String {
    set.iter()
        .map(|series| series.len().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
