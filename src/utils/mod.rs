pub mod formatting;

pub use formatting::{format_tag, series_list_dir_name, slice_counts};
