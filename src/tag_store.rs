//! Read-only tag access over the metadata regions of one DICOM file.
//!
//! Backends only answer raw string lookups ([`TagStore::lookup`]); typed
//! extraction goes through [`TagStore::get_tag`], which never panics and
//! reports absent or unparseable values as [`TagError`]. Callers in the
//! model layer turn those errors into "field absent".

use dicom::core::Tag;
use dicom::object::{DefaultDicomObject, FileMetaTable, InMemDicomObject};
use thiserror::Error;

use crate::model::geometry::{Orientation, Vector3};
use crate::tags;
use crate::utils::format_tag;

/// Metadata region of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Dataset,
    FileMeta,
}

/// How deep a lookup descends into sequence items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Search {
    /// Only the elements of the queried item itself.
    #[default]
    Item,
    /// The item's own elements first, then every nested sequence item, depth first.
    Nested,
}

/// Where to look for a tag: a primary region, an optional fallback region
/// consulted when the primary yields nothing, and the search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sources {
    pub primary: Region,
    pub fallback: Option<Region>,
    pub search: Search,
}

impl Sources {
    /// Dataset first, then the file meta group, without descending into sequences.
    pub const fn dataset() -> Self {
        Self {
            primary: Region::Dataset,
            fallback: Some(Region::FileMeta),
            search: Search::Item,
        }
    }

    /// File meta group first, then the dataset.
    pub const fn meta_first() -> Self {
        Self {
            primary: Region::FileMeta,
            fallback: Some(Region::Dataset),
            search: Search::Item,
        }
    }

    pub const fn nested(self) -> Self {
        Self {
            search: Search::Nested,
            ..self
        }
    }
}

/// The shape a caller expects a tag value to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    String,
    Integer,
    Real,
    /// Exactly this many leading backslash-separated reals.
    Vector(usize),
    /// Six reals forming the row and column axes of an image plane.
    OrientationPair,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    String(String),
    Integer(i64),
    Real(f64),
    Vector(Vec<f64>),
    OrientationPair(Orientation),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TagError {
    #[error("tag {0} not found")]
    NotFound(Tag),

    #[error("tag {tag} has a malformed {kind:?} value: {value:?}")]
    Malformed {
        tag: Tag,
        kind: TagKind,
        value: String,
    },
}

pub trait TagStore {
    /// Raw text of `tag` in `region`, multiple values joined with `\`.
    /// Empty values count as absent.
    fn lookup(&self, region: Region, tag: Tag, search: Search) -> Option<String>;

    /// Raw text of `tag` inside the first item of the dataset-level `sequence`,
    /// searching that item's nested sequences as well.
    fn sequence_item_lookup(&self, sequence: Tag, tag: Tag) -> Option<String>;

    fn raw_value(&self, tag: Tag, sources: Sources) -> Option<String> {
        self.lookup(sources.primary, tag, sources.search).or_else(|| {
            sources
                .fallback
                .and_then(|region| self.lookup(region, tag, sources.search))
        })
    }

    fn get_tag(&self, kind: TagKind, tag: Tag, sources: Sources) -> Result<TagValue, TagError> {
        let raw = self
            .raw_value(tag, sources)
            .ok_or(TagError::NotFound(tag))?;
        parse_value(kind, tag, raw)
    }

    /// Text value, empty when absent.
    fn tag_string(&self, tag: Tag, sources: Sources) -> String {
        match self.get_tag(TagKind::String, tag, sources) {
            Ok(TagValue::String(value)) => value,
            _ => String::new(),
        }
    }

    fn tag_integer(&self, tag: Tag, sources: Sources) -> Option<i64> {
        match self.get_tag(TagKind::Integer, tag, sources) {
            Ok(TagValue::Integer(value)) => Some(value),
            result => absent(result),
        }
    }

    fn tag_real(&self, tag: Tag, sources: Sources) -> Option<f64> {
        match self.get_tag(TagKind::Real, tag, sources) {
            Ok(TagValue::Real(value)) => Some(value),
            result => absent(result),
        }
    }

    fn tag_vector(&self, tag: Tag, len: usize, sources: Sources) -> Option<Vec<f64>> {
        match self.get_tag(TagKind::Vector(len), tag, sources) {
            Ok(TagValue::Vector(values)) => Some(values),
            result => absent(result),
        }
    }

    fn tag_orientation(&self, tag: Tag, sources: Sources) -> Option<Orientation> {
        match self.get_tag(TagKind::OrientationPair, tag, sources) {
            Ok(TagValue::OrientationPair(orientation)) => Some(orientation),
            result => absent(result),
        }
    }
}

fn absent<T>(result: Result<TagValue, TagError>) -> Option<T> {
    if let Err(err @ TagError::Malformed { .. }) = result {
        log::debug!("{err}");
    }
    None
}

fn parse_value(kind: TagKind, tag: Tag, raw: String) -> Result<TagValue, TagError> {
    let malformed = |raw: String| TagError::Malformed {
        tag,
        kind,
        value: raw,
    };

    match kind {
        TagKind::String => Ok(TagValue::String(raw)),
        TagKind::Integer => match first_value(&raw).parse::<i64>() {
            Ok(value) => Ok(TagValue::Integer(value)),
            Err(_) => Err(malformed(raw)),
        },
        TagKind::Real => match parse_real(first_value(&raw)) {
            Some(value) => Ok(TagValue::Real(value)),
            None => Err(malformed(raw)),
        },
        TagKind::Vector(len) => match parse_reals(&raw, len) {
            Some(values) => Ok(TagValue::Vector(values)),
            None => Err(malformed(raw)),
        },
        TagKind::OrientationPair => {
            let axes = parse_reals(&raw, 6).and_then(|values| {
                Some(Orientation::new(
                    Vector3::from_slice(&values[..3])?,
                    Vector3::from_slice(&values[3..])?,
                ))
            });
            match axes {
                Some(orientation) => Ok(TagValue::OrientationPair(orientation)),
                None => Err(malformed(raw)),
            }
        }
    }
}

fn first_value(raw: &str) -> &str {
    raw.split('\\').next().unwrap_or_default().trim()
}

fn parse_real(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// The first `len` values of a multi-valued element; trailing values are ignored.
fn parse_reals(raw: &str, len: usize) -> Option<Vec<f64>> {
    let values = raw
        .split('\\')
        .take(len)
        .map(parse_real)
        .collect::<Option<Vec<_>>>()?;
    (values.len() == len).then_some(values)
}

fn clean_text(text: &str) -> Option<String> {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn item_lookup(item: &InMemDicomObject, tag: Tag, search: Search) -> Option<String> {
    let own = item
        .element(tag)
        .ok()
        .and_then(|element| element.to_str().ok())
        .and_then(|value| clean_text(&value));
    if own.is_some() || search == Search::Item {
        return own;
    }

    item.iter()
        .filter_map(|element| element.items())
        .flat_map(|items| items.iter())
        .find_map(|nested| item_lookup(nested, tag, Search::Nested))
}

fn first_item_lookup(dataset: &InMemDicomObject, sequence: Tag, tag: Tag) -> Option<String> {
    let item = dataset.element(sequence).ok()?.items()?.first()?;
    item_lookup(item, tag, Search::Nested)
}

fn meta_lookup(meta: &FileMetaTable, tag: Tag) -> Option<String> {
    let value = match tag {
        tags::MEDIA_STORAGE_SOP_CLASS_UID => meta.media_storage_sop_class_uid.as_str(),
        tags::MEDIA_STORAGE_SOP_INSTANCE_UID => meta.media_storage_sop_instance_uid.as_str(),
        tags::TRANSFER_SYNTAX_UID => meta.transfer_syntax.as_str(),
        tags::IMPLEMENTATION_CLASS_UID => meta.implementation_class_uid.as_str(),
        tags::IMPLEMENTATION_VERSION_NAME => meta.implementation_version_name.as_deref()?,
        tags::SOURCE_APPLICATION_ENTITY_TITLE => {
            meta.source_application_entity_title.as_deref()?
        }
        _ => return None,
    };
    clean_text(value)
}

/// A bare dataset has no file meta group.
impl TagStore for InMemDicomObject {
    fn lookup(&self, region: Region, tag: Tag, search: Search) -> Option<String> {
        match region {
            Region::Dataset => item_lookup(self, tag, search),
            Region::FileMeta => None,
        }
    }

    fn sequence_item_lookup(&self, sequence: Tag, tag: Tag) -> Option<String> {
        first_item_lookup(self, sequence, tag)
    }
}

impl TagStore for DefaultDicomObject {
    fn lookup(&self, region: Region, tag: Tag, search: Search) -> Option<String> {
        let value = match region {
            Region::Dataset => item_lookup(self, tag, search),
            Region::FileMeta => meta_lookup(self.meta(), tag),
        };
        if value.is_none() {
            log::trace!("{} not present in {region:?}", format_tag(tag));
        }
        value
    }

    fn sequence_item_lookup(&self, sequence: Tag, tag: Tag) -> Option<String> {
        first_item_lookup(self, sequence, tag)
    }
}
