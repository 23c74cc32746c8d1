use serde_json::Value;

use crate::app::{MonitorError, Result};
use crate::normalizer::TEXT_KEY;

/// A value that xml-to-mapping conversion produced either once or repeated.
///
/// A feed with exactly one `<entry>` maps to a single object, with several
/// to an array.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl<'a> OneOrMany<&'a Value> {
    /// Normalize `value` at the boundary; `None` means the key was absent.
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            None => OneOrMany::Many(Vec::new()),
            Some(Value::Array(items)) => OneOrMany::Many(items.iter().collect()),
            Some(single) => OneOrMany::One(single),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: String,
}

impl FeedEntry {
    fn from_mapping(index: usize, entry: &Value) -> Result<Self> {
        let id = match entry.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Object(fields)) => fields
                .get(TEXT_KEY)
                .and_then(Value::as_str)
                .map(String::from),
            _ => None,
        };

        id.map(|id| FeedEntry { id })
            .ok_or_else(|| MonitorError::FeedParse(format!("entry {} has no id", index)))
    }
}

/// The entries of a channel feed, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedDocument {
    pub entries: Vec<FeedEntry>,
}

impl FeedDocument {
    /// Read `feed.entry` out of a parsed feed.
    ///
    /// A missing `feed` or `entry` key yields no entries.
    pub fn from_mapping(mapping: &Value) -> Result<Self> {
        let entry = mapping.get("feed").and_then(|feed| feed.get("entry"));
        let entries = OneOrMany::from_value(entry)
            .into_vec()
            .into_iter()
            .enumerate()
            .map(|(index, entry)| FeedEntry::from_mapping(index, entry))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }
}

/// Video ids of every entry in `feed.entry`, order preserved.
pub fn extract_video_ids(mapping: &Value) -> Result<Vec<String>> {
    let document = FeedDocument::from_mapping(mapping)?;
    Ok(document.entries.into_iter().map(|entry| entry.id).collect())
}
