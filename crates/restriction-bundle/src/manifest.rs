//! JSON restriction manifests.
//!
//! The wire form mirrors the platform record: a numeric `type` code plus
//! every payload field, all optional. Parsing keeps only the payload the
//! type selects; unknown codes survive as unsupported entries and are
//! rejected at conversion time.

use std::io::Read;

use serde::Deserialize;

use crate::error::ManifestError;
use crate::restriction::{Choice, RestrictionEntry, RestrictionType, RestrictionValue};

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub key: String,
    #[serde(rename = "type")]
    pub type_code: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub selected_state: bool,
    #[serde(default)]
    pub int_value: i32,
    #[serde(default)]
    pub selected_string: Option<String>,
    #[serde(default)]
    pub all_selected_strings: Vec<String>,
    #[serde(default)]
    pub choice_entries: Vec<String>,
    #[serde(default)]
    pub choice_values: Vec<String>,
    #[serde(default)]
    pub restrictions: Option<Vec<ManifestEntry>>,
}

fn into_entries(entries: Option<Vec<ManifestEntry>>) -> Vec<RestrictionEntry> {
    entries
        .unwrap_or_default()
        .into_iter()
        .map(RestrictionEntry::from)
        .collect()
}

impl From<ManifestEntry> for RestrictionEntry {
    fn from(raw: ManifestEntry) -> Self {
        let value = match RestrictionType::from_code(raw.type_code) {
            RestrictionType::Null => RestrictionValue::Null(raw.selected_string),
            RestrictionType::Bool => RestrictionValue::Bool(raw.selected_state),
            RestrictionType::Choice => RestrictionValue::Choice(Choice {
                selected: raw.selected_string,
                entries: raw.choice_entries,
                values: raw.choice_values,
            }),
            RestrictionType::MultiSelect => {
                RestrictionValue::MultiSelect(raw.all_selected_strings)
            }
            RestrictionType::Integer => RestrictionValue::Integer(raw.int_value),
            RestrictionType::String => RestrictionValue::Str(raw.selected_string),
            RestrictionType::Bundle => RestrictionValue::Bundle(into_entries(raw.restrictions)),
            RestrictionType::BundleArray => {
                RestrictionValue::BundleArray(into_entries(raw.restrictions))
            }
            other @ (RestrictionType::ChoiceLevel | RestrictionType::Unknown(_)) => {
                RestrictionValue::Unsupported(other)
            }
        };
        let mut entry = RestrictionEntry::new(raw.key, value);
        if let Some(title) = raw.title {
            entry = entry.with_title(title);
        }
        if let Some(description) = raw.description {
            entry = entry.with_description(description);
        }
        entry
    }
}

/// Parses a JSON array of manifest entries.
pub fn parse_manifest(json: &str) -> Result<Vec<RestrictionEntry>, ManifestError> {
    let raw: Vec<ManifestEntry> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(RestrictionEntry::from).collect())
}

/// Reads a JSON array of manifest entries from `reader`.
pub fn read_manifest<R: Read>(reader: R) -> Result<Vec<RestrictionEntry>, ManifestError> {
    let raw: Vec<ManifestEntry> = serde_json::from_reader(reader)?;
    Ok(raw.into_iter().map(RestrictionEntry::from).collect())
}
