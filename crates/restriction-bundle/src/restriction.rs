//! Restriction entries: the typed input model.
//!
//! A [`RestrictionEntry`] pairs a key with exactly one typed payload. The
//! payload is a closed sum type, so inactive fields of the platform record
//! (an int value on a string restriction, a child list on a boolean) cannot
//! be represented. Platform type codes that this crate does not convert are
//! kept as [`RestrictionValue::Unsupported`].

use std::fmt;

/// Platform restriction type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestrictionType {
    Null,
    Bool,
    Choice,
    /// Legacy hierarchical choice type. Never converted.
    ChoiceLevel,
    MultiSelect,
    Integer,
    String,
    Bundle,
    BundleArray,
    /// A code introduced by a platform release newer than this crate.
    Unknown(i32),
}

impl RestrictionType {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Null,
            1 => Self::Bool,
            2 => Self::Choice,
            3 => Self::ChoiceLevel,
            4 => Self::MultiSelect,
            5 => Self::Integer,
            6 => Self::String,
            7 => Self::Bundle,
            8 => Self::BundleArray,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Null => 0,
            Self::Bool => 1,
            Self::Choice => 2,
            Self::ChoiceLevel => 3,
            Self::MultiSelect => 4,
            Self::Integer => 5,
            Self::String => 6,
            Self::Bundle => 7,
            Self::BundleArray => 8,
            Self::Unknown(code) => code,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Choice => "choice",
            Self::ChoiceLevel => "choice_level",
            Self::MultiSelect => "multi_select",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Bundle => "bundle",
            Self::BundleArray => "bundle_array",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for RestrictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

/// Single-choice payload: the current selection plus the parallel
/// label/value lists offered to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choice {
    pub selected: Option<String>,
    pub entries: Vec<String>,
    pub values: Vec<String>,
}

/// Typed payload of a restriction entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestrictionValue {
    Null(Option<String>),
    Bool(bool),
    Integer(i32),
    Str(Option<String>),
    Choice(Choice),
    MultiSelect(Vec<String>),
    Bundle(Vec<RestrictionEntry>),
    BundleArray(Vec<RestrictionEntry>),
    Unsupported(RestrictionType),
}

impl RestrictionValue {
    pub fn restriction_type(&self) -> RestrictionType {
        match self {
            Self::Null(_) => RestrictionType::Null,
            Self::Bool(_) => RestrictionType::Bool,
            Self::Integer(_) => RestrictionType::Integer,
            Self::Str(_) => RestrictionType::String,
            Self::Choice(_) => RestrictionType::Choice,
            Self::MultiSelect(_) => RestrictionType::MultiSelect,
            Self::Bundle(_) => RestrictionType::Bundle,
            Self::BundleArray(_) => RestrictionType::BundleArray,
            Self::Unsupported(t) => *t,
        }
    }
}

/// One configurable policy constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionEntry {
    key: String,
    title: Option<String>,
    description: Option<String>,
    value: RestrictionValue,
}

impl RestrictionEntry {
    pub fn new(key: impl Into<String>, value: RestrictionValue) -> Self {
        Self {
            key: key.into(),
            title: None,
            description: None,
            value,
        }
    }

    pub fn boolean(key: impl Into<String>, state: bool) -> Self {
        Self::new(key, RestrictionValue::Bool(state))
    }

    pub fn integer(key: impl Into<String>, value: i32) -> Self {
        Self::new(key, RestrictionValue::Integer(value))
    }

    pub fn string(key: impl Into<String>, value: Option<String>) -> Self {
        Self::new(key, RestrictionValue::Str(value))
    }

    pub fn null(key: impl Into<String>, value: Option<String>) -> Self {
        Self::new(key, RestrictionValue::Null(value))
    }

    pub fn choice(
        key: impl Into<String>,
        selected: Option<String>,
        entries: Vec<String>,
        values: Vec<String>,
    ) -> Self {
        Self::new(
            key,
            RestrictionValue::Choice(Choice {
                selected,
                entries,
                values,
            }),
        )
    }

    pub fn multi_select(key: impl Into<String>, selected: Vec<String>) -> Self {
        Self::new(key, RestrictionValue::MultiSelect(selected))
    }

    pub fn bundle(key: impl Into<String>, children: Vec<RestrictionEntry>) -> Self {
        Self::new(key, RestrictionValue::Bundle(children))
    }

    pub fn bundle_array(key: impl Into<String>, elements: Vec<RestrictionEntry>) -> Self {
        Self::new(key, RestrictionValue::BundleArray(elements))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn value(&self) -> &RestrictionValue {
        &self.value
    }

    pub fn restriction_type(&self) -> RestrictionType {
        self.value.restriction_type()
    }

    /// Selected string for the string-like types (`null`, `string`,
    /// `choice`); `None` for every other type.
    pub fn selected_string(&self) -> Option<&str> {
        match &self.value {
            RestrictionValue::Null(s) | RestrictionValue::Str(s) => s.as_deref(),
            RestrictionValue::Choice(choice) => choice.selected.as_deref(),
            _ => None,
        }
    }

    pub fn choice_entries(&self) -> &[String] {
        match &self.value {
            RestrictionValue::Choice(choice) => &choice.entries,
            _ => &[],
        }
    }

    pub fn choice_values(&self) -> &[String] {
        match &self.value {
            RestrictionValue::Choice(choice) => &choice.values,
            _ => &[],
        }
    }

    /// Child entries. Only bundle and bundle-array entries carry a child
    /// list; everything else returns `None`.
    pub fn restrictions(&self) -> Option<&[RestrictionEntry]> {
        match &self.value {
            RestrictionValue::Bundle(children) | RestrictionValue::BundleArray(children) => {
                Some(children)
            }
            _ => None,
        }
    }
}
