//! Restriction entries to bundle conversion.
//!
//! Mapping:
//!
//! | restriction    | bundle                                              |
//! |----------------|-----------------------------------------------------|
//! | `bool`         | `put_boolean`                                       |
//! | `integer`      | `put_int`                                           |
//! | `string`       | `put_string`, null stored as `""`                   |
//! | `null`         | `put_string`, null kept                             |
//! | `multi_select` | `put_string_array`                                  |
//! | `choice`       | `put_bundle` of choice metadata, or `put_string`    |
//! | `bundle`       | `put_bundle`                                        |
//! | `bundle_array` | `put_bundle_array`                                  |
//!
//! Bundles and bundle arrays need host support, see
//! [`ConvertOptions::nested_bundles_supported`].

use tracing::{debug, warn};

use crate::bundle::Bundle;
use crate::error::ConvertError;
use crate::options::ConvertOptions;
use crate::restriction::{RestrictionEntry, RestrictionValue};

// Only used inside the editing UI, never written back to the policy store.
pub const CHOICE_SELECTED_VALUE: &str = "testdpc_arg_choice_selected_value";
pub const CHOICE_ENTRIES: &str = "testdpc_arg_choice_entries";
pub const CHOICE_VALUES: &str = "testdpc_arg_choice_values";

/// Converts restriction entries into bundles with fixed [`ConvertOptions`].
#[derive(Debug, Clone, Default)]
pub struct RestrictionConverter {
    options: ConvertOptions,
}

impl RestrictionConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converts `entries` into a new bundle, one key per entry, inserted in
    /// input order.
    ///
    /// Fails on the first entry with an unsupported type or nested past
    /// [`ConvertOptions::max_depth`]; no partial bundle is returned.
    pub fn convert(&self, entries: &[RestrictionEntry]) -> Result<Bundle, ConvertError> {
        debug!(
            entries = entries.len(),
            dialog = self.options.save_choice_data_for_dialog,
            max_depth = self.options.max_depth,
            "converting restrictions to bundle"
        );
        self.convert_level(entries, 0)
    }

    fn convert_level(
        &self,
        entries: &[RestrictionEntry],
        depth: usize,
    ) -> Result<Bundle, ConvertError> {
        let mut bundle = Bundle::new();
        for entry in entries {
            self.add_restriction(&mut bundle, entry, depth)?;
        }
        Ok(bundle)
    }

    fn add_restriction(
        &self,
        bundle: &mut Bundle,
        entry: &RestrictionEntry,
        depth: usize,
    ) -> Result<(), ConvertError> {
        let key = entry.key();
        match entry.value() {
            RestrictionValue::Bool(state) => bundle.put_boolean(key, *state),
            RestrictionValue::MultiSelect(selected) => {
                bundle.put_string_array(key, selected.clone())
            }
            RestrictionValue::Integer(value) => bundle.put_int(key, *value),
            // The editing UI infers the field type from the value and shows a
            // null string as a boolean.
            RestrictionValue::Str(value) => {
                bundle.put_string(key, Some(value.clone().unwrap_or_default()))
            }
            RestrictionValue::Null(value) => bundle.put_string(key, value.clone()),
            RestrictionValue::Bundle(children) => {
                self.add_bundle(bundle, entry, children, depth)?
            }
            RestrictionValue::BundleArray(elements) => {
                self.add_bundle_array(bundle, entry, elements, depth)?
            }
            RestrictionValue::Choice(choice) => {
                if self.options.save_choice_data_for_dialog {
                    bundle.put_bundle(key, convert_choice_metadata(Some(entry)));
                } else {
                    bundle.put_string(key, choice.selected.clone());
                }
            }
            RestrictionValue::Unsupported(restriction_type) => {
                return Err(ConvertError::UnsupportedType {
                    key: key.to_owned(),
                    restriction_type: *restriction_type,
                });
            }
        }
        Ok(())
    }

    fn add_bundle(
        &self,
        bundle: &mut Bundle,
        entry: &RestrictionEntry,
        children: &[RestrictionEntry],
        depth: usize,
    ) -> Result<(), ConvertError> {
        if !self.nested_supported(entry) {
            return Ok(());
        }
        let depth = self.descend(entry, depth)?;
        let child = self.convert_level(children, depth)?;
        bundle.put_bundle(entry.key(), child);
        Ok(())
    }

    fn add_bundle_array(
        &self,
        bundle: &mut Bundle,
        entry: &RestrictionEntry,
        elements: &[RestrictionEntry],
        depth: usize,
    ) -> Result<(), ConvertError> {
        if !self.nested_supported(entry) {
            return Ok(());
        }
        let depth = self.descend(entry, depth)?;
        let mut bundles = Vec::with_capacity(elements.len());
        for element in elements {
            match element.restrictions() {
                Some(children) => bundles.push(self.convert_level(children, depth)?),
                None => {
                    warn!(
                        key = %entry.key(),
                        element = %element.key(),
                        "non-bundle entry found in bundle array"
                    );
                    bundles.push(Bundle::new());
                }
            }
        }
        bundle.put_bundle_array(entry.key(), bundles);
        Ok(())
    }

    fn nested_supported(&self, entry: &RestrictionEntry) -> bool {
        if !self.options.nested_bundles_supported {
            warn!(
                key = %entry.key(),
                restriction_type = %entry.restriction_type(),
                "nested bundles not supported by host, skipping restriction"
            );
        }
        self.options.nested_bundles_supported
    }

    fn descend(&self, entry: &RestrictionEntry, depth: usize) -> Result<usize, ConvertError> {
        let next = depth + 1;
        if next > self.options.max_depth {
            return Err(ConvertError::DepthExceeded {
                key: entry.key().to_owned(),
                max_depth: self.options.max_depth,
            });
        }
        Ok(next)
    }
}

/// Converts `entries` with default options, optionally expanding choice
/// restrictions for the editing UI.
pub fn convert(
    entries: &[RestrictionEntry],
    save_choice_data_for_dialog: bool,
) -> Result<Bundle, ConvertError> {
    let options = ConvertOptions::default().with_choice_data(save_choice_data_for_dialog);
    RestrictionConverter::new(options).convert(entries)
}

/// Builds the choice metadata bundle used by the editing UI.
///
/// `None` yields an empty bundle, which the UI reads as "nothing selected
/// yet". Entries that are not choices contribute their selected string, if
/// any, and empty label and value arrays.
pub fn convert_choice_metadata(entry: Option<&RestrictionEntry>) -> Bundle {
    let mut choice_data = Bundle::new();
    if let Some(entry) = entry {
        choice_data.put_string(
            CHOICE_SELECTED_VALUE,
            entry.selected_string().map(str::to_owned),
        );
        choice_data.put_string_array(CHOICE_ENTRIES, entry.choice_entries().to_vec());
        choice_data.put_string_array(CHOICE_VALUES, entry.choice_values().to_vec());
    }
    choice_data
}
