//! Conversion options.
//!
//! The platform capability for nested bundles is injected here instead of
//! being probed at runtime, so the same conversion runs unchanged on hosts
//! with and without nested bundle support.

use serde::Deserialize;

/// Default bound on bundle nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Expand choice restrictions into selection/entries/values bundles for
    /// the editing UI instead of storing only the selected value.
    pub save_choice_data_for_dialog: bool,
    /// Whether the host can store bundles and bundle arrays. When false,
    /// those entries are skipped with a warning.
    pub nested_bundles_supported: bool,
    /// Maximum bundle nesting below the top-level list.
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            save_choice_data_for_dialog: false,
            nested_bundles_supported: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConvertOptions {
    pub fn with_choice_data(mut self, save_choice_data_for_dialog: bool) -> Self {
        self.save_choice_data_for_dialog = save_choice_data_for_dialog;
        self
    }

    pub fn with_nested_bundles(mut self, supported: bool) -> Self {
        self.nested_bundles_supported = supported;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_policy_storage() {
        let options = ConvertOptions::default();
        assert!(!options.save_choice_data_for_dialog);
        assert!(options.nested_bundles_supported);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{"nested_bundles_supported": false}"#).unwrap();
        assert_eq!(
            options,
            ConvertOptions::default().with_nested_bundles(false)
        );
    }
}
