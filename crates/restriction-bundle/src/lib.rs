//! Converts device-policy restriction entries into generic bundles.
//!
//! A list of [`RestrictionEntry`] values is mapped, one key per entry, into
//! an insertion-ordered [`Bundle`]. Bundle and bundle-array restrictions are
//! converted recursively. Choice restrictions are either collapsed to their
//! selected value (for the policy store) or expanded into a metadata bundle
//! (for the editing UI).
//!
//! ```
//! use restriction_bundle::{convert, RestrictionEntry};
//!
//! let bundle = convert(
//!     &[
//!         RestrictionEntry::boolean("allow_camera", false),
//!         RestrictionEntry::string("proxy", None),
//!     ],
//!     false,
//! )
//! .unwrap();
//! assert_eq!(bundle.get_bool("allow_camera"), Some(false));
//! assert_eq!(bundle.get_string("proxy"), Some(""));
//! ```

pub mod bundle;
pub mod convert;
pub mod error;
pub mod manifest;
pub mod options;
pub mod restriction;

pub use bundle::{Bundle, BundleValue};
pub use convert::{
    convert, convert_choice_metadata, RestrictionConverter, CHOICE_ENTRIES,
    CHOICE_SELECTED_VALUE, CHOICE_VALUES,
};
pub use error::{ConvertError, ManifestError};
pub use manifest::{parse_manifest, read_manifest, ManifestEntry};
pub use options::{ConvertOptions, DEFAULT_MAX_DEPTH};
pub use restriction::{Choice, RestrictionEntry, RestrictionType, RestrictionValue};
