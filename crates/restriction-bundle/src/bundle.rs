//! Bundle: the generic, insertion-ordered key-value container.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Dynamically typed bundle value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BundleValue {
    Bool(bool),
    Int(i32),
    /// A string slot. `None` is a stored null, distinct from a missing key.
    String(Option<String>),
    StringArray(Vec<String>),
    Bundle(Bundle),
    BundleArray(Vec<Bundle>),
}

impl BundleValue {
    pub fn to_json(&self) -> Value {
        match self {
            BundleValue::Bool(b) => Value::Bool(*b),
            BundleValue::Int(i) => Value::from(*i),
            BundleValue::String(Some(s)) => Value::String(s.clone()),
            BundleValue::String(None) => Value::Null,
            BundleValue::StringArray(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            BundleValue::Bundle(bundle) => bundle.to_json(),
            BundleValue::BundleArray(bundles) => {
                Value::Array(bundles.iter().map(Bundle::to_json).collect())
            }
        }
    }
}

/// Insertion-ordered map from key to [`BundleValue`].
///
/// Re-putting an existing key replaces the value in place, so the key keeps
/// its original position. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bundle {
    entries: IndexMap<String, BundleValue>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&BundleValue> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BundleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn put(&mut self, key: impl Into<String>, value: BundleValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn put_boolean(&mut self, key: impl Into<String>, value: bool) {
        self.put(key, BundleValue::Bool(value));
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i32) {
        self.put(key, BundleValue::Int(value));
    }

    pub fn put_string(&mut self, key: impl Into<String>, value: Option<String>) {
        self.put(key, BundleValue::String(value));
    }

    pub fn put_string_array(&mut self, key: impl Into<String>, value: Vec<String>) {
        self.put(key, BundleValue::StringArray(value));
    }

    pub fn put_bundle(&mut self, key: impl Into<String>, value: Bundle) {
        self.put(key, BundleValue::Bundle(value));
    }

    pub fn put_bundle_array(&mut self, key: impl Into<String>, value: Vec<Bundle>) {
        self.put(key, BundleValue::BundleArray(value));
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            BundleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            BundleValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// String stored under `key`. Missing keys, stored nulls and non-string
    /// values all read as `None`; use [`Bundle::get`] to tell them apart.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            BundleValue::String(s) => s.as_deref(),
            _ => None,
        }
    }

    pub fn get_string_array(&self, key: &str) -> Option<&[String]> {
        match self.get(key)? {
            BundleValue::StringArray(items) => Some(items),
            _ => None,
        }
    }

    pub fn get_bundle(&self, key: &str) -> Option<&Bundle> {
        match self.get(key)? {
            BundleValue::Bundle(bundle) => Some(bundle),
            _ => None,
        }
    }

    pub fn get_bundle_array(&self, key: &str) -> Option<&[Bundle]> {
        match self.get(key)? {
            BundleValue::BundleArray(bundles) => Some(bundles),
            _ => None,
        }
    }

    /// JSON object view with keys in insertion order.
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            map.insert(key.clone(), value.to_json());
        }
        Value::Object(map)
    }
}

impl<'a> IntoIterator for &'a Bundle {
    type Item = (&'a String, &'a BundleValue);
    type IntoIter = indexmap::map::Iter<'a, String, BundleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_getters_match_put_type() {
        let mut bundle = Bundle::new();
        bundle.put_boolean("b", true);
        bundle.put_int("i", -7);
        bundle.put_string("s", Some("x".into()));
        bundle.put_string_array("a", vec!["p".into(), "q".into()]);

        assert_eq!(bundle.get_bool("b"), Some(true));
        assert_eq!(bundle.get_int("i"), Some(-7));
        assert_eq!(bundle.get_string("s"), Some("x"));
        assert_eq!(
            bundle.get_string_array("a"),
            Some(&["p".to_string(), "q".to_string()][..])
        );
        assert_eq!(bundle.get_int("b"), None);
        assert_eq!(bundle.get_bool("missing"), None);
    }

    #[test]
    fn null_string_is_stored_not_missing() {
        let mut bundle = Bundle::new();
        bundle.put_string("n", None);
        assert!(bundle.contains_key("n"));
        assert_eq!(bundle.get("n"), Some(&BundleValue::String(None)));
        assert_eq!(bundle.get_string("n"), None);
    }

    #[test]
    fn last_write_wins_keeps_position() {
        let mut bundle = Bundle::new();
        bundle.put_int("a", 1);
        bundle.put_int("b", 2);
        bundle.put_boolean("a", false);
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(bundle.get_bool("a"), Some(false));
    }

    #[test]
    fn to_json_preserves_insertion_order() {
        let mut inner = Bundle::new();
        inner.put_string("z", None);
        let mut bundle = Bundle::new();
        bundle.put_int("zeta", 1);
        bundle.put_bundle("alpha", inner.clone());
        bundle.put_bundle_array("mid", vec![inner, Bundle::new()]);

        let value = bundle.to_json();
        assert_eq!(
            value,
            json!({"zeta": 1, "alpha": {"z": null}, "mid": [{"z": null}, {}]})
        );
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn serialize_matches_to_json() {
        let mut bundle = Bundle::new();
        bundle.put_string("s", Some(String::new()));
        bundle.put_string_array("a", vec![]);
        bundle.put_boolean("b", false);
        let serialized = serde_json::to_value(&bundle).unwrap();
        assert_eq!(serialized, bundle.to_json());
    }

    #[test]
    fn borrowed_iteration_yields_insertion_order() {
        let mut bundle = Bundle::new();
        bundle.put_int("second", 2);
        bundle.put_boolean("first", true);
        let mut seen = Vec::new();
        for (key, value) in &bundle {
            seen.push((key.clone(), value.clone()));
        }
        assert_eq!(
            seen,
            vec![
                ("second".to_string(), BundleValue::Int(2)),
                ("first".to_string(), BundleValue::Bool(true)),
            ]
        );
        assert_eq!(bundle.iter().count(), 2);
    }

    #[test]
    fn equality_ignores_order() {
        let mut a = Bundle::new();
        a.put_int("x", 1);
        a.put_int("y", 2);
        let mut b = Bundle::new();
        b.put_int("y", 2);
        b.put_int("x", 1);
        assert_eq!(a, b);
    }
}
