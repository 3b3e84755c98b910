//! Field-keyed error messages shared by local and server validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One message per invalid field.
///
/// Both local draft validation and 422 responses from the API land in this
/// map, so a form renders errors the same way regardless of their source.
/// Keys are ordered, which keeps iteration deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a server error map, keeping the first message per field.
    ///
    /// Fields with no messages are skipped.
    pub fn from_server<I, K, V>(errors: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = String>,
    {
        let map = errors
            .into_iter()
            .filter_map(|(field, messages)| {
                messages
                    .into_iter()
                    .next()
                    .map(|first| (field.into(), first))
            })
            .collect();
        Self(map)
    }

    /// Record an error for a field unless one is already present.
    ///
    /// The first rule to fail for a field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Overwrite the message for every field present in `other`.
    ///
    /// Fields absent from `other` are left untouched.
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    /// Remove the error for one field.
    pub fn clear_field(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    /// Remove every error.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Message for a field, if it is invalid.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether the field has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Whether no field has an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
