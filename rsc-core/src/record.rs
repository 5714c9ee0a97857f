use std::collections::BTreeMap;

/// Fields of one export entry keyed by lower-cased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. The key is trimmed and lower-cased; a later insert of
    /// the same key replaces the earlier value.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.fields
            .insert(key.trim().to_ascii_lowercase(), value.into());
    }

    /// Return the value stored for `key` (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Return the value of the first alias carrying non-blank text, or `""`.
    pub fn first_non_empty(&self, aliases: &[&str]) -> &str {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .find(|value| !value.trim().is_empty())
            .unwrap_or_default()
    }

    /// Field names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key.as_ref(), value);
        }
        record
    }
}
