// SPDX-License-Identifier: Apache-2.0

use crate::error::DuckLakeResult;
use crate::quote::{option_name, quote_literal};
use crate::value::Value;

/// Ordered `NAME value` pairs used by `ATTACH` and `CREATE SECRET`.
///
/// Only options that were inserted are rendered; an absent option lets the
/// engine apply its own default, which is not the same as passing `NULL`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    entries: Vec<(String, Value)>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing an earlier value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Set an option only when a value is present
    pub fn insert_opt<V: Into<Value>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `NAME value, NAME value`
    pub fn render(&self) -> DuckLakeResult<String> {
        let parts = self
            .entries
            .iter()
            .map(|(key, value)| Ok(format!("{} {}", option_name(key)?, quote_literal(value)?)))
            .collect::<DuckLakeResult<Vec<_>>>()?;
        Ok(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DuckLakeError;

    #[test]
    fn test_render_in_insertion_order() {
        let mut options = OptionSet::new();
        options.insert("type", "s3").insert("provider", "credential_chain");
        assert_eq!(
            options.render().unwrap(),
            "TYPE 's3', PROVIDER 'credential_chain'"
        );
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut options = OptionSet::new();
        options.insert("read_only", false).insert("READ_ONLY", true);
        assert_eq!(options.len(), 1);
        assert_eq!(options.render().unwrap(), "READ_ONLY true");
    }

    #[test]
    fn test_insert_opt_skips_absent() {
        let mut options = OptionSet::new();
        options
            .insert_opt("snapshot_version", None::<i64>)
            .insert_opt("data_inlining_row_limit", Some(10));
        assert!(!options.contains("snapshot_version"));
        assert_eq!(options.render().unwrap(), "DATA_INLINING_ROW_LIMIT 10");
    }

    #[test]
    fn test_render_rejects_bad_keys() {
        let mut options = OptionSet::new();
        options.insert("data_path) ; DROP", "x");
        assert!(matches!(
            options.render(),
            Err(DuckLakeError::InvalidOptionName(_))
        ));
    }

    #[test]
    fn test_render_escapes_values() {
        let mut options = OptionSet::new();
        options.insert("data_path", "/tmp/it's");
        assert_eq!(options.render().unwrap(), "DATA_PATH '/tmp/it''s'");
    }
}
