use serde::{Deserialize, Serialize};

use crate::content::ContentEntity;
use crate::error::ValidationError;

/// Ordered list of strings as edited by the admin array inputs
/// (`tech`, `gallery_urls`, `technologies`, `description_items_*`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl StringList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` unless it is blank or already present. Returns whether
    /// the list changed.
    pub fn push_unique(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.trim().is_empty() || self.0.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    /// Removes every occurrence of `value`.
    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != value);
        before != self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// One add/remove from an admin array input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListEdit {
    Add,
    Remove,
}

impl StringList {
    /// Returns whether the list changed.
    pub fn apply(&mut self, edit: ListEdit, value: &str) -> bool {
        match edit {
            ListEdit::Add => self.push_unique(value.trim()),
            ListEdit::Remove => self.remove(value),
        }
    }
}

/// Rows with string-array columns edited one entry at a time.
pub trait ListFields: ContentEntity {
    fn list_mut(&mut self, field: &str) -> Option<&mut Vec<String>>;

    /// Applies `edit` to `field`. Unknown fields are rejected.
    fn edit_list(
        &mut self,
        field: &str,
        edit: ListEdit,
        value: &str,
    ) -> Result<bool, ValidationError> {
        let list = self
            .list_mut(field)
            .ok_or_else(|| ValidationError::UnknownListField(field.to_string()))?;
        let mut values = StringList::from(std::mem::take(list));
        let changed = values.apply(edit, value);
        *list = values.into_inner();
        Ok(changed)
    }
}

impl From<Vec<String>> for StringList {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<StringList> for Vec<String> {
    fn from(list: StringList) -> Self {
        list.0
    }
}

/// Optional URL columns store `None` instead of an empty string.
pub fn optional_url(value: Option<String>) -> Option<String> {
    value.filter(|url| !url.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_unique_skips_blanks_and_duplicates() {
        let mut list = StringList::new();
        assert!(list.push_unique("Rust"));
        assert!(!list.push_unique("Rust"));
        assert!(!list.push_unique("   "));
        assert!(list.push_unique("Postgres"));
        assert_eq!(list.as_slice(), ["Rust", "Postgres"]);
    }

    #[test]
    fn remove_drops_matching_entries() {
        let mut list = StringList::from(vec!["a".to_string(), "b".to_string()]);
        assert!(list.remove("a"));
        assert!(!list.remove("z"));
        assert_eq!(list.into_inner(), vec!["b".to_string()]);
    }

    #[test]
    fn apply_trims_added_values() {
        let mut list = StringList::from(vec!["Rust".to_string()]);
        assert!(list.apply(ListEdit::Add, "  Axum "));
        assert!(!list.apply(ListEdit::Add, "Rust"));
        assert!(list.apply(ListEdit::Remove, "Rust"));
        assert_eq!(list.as_slice(), ["Axum"]);
    }

    #[test]
    fn empty_urls_become_none() {
        assert_eq!(optional_url(Some(String::new())), None);
        assert_eq!(
            optional_url(Some("https://example.dev".into())),
            Some("https://example.dev".into())
        );
    }
}
