use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::general_text::GeneralText;
use crate::lang::Lang;

/// Key -> text dictionary for one language, built from `general_text` rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translations {
    pub lang: Lang,
    pub entries: HashMap<String, String>,
}

impl Translations {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            entries: HashMap::new(),
        }
    }

    pub fn from_rows<'a, I>(lang: Lang, rows: I) -> Self
    where
        I: IntoIterator<Item = &'a GeneralText>,
    {
        let entries = rows
            .into_iter()
            .map(|row| (row.key.clone(), row.text(lang).to_string()))
            .collect();
        Self { lang, entries }
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Looks up `key`; absent or empty entries resolve to the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        match self.entries.get(key) {
            Some(text) if !text.is_empty() => text,
            _ => key,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
