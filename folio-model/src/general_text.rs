use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{ContentEntity, ContentKind, SortKey, Validate};
use crate::error::{ValidationError, require};
use crate::lang::Lang;

/// Free-text dictionary entry (`general_text`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GeneralText {
    pub id: Uuid,
    pub key: String,
    pub text_es: String,
    pub text_en: String,
}

impl GeneralText {
    pub fn text(&self, lang: Lang) -> &str {
        lang.pick(&self.text_es, &self.text_en)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralTextDraft {
    pub key: String,
    pub text_es: String,
    pub text_en: String,
}

/// `key` is accepted only when it matches the stored key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralTextPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_es: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_en: Option<String>,
}

fn check(key: &str, text_es: &str, text_en: &str) -> Result<(), ValidationError> {
    require("key", key)?;
    require("text_es", text_es)?;
    require("text_en", text_en)
}

impl Validate for GeneralTextDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        check(&self.key, &self.text_es, &self.text_en)
    }
}

impl Validate for GeneralText {
    fn validate(&self) -> Result<(), ValidationError> {
        check(&self.key, &self.text_es, &self.text_en)
    }
}

impl ContentEntity for GeneralText {
    type Draft = GeneralTextDraft;
    type Patch = GeneralTextPatch;

    const KIND: ContentKind = ContentKind::GeneralText;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: GeneralTextDraft) -> Self {
        Self {
            id,
            key: draft.key,
            text_es: draft.text_es,
            text_en: draft.text_en,
        }
    }

    fn apply_patch(&mut self, patch: GeneralTextPatch) -> Result<(), ValidationError> {
        if let Some(key) = patch.key
            && key != self.key
        {
            return Err(ValidationError::ImmutableKey {
                current: self.key.clone(),
                requested: key,
            });
        }
        if let Some(text_es) = patch.text_es {
            self.text_es = text_es;
        }
        if let Some(text_en) = patch.text_en {
            self.text_en = text_en;
        }
        Ok(())
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Text(self.key.clone())
    }
}
