use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{ContentEntity, ContentKind, Localize, SortKey, Validate};
use crate::error::{ValidationError, require};
use crate::icons::SocialIcon;
use crate::lang::Lang;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SocialLink {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub display_text_es: String,
    pub display_text_en: String,
    /// Stored verbatim; rows written outside the admin panel may carry keys
    /// with no glyph.
    pub icon_key: String,
}

impl SocialLink {
    pub fn icon(&self) -> Option<SocialIcon> {
        SocialIcon::from_key(&self.icon_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinkDraft {
    pub name: String,
    pub url: String,
    pub display_text_es: String,
    pub display_text_en: String,
    pub icon_key: String,
}

impl Default for SocialLinkDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            url: String::new(),
            display_text_es: String::new(),
            display_text_en: String::new(),
            icon_key: SocialIcon::Link.key().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinkPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text_es: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinkView {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub display_text: String,
    pub icon: SocialIcon,
}

fn check(name: &str, url: &str, icon_key: &str) -> Result<(), ValidationError> {
    require("name", name)?;
    require("url", url)?;
    icon_key.parse::<SocialIcon>().map(|_| ())
}

impl Validate for SocialLinkDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        check(&self.name, &self.url, &self.icon_key)
    }
}

impl Validate for SocialLink {
    fn validate(&self) -> Result<(), ValidationError> {
        check(&self.name, &self.url, &self.icon_key)
    }
}

impl ContentEntity for SocialLink {
    type Draft = SocialLinkDraft;
    type Patch = SocialLinkPatch;

    const KIND: ContentKind = ContentKind::SocialLinks;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: SocialLinkDraft) -> Self {
        Self {
            id,
            name: draft.name,
            url: draft.url,
            display_text_es: draft.display_text_es,
            display_text_en: draft.display_text_en,
            icon_key: draft.icon_key,
        }
    }

    fn apply_patch(&mut self, patch: SocialLinkPatch) -> Result<(), ValidationError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(text) = patch.display_text_es {
            self.display_text_es = text;
        }
        if let Some(text) = patch.display_text_en {
            self.display_text_en = text;
        }
        if let Some(icon_key) = patch.icon_key {
            self.icon_key = icon_key;
        }
        Ok(())
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Text(self.name.clone())
    }
}

/// `None` when the stored icon key has no glyph; such links are not rendered.
impl Localize for SocialLink {
    type View = Option<SocialLinkView>;

    fn localize(&self, lang: Lang) -> Option<SocialLinkView> {
        let icon = self.icon()?;
        Some(SocialLinkView {
            id: self.id,
            name: self.name.clone(),
            url: self.url.clone(),
            display_text: lang
                .pick(&self.display_text_es, &self.display_text_en)
                .clone(),
            icon,
        })
    }
}
