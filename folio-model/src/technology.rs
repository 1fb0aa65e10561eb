use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{ContentEntity, ContentKind, Localize, OrderedEntity, SortKey, Validate};
use crate::error::{ValidationError, require};
use crate::lang::Lang;
use crate::order;
use crate::upload::UploadSlot;

/// Which block of the skills section a technology is listed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechCategory {
    #[default]
    Dominant,
    Knowledge,
}

impl TechCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TechCategory::Dominant => "dominant",
            TechCategory::Knowledge => "knowledge",
        }
    }
}

impl fmt::Display for TechCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TechCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dominant" => Ok(TechCategory::Dominant),
            "knowledge" => Ok(TechCategory::Knowledge),
            other => Err(ValidationError::UnknownCategory(other.to_string())),
        }
    }
}

impl TryFrom<String> for TechCategory {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Technology {
    pub id: Uuid,
    pub order: i32,
    pub name: String,
    pub logo_url: String,
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub category: TechCategory,
}

impl Technology {
    pub fn apply_upload(&mut self, url: String) {
        UploadSlot::Replace.apply_single(&mut self.logo_url, url);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnologyDraft {
    #[serde(deserialize_with = "order::coerce", skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    pub name: String,
    pub logo_url: String,
    pub category: TechCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnologyPatch {
    #[serde(deserialize_with = "order::coerce", skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TechCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologyView {
    pub id: Uuid,
    pub name: String,
    pub logo_url: String,
    pub category: TechCategory,
}

impl Validate for TechnologyDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)
    }
}

impl Validate for Technology {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)
    }
}

impl ContentEntity for Technology {
    type Draft = TechnologyDraft;
    type Patch = TechnologyPatch;

    const KIND: ContentKind = ContentKind::Technologies;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: TechnologyDraft) -> Self {
        Self {
            id,
            order: draft.order.unwrap_or_default(),
            name: draft.name,
            logo_url: draft.logo_url,
            category: draft.category,
        }
    }

    fn apply_patch(&mut self, patch: TechnologyPatch) -> Result<(), ValidationError> {
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(logo_url) = patch.logo_url {
            self.logo_url = logo_url;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        Ok(())
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Order(self.order)
    }

    fn fill_draft_order(draft: &mut TechnologyDraft, count: usize) {
        draft.order.get_or_insert_with(|| order::next_order(count));
    }
}

impl OrderedEntity for Technology {
    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

// No bilingual columns; the view only drops `order`.
impl Localize for Technology {
    type View = TechnologyView;

    fn localize(&self, _lang: Lang) -> TechnologyView {
        TechnologyView {
            id: self.id,
            name: self.name.clone(),
            logo_url: self.logo_url.clone(),
            category: self.category,
        }
    }
}
