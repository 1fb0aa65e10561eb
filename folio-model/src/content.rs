use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::lang::Lang;

/// The six content tables managed by the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    GeneralText,
    Hero,
    Projects,
    Experience,
    Technologies,
    SocialLinks,
}

impl ContentKind {
    pub const ALL: [ContentKind; 6] = [
        ContentKind::GeneralText,
        ContentKind::Hero,
        ContentKind::Projects,
        ContentKind::Experience,
        ContentKind::Technologies,
        ContentKind::SocialLinks,
    ];

    /// Table name, also used as the admin route segment.
    pub fn table(self) -> &'static str {
        match self {
            ContentKind::GeneralText => "general_text",
            ContentKind::Hero => "hero",
            ContentKind::Projects => "projects",
            ContentKind::Experience => "experience",
            ContentKind::Technologies => "technologies",
            ContentKind::SocialLinks => "social_links",
        }
    }

    /// Admin sidebar title.
    pub fn title(self) -> &'static str {
        match self {
            ContentKind::GeneralText => "Textos Generales",
            ContentKind::Hero => "Sección Hero",
            ContentKind::Projects => "Proyectos",
            ContentKind::Experience => "Experiencia",
            ContentKind::Technologies => "Tecnologías",
            ContentKind::SocialLinks => "Redes Sociales",
        }
    }

    pub fn is_ordered(self) -> bool {
        matches!(
            self,
            ContentKind::Projects | ContentKind::Experience | ContentKind::Technologies
        )
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for ContentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.table() == s)
            .ok_or_else(|| ValidationError::Invalid(format!("unknown section `{s}`")))
    }
}

/// Listing position of a row within its table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Order(i32),
    Text(String),
    /// Insertion order (singleton tables).
    Unordered,
}

/// Required-field checks run before anything reaches the store.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// A row of one of the content tables together with its write shapes.
pub trait ContentEntity:
    Clone + fmt::Debug + Send + Sync + Serialize + DeserializeOwned + Validate + 'static
{
    /// Insert payload.
    type Draft: Validate + Clone + fmt::Debug + Send + Sync + DeserializeOwned + 'static;
    /// Update payload; `None` fields keep their current value.
    type Patch: Clone + fmt::Debug + Default + Send + Sync + DeserializeOwned + 'static;

    const KIND: ContentKind;

    fn id(&self) -> Uuid;

    fn from_draft(id: Uuid, draft: Self::Draft) -> Self;

    /// Applies `patch` in place. Rejects patches that touch immutable
    /// fields; required-field checks happen afterwards via [`Validate`].
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<(), ValidationError>;

    fn sort_key(&self) -> SortKey;

    /// Fills a missing `order` on `draft` for a table currently holding
    /// `count` rows. Tables without an order column leave the draft alone.
    fn fill_draft_order(_draft: &mut Self::Draft, _count: usize) {}
}

/// Entities carrying a client-controlled `order` column.
pub trait OrderedEntity: ContentEntity {
    fn order(&self) -> i32;
    fn set_order(&mut self, order: i32);
}

/// Projection of a bilingual row to a language-agnostic view.
pub trait Localize {
    type View: Serialize;

    fn localize(&self, lang: Lang) -> Self::View;
}
