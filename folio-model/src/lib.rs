//! Core content model definitions shared across Folio crates.
#![allow(missing_docs)]

pub mod content;
pub mod error;
pub mod experience;
pub mod general_text;
pub mod hero;
pub mod i18n;
pub mod icons;
pub mod lang;
pub mod lists;
pub mod order;
pub mod project;
pub mod social_link;
pub mod technology;
pub mod upload;

// Intentionally curated re-exports for downstream consumers.
pub use content::{
    ContentEntity, ContentKind, Localize, OrderedEntity, SortKey, Validate,
};
pub use error::ValidationError;
pub use experience::{Experience, ExperienceDraft, ExperiencePatch, ExperienceView};
pub use general_text::{GeneralText, GeneralTextDraft, GeneralTextPatch};
pub use hero::{Hero, HeroDraft, HeroPatch, HeroView};
pub use i18n::Translations;
pub use icons::SocialIcon;
pub use lang::Lang;
pub use lists::{ListEdit, ListFields, StringList};
pub use order::{Direction, ORDER_STEP, OrderUpdate};
pub use project::{Project, ProjectDraft, ProjectPatch, ProjectView};
pub use social_link::{SocialLink, SocialLinkDraft, SocialLinkPatch, SocialLinkView};
pub use technology::{
    TechCategory, Technology, TechnologyDraft, TechnologyPatch, TechnologyView,
};
pub use upload::{Bucket, UploadSlot};
