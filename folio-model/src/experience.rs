use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{ContentEntity, ContentKind, Localize, OrderedEntity, SortKey, Validate};
use crate::error::{ValidationError, require};
use crate::lang::Lang;
use crate::lists::ListFields;
use crate::order;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Experience {
    pub id: Uuid,
    pub order: i32,
    pub position_es: String,
    pub position_en: String,
    pub company: String,
    pub period_es: String,
    pub period_en: String,
    pub description_items_es: Vec<String>,
    pub description_items_en: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceDraft {
    #[serde(deserialize_with = "order::coerce", skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    pub position_es: String,
    pub position_en: String,
    pub company: String,
    pub period_es: String,
    pub period_en: String,
    pub description_items_es: Vec<String>,
    pub description_items_en: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperiencePatch {
    #[serde(deserialize_with = "order::coerce", skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_es: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_es: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_items_es: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_items_en: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceView {
    pub id: Uuid,
    pub position: String,
    pub company: String,
    pub period: String,
    pub description_items: Vec<String>,
    pub technologies: Vec<String>,
}

fn check(company: &str, position_es: &str, position_en: &str) -> Result<(), ValidationError> {
    require("company", company)?;
    require("position_es", position_es)?;
    require("position_en", position_en)
}

impl Validate for ExperienceDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        check(&self.company, &self.position_es, &self.position_en)
    }
}

impl Validate for Experience {
    fn validate(&self) -> Result<(), ValidationError> {
        check(&self.company, &self.position_es, &self.position_en)
    }
}

impl ContentEntity for Experience {
    type Draft = ExperienceDraft;
    type Patch = ExperiencePatch;

    const KIND: ContentKind = ContentKind::Experience;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: ExperienceDraft) -> Self {
        Self {
            id,
            order: draft.order.unwrap_or_default(),
            position_es: draft.position_es,
            position_en: draft.position_en,
            company: draft.company,
            period_es: draft.period_es,
            period_en: draft.period_en,
            description_items_es: draft.description_items_es,
            description_items_en: draft.description_items_en,
            technologies: draft.technologies,
        }
    }

    fn apply_patch(&mut self, patch: ExperiencePatch) -> Result<(), ValidationError> {
        let ExperiencePatch {
            order,
            position_es,
            position_en,
            company,
            period_es,
            period_en,
            description_items_es,
            description_items_en,
            technologies,
        } = patch;
        if let Some(order) = order {
            self.order = order;
        }
        if let Some(value) = position_es {
            self.position_es = value;
        }
        if let Some(value) = position_en {
            self.position_en = value;
        }
        if let Some(value) = company {
            self.company = value;
        }
        if let Some(value) = period_es {
            self.period_es = value;
        }
        if let Some(value) = period_en {
            self.period_en = value;
        }
        if let Some(value) = description_items_es {
            self.description_items_es = value;
        }
        if let Some(value) = description_items_en {
            self.description_items_en = value;
        }
        if let Some(value) = technologies {
            self.technologies = value;
        }
        Ok(())
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Order(self.order)
    }

    fn fill_draft_order(draft: &mut ExperienceDraft, count: usize) {
        draft.order.get_or_insert_with(|| order::next_order(count));
    }
}

impl OrderedEntity for Experience {
    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

impl ListFields for Experience {
    fn list_mut(&mut self, field: &str) -> Option<&mut Vec<String>> {
        match field {
            "technologies" => Some(&mut self.technologies),
            "description_items_es" => Some(&mut self.description_items_es),
            "description_items_en" => Some(&mut self.description_items_en),
            _ => None,
        }
    }
}

impl Localize for Experience {
    type View = ExperienceView;

    fn localize(&self, lang: Lang) -> ExperienceView {
        ExperienceView {
            id: self.id,
            position: lang.pick(&self.position_es, &self.position_en).clone(),
            company: self.company.clone(),
            period: lang.pick(&self.period_es, &self.period_en).clone(),
            description_items: lang
                .pick(&self.description_items_es, &self.description_items_en)
                .clone(),
            technologies: self.technologies.clone(),
        }
    }
}
