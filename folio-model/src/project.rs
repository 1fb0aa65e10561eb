use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{ContentEntity, ContentKind, Localize, OrderedEntity, SortKey, Validate};
use crate::error::{ValidationError, require};
use crate::lang::Lang;
use crate::lists::{ListFields, optional_url};
use crate::order;
use crate::upload::UploadSlot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Project {
    pub id: Uuid,
    pub order: i32,
    pub title_es: String,
    pub title_en: String,
    pub description_es: String,
    pub description_en: String,
    pub image_url: String,
    pub gallery_urls: Vec<String>,
    pub tech: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
}

impl Project {
    /// Feeds an uploaded URL into the main image or the gallery.
    pub fn apply_upload(&mut self, slot: UploadSlot, url: String) {
        match slot {
            UploadSlot::Replace => slot.apply_single(&mut self.image_url, url),
            UploadSlot::Append => slot.apply_list(&mut self.gallery_urls, url),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDraft {
    #[serde(deserialize_with = "order::coerce", skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    pub title_es: String,
    pub title_en: String,
    pub description_es: String,
    pub description_en: String,
    pub image_url: String,
    pub gallery_urls: Vec<String>,
    pub tech: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
}

impl ProjectDraft {
    pub fn apply_upload(&mut self, slot: UploadSlot, url: String) {
        match slot {
            UploadSlot::Replace => slot.apply_single(&mut self.image_url, url),
            UploadSlot::Append => slot.apply_list(&mut self.gallery_urls, url),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPatch {
    #[serde(deserialize_with = "order::coerce", skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_es: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_es: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<Vec<String>>,
    /// `Some("")` clears the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub gallery_urls: Vec<String>,
    pub tech: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
}

fn check(title_es: &str, title_en: &str) -> Result<(), ValidationError> {
    require("title_es", title_es)?;
    require("title_en", title_en)
}

impl Validate for ProjectDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        check(&self.title_es, &self.title_en)
    }
}

impl Validate for Project {
    fn validate(&self) -> Result<(), ValidationError> {
        check(&self.title_es, &self.title_en)
    }
}

impl ContentEntity for Project {
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    const KIND: ContentKind = ContentKind::Projects;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: ProjectDraft) -> Self {
        Self {
            id,
            order: draft.order.unwrap_or_default(),
            title_es: draft.title_es,
            title_en: draft.title_en,
            description_es: draft.description_es,
            description_en: draft.description_en,
            image_url: draft.image_url,
            gallery_urls: draft.gallery_urls,
            tech: draft.tech,
            live_url: optional_url(draft.live_url),
            github_url: optional_url(draft.github_url),
        }
    }

    fn apply_patch(&mut self, patch: ProjectPatch) -> Result<(), ValidationError> {
        let ProjectPatch {
            order,
            title_es,
            title_en,
            description_es,
            description_en,
            image_url,
            gallery_urls,
            tech,
            live_url,
            github_url,
        } = patch;
        if let Some(order) = order {
            self.order = order;
        }
        if let Some(value) = title_es {
            self.title_es = value;
        }
        if let Some(value) = title_en {
            self.title_en = value;
        }
        if let Some(value) = description_es {
            self.description_es = value;
        }
        if let Some(value) = description_en {
            self.description_en = value;
        }
        if let Some(value) = image_url {
            self.image_url = value;
        }
        if let Some(value) = gallery_urls {
            self.gallery_urls = value;
        }
        if let Some(value) = tech {
            self.tech = value;
        }
        if live_url.is_some() {
            self.live_url = optional_url(live_url);
        }
        if github_url.is_some() {
            self.github_url = optional_url(github_url);
        }
        Ok(())
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Order(self.order)
    }

    fn fill_draft_order(draft: &mut ProjectDraft, count: usize) {
        draft.order.get_or_insert_with(|| order::next_order(count));
    }
}

impl OrderedEntity for Project {
    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

impl ListFields for Project {
    fn list_mut(&mut self, field: &str) -> Option<&mut Vec<String>> {
        match field {
            "tech" => Some(&mut self.tech),
            "gallery_urls" => Some(&mut self.gallery_urls),
            _ => None,
        }
    }
}

impl Localize for Project {
    type View = ProjectView;

    fn localize(&self, lang: Lang) -> ProjectView {
        ProjectView {
            id: self.id,
            title: lang.pick(&self.title_es, &self.title_en).clone(),
            description: lang
                .pick(&self.description_es, &self.description_en)
                .clone(),
            image_url: self.image_url.clone(),
            gallery_urls: self.gallery_urls.clone(),
            tech: self.tech.clone(),
            live_url: self.live_url.clone(),
            github_url: self.github_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::ListEdit;

    fn project() -> Project {
        Project::from_draft(
            Uuid::new_v4(),
            ProjectDraft {
                order: Some(10),
                title_es: "Tienda".into(),
                title_en: "Store".into(),
                description_es: "Una tienda".into(),
                description_en: "A store".into(),
                image_url: "https://cdn.example/p/main.png".into(),
                gallery_urls: vec!["https://cdn.example/p/1.png".into()],
                tech: vec!["Rust".into(), "Postgres".into()],
                live_url: Some(String::new()),
                github_url: Some("https://github.com/example/store".into()),
            },
        )
    }

    #[test]
    fn tech_edits_skip_duplicates_and_blanks() {
        let mut project = project();
        assert_eq!(project.edit_list("tech", ListEdit::Add, "Rust"), Ok(false));
        assert_eq!(project.edit_list("tech", ListEdit::Add, " "), Ok(false));
        assert_eq!(project.edit_list("tech", ListEdit::Add, "Axum"), Ok(true));
        assert_eq!(project.tech, ["Rust", "Postgres", "Axum"]);
        assert_eq!(
            project.edit_list("title_en", ListEdit::Add, "x"),
            Err(ValidationError::UnknownListField("title_en".into()))
        );
    }

    #[test]
    fn empty_live_url_is_stored_as_none() {
        let project = project();
        assert_eq!(project.live_url, None);
        assert!(project.github_url.is_some());
    }

    #[test]
    fn localized_view_preserves_arrays_in_order() {
        let project = project();
        let view = project.localize(Lang::En);
        assert_eq!(view.title, "Store");
        assert_eq!(view.description, "A store");
        assert_eq!(view.tech, vec!["Rust".to_string(), "Postgres".to_string()]);
        assert_eq!(project.title_es, "Tienda");
    }

    #[test]
    fn uploads_replace_image_or_append_to_gallery() {
        let mut project = project();
        project.apply_upload(UploadSlot::Replace, "https://cdn.example/p/new.png".into());
        assert_eq!(project.image_url, "https://cdn.example/p/new.png");
        assert_eq!(project.gallery_urls.len(), 1);

        project.apply_upload(UploadSlot::Append, "https://cdn.example/p/2.png".into());
        assert_eq!(
            project.gallery_urls,
            vec![
                "https://cdn.example/p/1.png".to_string(),
                "https://cdn.example/p/2.png".to_string()
            ]
        );
        assert_eq!(project.image_url, "https://cdn.example/p/new.png");
    }

    #[test]
    fn draft_deserializes_with_coerced_order() {
        let draft: ProjectDraft =
            serde_json::from_str(r#"{"order":"30","title_es":"a","title_en":"b"}"#).unwrap();
        assert_eq!(draft.order, Some(30));
        assert!(draft.tech.is_empty());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn missing_order_is_appended_after_existing_rows() {
        let mut draft = ProjectDraft::default();
        Project::fill_draft_order(&mut draft, 3);
        assert_eq!(draft.order, Some(40));

        let mut explicit = ProjectDraft {
            order: Some(5),
            ..Default::default()
        };
        Project::fill_draft_order(&mut explicit, 3);
        assert_eq!(explicit.order, Some(5));
    }

    #[test]
    fn missing_titles_fail_validation() {
        let draft: ProjectDraft = serde_json::from_str(r#"{"title_es":"a"}"#).unwrap();
        assert_eq!(draft.validate(), Err(ValidationError::Required("title_en")));
    }
}
