use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{ContentEntity, ContentKind, Localize, SortKey, Validate};
use crate::error::ValidationError;
use crate::lang::Lang;
use crate::upload::UploadSlot;

/// Landing section. Only the first row is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Hero {
    pub id: Uuid,
    pub greeting_es: String,
    pub greeting_en: String,
    pub title: String,
    pub subtitle_es: String,
    pub subtitle_en: String,
    pub cv_url: String,
}

impl Hero {
    pub fn apply_upload(&mut self, url: String) {
        UploadSlot::Replace.apply_single(&mut self.cv_url, url);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroDraft {
    pub greeting_es: String,
    pub greeting_en: String,
    pub title: String,
    pub subtitle_es: String,
    pub subtitle_en: String,
    pub cv_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting_es: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_es: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroView {
    pub greeting: String,
    pub title: String,
    pub subtitle: String,
    pub cv_url: String,
}

impl Validate for HeroDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for Hero {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl ContentEntity for Hero {
    type Draft = HeroDraft;
    type Patch = HeroPatch;

    const KIND: ContentKind = ContentKind::Hero;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: HeroDraft) -> Self {
        Self {
            id,
            greeting_es: draft.greeting_es,
            greeting_en: draft.greeting_en,
            title: draft.title,
            subtitle_es: draft.subtitle_es,
            subtitle_en: draft.subtitle_en,
            cv_url: draft.cv_url,
        }
    }

    fn apply_patch(&mut self, patch: HeroPatch) -> Result<(), ValidationError> {
        let HeroPatch {
            greeting_es,
            greeting_en,
            title,
            subtitle_es,
            subtitle_en,
            cv_url,
        } = patch;
        if let Some(value) = greeting_es {
            self.greeting_es = value;
        }
        if let Some(value) = greeting_en {
            self.greeting_en = value;
        }
        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = subtitle_es {
            self.subtitle_es = value;
        }
        if let Some(value) = subtitle_en {
            self.subtitle_en = value;
        }
        if let Some(value) = cv_url {
            self.cv_url = value;
        }
        Ok(())
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Unordered
    }
}

impl Localize for Hero {
    type View = HeroView;

    fn localize(&self, lang: Lang) -> HeroView {
        HeroView {
            greeting: lang.pick(&self.greeting_es, &self.greeting_en).clone(),
            title: self.title.clone(),
            subtitle: lang.pick(&self.subtitle_es, &self.subtitle_en).clone(),
            cv_url: self.cv_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Hero {
        Hero {
            id: Uuid::new_v4(),
            greeting_es: "Hola, soy".into(),
            greeting_en: "Hi, I'm".into(),
            title: "Gerardo Franco".into(),
            subtitle_es: "Desarrollador Full-Stack".into(),
            subtitle_en: "Full-Stack Developer".into(),
            cv_url: "https://cdn.example/cvs/cv.pdf".into(),
        }
    }

    #[test]
    fn localize_picks_language_columns_and_keeps_shared_fields() {
        let hero = hero();
        let en = hero.localize(Lang::En);
        assert_eq!(en.greeting, "Hi, I'm");
        assert_eq!(en.subtitle, "Full-Stack Developer");
        assert_eq!(en.title, hero.title);

        let es = hero.localize(Lang::Es);
        assert_eq!(es.greeting, hero.greeting_es);
        assert_eq!(es.cv_url, hero.cv_url);
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut hero = hero();
        hero.apply_patch(HeroPatch {
            cv_url: Some("https://cdn.example/cvs/new.pdf".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(hero.cv_url, "https://cdn.example/cvs/new.pdf");
        assert_eq!(hero.greeting_es, "Hola, soy");
    }
}
