use folio_model::{
    ContentKind, ExperienceView, HeroView, Lang, Localize, ProjectView, SocialLinkView,
    TechnologyView, Translations,
};
use serde::Serialize;
use tracing::warn;

use crate::database::ContentStores;
use crate::error::Result;

/// Everything the public page renders, projected to one language.
#[derive(Debug, Clone, Serialize)]
pub struct PageContent {
    pub lang: Lang,
    pub hero: Option<HeroView>,
    pub projects: Vec<ProjectView>,
    pub experience: Vec<ExperienceView>,
    pub technologies: Vec<TechnologyView>,
    pub social_links: Vec<SocialLinkView>,
    pub texts: Translations,
}

impl PageContent {
    /// Dictionary lookup; falls back to `key`.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.texts.t(key)
    }
}

/// Read side of the public site.
#[derive(Debug, Clone)]
pub struct PageService {
    stores: ContentStores,
}

fn or_empty<T>(kind: ContentKind, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        warn!(section = kind.table(), error = %err, "failed to load page section");
        Vec::new()
    })
}

impl PageService {
    pub fn new(stores: ContentStores) -> Self {
        Self { stores }
    }

    /// Loads all six sources concurrently. A failing source renders empty;
    /// this never fails as a whole.
    pub async fn load(&self, lang: Lang) -> PageContent {
        let (hero, projects, experience, technologies, social_links, texts) = tokio::join!(
            self.stores.hero.list(),
            self.stores.projects.list(),
            self.stores.experience.list(),
            self.stores.technologies.list(),
            self.stores.social_links.list(),
            self.stores.general_text.list(),
        );

        let social_links = or_empty(ContentKind::SocialLinks, social_links)
            .iter()
            .filter_map(|link| {
                let view = link.localize(lang);
                if view.is_none() {
                    warn!(name = %link.name, icon_key = %link.icon_key, "skipping social link with unknown icon");
                }
                view
            })
            .collect();

        PageContent {
            lang,
            hero: or_empty(ContentKind::Hero, hero)
                .first()
                .map(|hero| hero.localize(lang)),
            projects: or_empty(ContentKind::Projects, projects)
                .iter()
                .map(|project| project.localize(lang))
                .collect(),
            experience: or_empty(ContentKind::Experience, experience)
                .iter()
                .map(|item| item.localize(lang))
                .collect(),
            technologies: or_empty(ContentKind::Technologies, technologies)
                .iter()
                .map(|tech| tech.localize(lang))
                .collect(),
            social_links,
            texts: Translations::from_rows(lang, &or_empty(ContentKind::GeneralText, texts)),
        }
    }
}
