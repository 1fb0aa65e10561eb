#![allow(dead_code)]

use std::sync::Arc;

use axum::http::HeaderValue;
use axum_test::TestServer;
use folio_config::ConfigLoader;
use folio_config::sources::EnvConfig;
use folio_core::content::AccessGate;
use folio_core::content::access::ADMIN_ROLE;
use folio_core::database::ContentStores;
use folio_core::testing::{MemoryRoles, MemoryStorage, MemoryStore, StaticAuth};
use folio_model::{
    ContentEntity, Experience, GeneralText, GeneralTextDraft, Hero, HeroDraft, Project,
    ProjectDraft, SocialLink, Technology,
};
use folio_server::{AppState, create_app};
use uuid::Uuid;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const EDITOR_TOKEN: &str = "editor-token";
pub const ADMIN_EMAIL: &str = "admin@example.dev";
pub const ADMIN_PASSWORD: &str = "correct horse";

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub general_text: Arc<MemoryStore<GeneralText>>,
    pub hero: Arc<MemoryStore<Hero>>,
    pub projects: Arc<MemoryStore<Project>>,
    pub experience: Arc<MemoryStore<Experience>>,
    pub technologies: Arc<MemoryStore<Technology>>,
    pub social_links: Arc<MemoryStore<SocialLink>>,
    pub storage: Arc<MemoryStorage>,
}

#[derive(Default)]
pub struct Seed {
    pub general_text: Vec<GeneralText>,
    pub hero: Vec<Hero>,
    pub projects: Vec<Project>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_seed(Seed::default())
    }

    pub fn with_seed(seed: Seed) -> Self {
        let config = ConfigLoader::new()
            .load_with_env(EnvConfig {
                dev_mode: Some(true),
                ..EnvConfig::default()
            })
            .expect("dev config loads")
            .config;

        let general_text = Arc::new(MemoryStore::with_rows(seed.general_text));
        let hero = Arc::new(MemoryStore::with_rows(seed.hero));
        let projects = Arc::new(MemoryStore::with_rows(seed.projects));
        let experience = Arc::new(MemoryStore::<Experience>::new());
        let technologies = Arc::new(MemoryStore::<Technology>::new());
        let social_links = Arc::new(MemoryStore::<SocialLink>::new());
        let stores = ContentStores {
            general_text: general_text.clone(),
            hero: hero.clone(),
            projects: projects.clone(),
            experience: experience.clone(),
            technologies: technologies.clone(),
            social_links: social_links.clone(),
        };

        let admin = Uuid::new_v4();
        let editor = Uuid::new_v4();
        let auth = StaticAuth::default()
            .with_user(ADMIN_TOKEN, admin, ADMIN_EMAIL, ADMIN_PASSWORD)
            .with_user(EDITOR_TOKEN, editor, "editor@example.dev", "editor");
        let roles = MemoryRoles::default();
        roles.grant(admin, ADMIN_ROLE);
        roles.grant(editor, "editor");

        let storage = Arc::new(MemoryStorage::default());
        let state = AppState::new(
            Arc::new(config),
            stores,
            AccessGate::new(Arc::new(auth), Arc::new(roles)),
            storage.clone(),
        );
        let server = TestServer::new(create_app(state.clone())).expect("test server");

        Self {
            server,
            state,
            general_text,
            hero,
            projects,
            experience,
            technologies,
            social_links,
            storage,
        }
    }

    pub fn total_writes(&self) -> usize {
        self.general_text.write_count()
            + self.hero.write_count()
            + self.projects.write_count()
            + self.experience.write_count()
            + self.technologies.write_count()
            + self.social_links.write_count()
    }
}

/// `Cookie` header value carrying a session token.
pub fn session(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("sb-access-token={token}")).expect("cookie header")
}

pub fn project(title: &str, order: i32) -> Project {
    Project::from_draft(
        Uuid::new_v4(),
        ProjectDraft {
            order: Some(order),
            title_es: format!("{title} (es)"),
            title_en: title.to_string(),
            ..Default::default()
        },
    )
}

pub fn text(key: &str, es: &str, en: &str) -> GeneralText {
    GeneralText::from_draft(
        Uuid::new_v4(),
        GeneralTextDraft {
            key: key.into(),
            text_es: es.into(),
            text_en: en.into(),
        },
    )
}

pub fn hero() -> Hero {
    Hero::from_draft(
        Uuid::new_v4(),
        HeroDraft {
            greeting_es: "Hola, soy".into(),
            greeting_en: "Hi, I'm".into(),
            title: "Gerardo".into(),
            subtitle_es: "Desarrollador de software".into(),
            subtitle_en: "Software developer".into(),
            cv_url: String::new(),
        },
    )
}
