pub mod ports;

#[cfg(feature = "database")]
#[cfg_attr(docsrs, doc(cfg(feature = "database")))]
pub mod postgres;

use std::fmt;
use std::sync::Arc;

use folio_model::{ContentEntity, Experience, GeneralText, Hero, Project, SocialLink, Technology};

pub use ports::{ContentRepository, RoleRepository};

#[cfg(feature = "database")]
pub use postgres::{PgContent, PostgresContentRepository, PostgresRoleRepository};

/// One repository per content table.
#[derive(Clone)]
pub struct ContentStores {
    pub general_text: Arc<dyn ContentRepository<GeneralText>>,
    pub hero: Arc<dyn ContentRepository<Hero>>,
    pub projects: Arc<dyn ContentRepository<Project>>,
    pub experience: Arc<dyn ContentRepository<Experience>>,
    pub technologies: Arc<dyn ContentRepository<Technology>>,
    pub social_links: Arc<dyn ContentRepository<SocialLink>>,
}

impl fmt::Debug for ContentStores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentStores").finish_non_exhaustive()
    }
}

impl ContentStores {
    pub fn repo<E: Section>(&self) -> Arc<dyn ContentRepository<E>> {
        Arc::clone(E::repository(self))
    }
}

/// Entities with a table in [`ContentStores`].
pub trait Section: ContentEntity {
    fn repository(stores: &ContentStores) -> &Arc<dyn ContentRepository<Self>>;
}

macro_rules! section {
    ($entity:ty => $field:ident) => {
        impl Section for $entity {
            fn repository(stores: &ContentStores) -> &Arc<dyn ContentRepository<Self>> {
                &stores.$field
            }
        }
    };
}

section!(GeneralText => general_text);
section!(Hero => hero);
section!(Project => projects);
section!(Experience => experience);
section!(Technology => technologies);
section!(SocialLink => social_links);

#[cfg(feature = "database")]
impl ContentStores {
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            general_text: Arc::new(PostgresContentRepository::<GeneralText>::new(pool.clone())),
            hero: Arc::new(PostgresContentRepository::<Hero>::new(pool.clone())),
            projects: Arc::new(PostgresContentRepository::<Project>::new(pool.clone())),
            experience: Arc::new(PostgresContentRepository::<Experience>::new(pool.clone())),
            technologies: Arc::new(PostgresContentRepository::<Technology>::new(pool.clone())),
            social_links: Arc::new(PostgresContentRepository::<SocialLink>::new(pool)),
        }
    }
}
