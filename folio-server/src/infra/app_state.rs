use std::fmt;
use std::sync::Arc;

use folio_core::content::{AccessGate, AssetUploader, ContentFacade, Notifier, PageService};
use folio_core::database::{ContentStores, Section};
use folio_core::providers::ObjectStorage;

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub stores: ContentStores,
    pub notifier: Arc<Notifier>,
    pub gate: AccessGate,
    pub storage: Arc<dyn ObjectStorage>,
    pub page: PageService,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        stores: ContentStores,
        gate: AccessGate,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            config,
            page: PageService::new(stores.clone()),
            stores,
            notifier: Arc::new(Notifier::default()),
            gate,
            storage,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn facade<E: Section>(&self) -> ContentFacade<E> {
        ContentFacade::new(self.stores.repo::<E>(), Arc::clone(&self.notifier))
    }

    /// Fresh uploader; each request tracks its own in-flight upload.
    pub fn uploader(&self) -> AssetUploader {
        AssetUploader::new(Arc::clone(&self.storage), Arc::clone(&self.notifier))
    }
}
