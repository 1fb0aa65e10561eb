//! In-memory stand-ins for the store, storage and auth ports.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use folio_model::{
    Bucket, ContentEntity, Experience, GeneralText, Hero, OrderUpdate, Project, SocialLink,
    Technology,
};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::database::ContentStores;
use crate::database::ports::{ContentRepository, RoleRepository};
use crate::error::{ContentError, Result};
use crate::providers::{AuthGateway, AuthSession, AuthUser, ObjectStorage};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn injected(failure: &Mutex<Option<String>>) -> Result<()> {
    match lock(failure).clone() {
        Some(message) => Err(ContentError::Store(message)),
        None => Ok(()),
    }
}

/// Vec-backed table. Listings are sorted by [`ContentEntity::sort_key`];
/// ties keep insertion order.
pub struct MemoryStore<E> {
    rows: Mutex<Vec<E>>,
    writes: AtomicUsize,
    write_failure: Mutex<Option<String>>,
    read_failure: Mutex<Option<String>>,
}

impl<E: ContentEntity> fmt::Debug for MemoryStore<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("kind", &E::KIND)
            .field("rows", &lock(&self.rows).len())
            .finish()
    }
}

impl<E: ContentEntity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ContentEntity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<E>) -> Self {
        Self {
            rows: Mutex::new(rows),
            writes: AtomicUsize::new(0),
            write_failure: Mutex::new(None),
            read_failure: Mutex::new(None),
        }
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every later write fail with `message`.
    pub fn fail_writes(&self, message: impl Into<String>) {
        *lock(&self.write_failure) = Some(message.into());
    }

    pub fn fail_reads(&self, message: impl Into<String>) {
        *lock(&self.read_failure) = Some(message.into());
    }

    fn wrote(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    fn missing(id: Uuid) -> ContentError {
        ContentError::not_found(format!("{} {id}", E::KIND))
    }
}

/// Sets `order` through the serialized form; the memory store is generic
/// over every entity, ordered or not.
fn with_order<E: ContentEntity>(entity: &E, order: i32) -> Result<E> {
    let mut value =
        serde_json::to_value(entity).map_err(|e| ContentError::Internal(e.to_string()))?;
    if let Some(fields) = value.as_object_mut() {
        fields.insert("order".into(), order.into());
    }
    serde_json::from_value(value).map_err(|e| ContentError::Internal(e.to_string()))
}

#[async_trait]
impl<E: ContentEntity> ContentRepository<E> for MemoryStore<E> {
    async fn list(&self) -> Result<Vec<E>> {
        injected(&self.read_failure)?;
        let mut rows = lock(&self.rows).clone();
        rows.sort_by_key(|row| row.sort_key());
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<E> {
        injected(&self.read_failure)?;
        lock(&self.rows)
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or_else(|| Self::missing(id))
    }

    async fn count(&self) -> Result<usize> {
        injected(&self.read_failure)?;
        Ok(lock(&self.rows).len())
    }

    async fn insert(&self, entity: &E) -> Result<E> {
        injected(&self.write_failure)?;
        lock(&self.rows).push(entity.clone());
        self.wrote();
        Ok(entity.clone())
    }

    async fn replace(&self, entity: &E) -> Result<E> {
        injected(&self.write_failure)?;
        let mut rows = lock(&self.rows);
        let slot = rows
            .iter_mut()
            .find(|row| row.id() == entity.id())
            .ok_or_else(|| Self::missing(entity.id()))?;
        *slot = entity.clone();
        drop(rows);
        self.wrote();
        Ok(entity.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        injected(&self.write_failure)?;
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        if rows.len() == before {
            return Err(Self::missing(id));
        }
        drop(rows);
        self.wrote();
        Ok(())
    }

    async fn set_orders(&self, updates: &[OrderUpdate]) -> Result<()> {
        if !E::KIND.is_ordered() {
            return Err(ContentError::Internal(format!(
                "{} has no order column",
                E::KIND
            )));
        }
        injected(&self.write_failure)?;
        let mut rows = lock(&self.rows);
        let mut next = rows.clone();
        for update in updates {
            if let Some(row) = next.iter_mut().find(|row| row.id() == update.id) {
                *row = with_order(row, update.order)?;
            }
        }
        *rows = next;
        drop(rows);
        self.wrote();
        Ok(())
    }
}

pub fn memory_stores() -> ContentStores {
    ContentStores {
        general_text: Arc::new(MemoryStore::<GeneralText>::new()),
        hero: Arc::new(MemoryStore::<Hero>::new()),
        projects: Arc::new(MemoryStore::<Project>::new()),
        experience: Arc::new(MemoryStore::<Experience>::new()),
        technologies: Arc::new(MemoryStore::<Technology>::new()),
        social_links: Arc::new(MemoryStore::<SocialLink>::new()),
    }
}

/// Records uploads instead of sending them; public URLs use `memory://`.
#[derive(Debug)]
pub struct MemoryStorage {
    objects: Mutex<Vec<(Bucket, String, usize)>>,
    attempts: AtomicUsize,
    failure: Mutex<Option<String>>,
    public_urls: bool,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self {
            objects: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            failure: Mutex::new(None),
            public_urls: true,
            gate: Mutex::new(None),
        }
    }
}

impl MemoryStorage {
    /// Storage whose public URLs always come back empty.
    pub fn without_public_urls() -> Self {
        Self {
            public_urls: false,
            ..Self::default()
        }
    }

    /// Upload calls made, successful or not.
    pub fn upload_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn objects(&self) -> Vec<(Bucket, String, usize)> {
        lock(&self.objects).clone()
    }

    pub fn fail_uploads(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    /// Parks every upload until the returned handle is notified.
    pub fn hold_uploads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *lock(&self.gate) = Some(Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        _content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let gate = lock(&self.gate).clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(message) = lock(&self.failure).clone() {
            return Err(ContentError::Storage(message));
        }
        lock(&self.objects).push((bucket, name.to_string(), bytes.len()));
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, name: &str) -> String {
        if !self.public_urls {
            return String::new();
        }
        format!("memory://{}/{name}", bucket.name())
    }
}

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    password: String,
    token: String,
}

/// Fixed set of accounts keyed by token and email.
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    accounts: Vec<Account>,
}

impl StaticAuth {
    pub fn with_user(mut self, token: &str, id: Uuid, email: &str, password: &str) -> Self {
        self.accounts.push(Account {
            user: AuthUser {
                id,
                email: Some(email.to_string()),
            },
            password: password.to_string(),
            token: token.to_string(),
        });
        self
    }
}

#[async_trait]
impl AuthGateway for StaticAuth {
    async fn user_for_token(&self, token: &str) -> Result<Option<AuthUser>> {
        Ok(self
            .accounts
            .iter()
            .find(|account| account.token == token)
            .map(|account| account.user.clone()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.accounts
            .iter()
            .find(|account| {
                account.user.email.as_deref() == Some(email) && account.password == password
            })
            .map(|account| AuthSession {
                access_token: account.token.clone(),
                refresh_token: None,
                expires_in: 3600,
                user: account.user.clone(),
            })
            .ok_or_else(|| ContentError::Auth("Invalid login credentials".into()))
    }

    async fn sign_out(&self, _token: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryRoles {
    roles: Mutex<HashMap<Uuid, String>>,
    failure: Mutex<Option<String>>,
}

impl MemoryRoles {
    pub fn grant(&self, user_id: Uuid, role: &str) {
        lock(&self.roles).insert(user_id, role.to_string());
    }

    pub fn fail(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }
}

#[async_trait]
impl RoleRepository for MemoryRoles {
    async fn role_for(&self, user_id: Uuid) -> Result<Option<String>> {
        injected(&self.failure)?;
        Ok(lock(&self.roles).get(&user_id).cloned())
    }
}
