use async_trait::async_trait;
use folio_model::{ContentEntity, OrderUpdate};
use uuid::Uuid;

use crate::error::{ContentError, Result};

/// Row access for one content table.
///
/// Listings come back in the table's display order (see
/// [`ContentEntity::sort_key`]). Writes are last-write-wins; there is no
/// version check.
#[async_trait]
pub trait ContentRepository<E: ContentEntity>: Send + Sync {
    async fn list(&self) -> Result<Vec<E>>;

    /// Fails with [`ContentError::NotFound`] for unknown ids.
    async fn get(&self, id: Uuid) -> Result<E>;

    async fn count(&self) -> Result<usize>;

    async fn insert(&self, entity: &E) -> Result<E>;

    /// Overwrites every column of the row with `entity.id()`.
    async fn replace(&self, entity: &E) -> Result<E>;

    /// Fails with [`ContentError::NotFound`] when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Writes every `order` in one statement. Either all rows change or
    /// none do.
    async fn set_orders(&self, _updates: &[OrderUpdate]) -> Result<()> {
        Err(ContentError::Internal(format!(
            "{} has no order column",
            E::KIND
        )))
    }
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Role stored for `user_id` in `user_roles`, if any.
    async fn role_for(&self, user_id: Uuid) -> Result<Option<String>>;
}
