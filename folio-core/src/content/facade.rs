use std::fmt;
use std::sync::Arc;

use folio_model::{ContentEntity, Direction, ListEdit, ListFields, OrderedEntity, Validate};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::content::notify::{self, Notifier, SectionMessages};
use crate::content::ordering;
use crate::database::ports::ContentRepository;
use crate::error::{ContentError, Result};

/// How a reorder request ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum MoveOutcome {
    Moved,
    /// Out-of-range move; nothing was written.
    Unchanged,
    /// The bulk write failed with this store message.
    Failed(String),
}

/// Listing re-fetched after a reorder attempt.
#[derive(Debug, Clone, Serialize)]
pub struct Reordered<E> {
    pub items: Vec<E>,
    pub outcome: MoveOutcome,
}

/// Admin operations on one content table.
///
/// Every operation reports its result on the [`Notifier`]. Nothing is
/// cached; each call reads the store again.
pub struct ContentFacade<E: ContentEntity> {
    repo: Arc<dyn ContentRepository<E>>,
    notifier: Arc<Notifier>,
}

impl<E: ContentEntity> Clone for ContentFacade<E> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<E: ContentEntity> fmt::Debug for ContentFacade<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentFacade")
            .field("kind", &E::KIND)
            .finish_non_exhaustive()
    }
}

impl<E: ContentEntity> ContentFacade<E> {
    pub fn new(repo: Arc<dyn ContentRepository<E>>, notifier: Arc<Notifier>) -> Self {
        Self { repo, notifier }
    }

    fn messages() -> SectionMessages {
        notify::messages(E::KIND)
    }

    pub async fn list(&self) -> Result<Vec<E>> {
        self.repo.list().await.inspect_err(|err| {
            self.notifier
                .error(Some(E::KIND), Self::messages().load_failed, err.to_string());
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<E> {
        self.repo.get(id).await
    }

    /// Validates and inserts `draft`. Ordered tables get
    /// `(row_count + 1) * 10` when the draft carries no `order`.
    pub async fn create(&self, draft: E::Draft) -> Result<E> {
        let result = self.try_create(draft).await;
        self.report_save(result)
    }

    async fn try_create(&self, mut draft: E::Draft) -> Result<E> {
        draft.validate()?;
        if E::KIND.is_ordered() {
            let count = self.repo.count().await?;
            E::fill_draft_order(&mut draft, count);
        }
        let entity = E::from_draft(Uuid::new_v4(), draft);
        self.repo.insert(&entity).await
    }

    /// Applies `patch` over the stored row and writes the whole row back.
    pub async fn update(&self, id: Uuid, patch: E::Patch) -> Result<E> {
        let result = self.try_update(id, patch).await;
        self.report_save(result)
    }

    async fn try_update(&self, id: Uuid, patch: E::Patch) -> Result<E> {
        let mut current = self.repo.get(id).await?;
        current.apply_patch(patch)?;
        current.validate()?;
        self.repo.replace(&current).await
    }

    /// Runs `edit` on the stored row and saves it. Used to land uploaded
    /// URLs in a single field.
    pub async fn edit<F>(&self, id: Uuid, edit: F) -> Result<E>
    where
        F: FnOnce(&mut E) + Send,
    {
        let result = self
            .try_edit(id, |row| {
                edit(row);
                Ok(())
            })
            .await;
        self.report_save(result)
    }

    async fn try_edit<F>(&self, id: Uuid, edit: F) -> Result<E>
    where
        F: FnOnce(&mut E) -> Result<()> + Send,
    {
        let mut current = self.repo.get(id).await?;
        edit(&mut current)?;
        current.validate()?;
        self.repo.replace(&current).await
    }

    /// Deletes the row and returns the re-fetched listing.
    pub async fn delete(&self, id: Uuid) -> Result<Vec<E>> {
        match self.repo.delete(id).await {
            Ok(()) => {
                self.notifier.success(Some(E::KIND), Self::messages().deleted);
                self.list().await
            }
            Err(err) => {
                self.notifier.error(
                    Some(E::KIND),
                    Self::messages().delete_failed,
                    err.to_string(),
                );
                Err(err)
            }
        }
    }

    fn report_save(&self, result: Result<E>) -> Result<E> {
        match &result {
            Ok(_) => {
                self.notifier.success(Some(E::KIND), Self::messages().saved);
            }
            Err(err) => {
                self.notifier
                    .error(Some(E::KIND), notify::save_failed(&err.to_string()), None);
            }
        }
        result
    }
}

impl<E: ListFields> ContentFacade<E> {
    /// Adds or removes one entry of an array column. Blank and duplicate
    /// additions leave the row as it was.
    pub async fn edit_list(&self, id: Uuid, field: &str, edit: ListEdit, value: &str) -> Result<E> {
        let result = self
            .try_edit(id, |row| {
                row.edit_list(field, edit, value)?;
                Ok(())
            })
            .await;
        self.report_save(result)
    }
}

impl<E: OrderedEntity> ContentFacade<E> {
    /// Moves the item at `index` of a fresh listing one step.
    pub async fn move_at(&self, index: usize, direction: Direction) -> Result<Reordered<E>> {
        let items = self.list().await?;
        self.reorder(items, index, direction).await
    }

    /// Moves the row with `id` one step.
    pub async fn move_item(&self, id: Uuid, direction: Direction) -> Result<Reordered<E>> {
        let items = self.list().await?;
        let index = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| ContentError::not_found(format!("{} {id}", E::KIND)))?;
        self.reorder(items, index, direction).await
    }

    async fn reorder(
        &self,
        mut items: Vec<E>,
        index: usize,
        direction: Direction,
    ) -> Result<Reordered<E>> {
        if !ordering::move_item(&mut items, index, direction) {
            debug!(table = E::KIND.table(), index, ?direction, "move out of range");
            return Ok(Reordered {
                items,
                outcome: MoveOutcome::Unchanged,
            });
        }

        let updates = ordering::renumber(&mut items);
        let outcome = match self.repo.set_orders(&updates).await {
            Ok(()) => {
                self.notifier.success(Some(E::KIND), notify::REORDERED);
                MoveOutcome::Moved
            }
            Err(err) => {
                let message = err.to_string();
                self.notifier
                    .error(Some(E::KIND), notify::REORDER_FAILED, message.clone());
                MoveOutcome::Failed(message)
            }
        };

        // Re-read whether or not the write went through.
        let items = self.list().await?;
        Ok(Reordered { items, outcome })
    }
}
