mod roles;
mod tables;

pub use roles::PostgresRoleRepository;

use std::marker::PhantomData;

use async_trait::async_trait;
use folio_model::{ContentEntity, OrderUpdate};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, PgPool, Postgres};
use tracing::debug;
use uuid::Uuid;

use crate::database::ports::ContentRepository;
use crate::error::{ContentError, Result};

pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Column layout of a content table.
pub trait PgContent: ContentEntity + for<'r> FromRow<'r, PgRow> + Unpin {
    /// Column names with `id` first, in [`PgContent::bind_columns`] order.
    const COLUMNS: &'static [&'static str];

    /// `ORDER BY` clause for listings; `None` leaves the order to Postgres.
    const ORDER_BY: Option<&'static str>;

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;
}

/// PostgreSQL-backed repository for one content table.
#[derive(Debug, Clone)]
pub struct PostgresContentRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: PgContent> PostgresContentRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn columns<E: PgContent>() -> String {
    E::COLUMNS.join(", ")
}

fn select_sql<E: PgContent>() -> String {
    let mut sql = format!("SELECT {} FROM {}", columns::<E>(), E::KIND.table());
    if let Some(order_by) = E::ORDER_BY {
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
    }
    sql
}

fn select_one_sql<E: PgContent>() -> String {
    format!(
        "SELECT {} FROM {} WHERE id = $1",
        columns::<E>(),
        E::KIND.table()
    )
}

fn insert_sql<E: PgContent>() -> String {
    let placeholders = (1..=E::COLUMNS.len())
        .map(|idx| format!("${idx}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {table} ({cols}) VALUES ({placeholders}) RETURNING {cols}",
        table = E::KIND.table(),
        cols = columns::<E>(),
    )
}

fn update_sql<E: PgContent>() -> String {
    let assignments = E::COLUMNS
        .iter()
        .enumerate()
        .skip(1)
        .map(|(idx, column)| format!("{column} = ${}", idx + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {table} SET {assignments} WHERE id = $1 RETURNING {cols}",
        table = E::KIND.table(),
        cols = columns::<E>(),
    )
}

fn reorder_sql<E: PgContent>() -> String {
    format!(
        r#"UPDATE {} AS t SET "order" = u.new_order FROM UNNEST($1::uuid[], $2::int4[]) AS u(id, new_order) WHERE t.id = u.id"#,
        E::KIND.table()
    )
}

#[async_trait]
impl<E: PgContent> ContentRepository<E> for PostgresContentRepository<E> {
    async fn list(&self) -> Result<Vec<E>> {
        let sql = select_sql::<E>();
        let rows = sqlx::query_as::<_, E>(&sql)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<E> {
        let sql = select_one_sql::<E>();
        sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| ContentError::not_found(format!("{} {id}", E::KIND)))
    }

    async fn count(&self) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", E::KIND.table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(self.pool()).await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn insert(&self, entity: &E) -> Result<E> {
        let sql = insert_sql::<E>();
        let row = entity
            .bind_columns(sqlx::query(&sql))
            .fetch_one(self.pool())
            .await?;
        Ok(E::from_row(&row)?)
    }

    async fn replace(&self, entity: &E) -> Result<E> {
        let sql = update_sql::<E>();
        let row = entity
            .bind_columns(sqlx::query(&sql))
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| {
                ContentError::not_found(format!("{} {}", E::KIND, entity.id()))
            })?;
        Ok(E::from_row(&row)?)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::KIND.table());
        let result = sqlx::query(&sql).bind(id).execute(self.pool()).await?;
        if result.rows_affected() == 0 {
            return Err(ContentError::not_found(format!("{} {id}", E::KIND)));
        }
        Ok(())
    }

    async fn set_orders(&self, updates: &[OrderUpdate]) -> Result<()> {
        if !E::KIND.is_ordered() {
            return Err(ContentError::Internal(format!(
                "{} has no order column",
                E::KIND
            )));
        }
        let (ids, orders): (Vec<Uuid>, Vec<i32>) =
            updates.iter().map(|update| (update.id, update.order)).unzip();

        let sql = reorder_sql::<E>();
        let mut tx = self.pool().begin().await?;
        let result = sqlx::query(&sql)
            .bind(&ids)
            .bind(&orders)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!(
            table = E::KIND.table(),
            rows = result.rows_affected(),
            "bulk order write committed"
        );
        Ok(())
    }
}
