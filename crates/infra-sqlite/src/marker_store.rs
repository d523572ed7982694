// SQLite MarkerStore Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use disposal_core::domain::DisposalMethod;
use disposal_core::error::Result;
use disposal_core::port::MarkerStore;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

/// Marker store persisted in the `disposal_targets` table
///
/// Target sets outlive any process: they are only emptied by `remove`/`clear`.
#[derive(Clone)]
pub struct SqliteMarkerStore {
    pool: SqlitePool,
}

impl SqliteMarkerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Push `EXISTS(...)` for one set, or a constant `0` when there is nothing to look up
fn push_exists(builder: &mut QueryBuilder<'_, Sqlite>, set: DisposalMethod, candidates: &[String]) {
    if candidates.is_empty() {
        builder.push("0");
        return;
    }

    builder.push("EXISTS(SELECT 1 FROM disposal_targets WHERE target_set = ");
    builder.push_bind(set.target_set());
    builder.push(" AND marker IN (");
    let mut separated = builder.separated(", ");
    for candidate in candidates {
        separated.push_bind(candidate.clone());
    }
    builder.push("))");
}

#[async_trait]
impl MarkerStore for SqliteMarkerStore {
    async fn add(&self, set: DisposalMethod, marker: &str) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO disposal_targets (target_set, marker) VALUES (?, ?)")
            .bind(set.target_set())
            .bind(marker)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn remove(&self, set: DisposalMethod, marker: &str) -> Result<()> {
        sqlx::query("DELETE FROM disposal_targets WHERE target_set = ? AND marker = ?")
            .bind(set.target_set())
            .bind(marker)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn clear(&self, set: DisposalMethod) -> Result<()> {
        let result = sqlx::query("DELETE FROM disposal_targets WHERE target_set = ?")
            .bind(set.target_set())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(set = %set.target_set(), removed = result.rows_affected(), "Target set cleared");
        Ok(())
    }

    async fn members(&self, set: DisposalMethod) -> Result<Vec<String>> {
        sqlx::query_scalar("SELECT marker FROM disposal_targets WHERE target_set = ? ORDER BY marker")
            .bind(set.target_set())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn contains_any(&self, set: DisposalMethod, candidates: &[String]) -> Result<bool> {
        if candidates.is_empty() {
            return Ok(false);
        }

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT ");
        push_exists(&mut builder, set, candidates);

        let hit: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(hit != 0)
    }

    /// Both lookups in one statement, evaluated against one read snapshot
    async fn contains_any_batched(
        &self,
        set_a: DisposalMethod,
        candidates_a: &[String],
        set_b: DisposalMethod,
        candidates_b: &[String],
    ) -> Result<(bool, bool)> {
        if candidates_a.is_empty() && candidates_b.is_empty() {
            return Ok((false, false));
        }

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT ");
        push_exists(&mut builder, set_a, candidates_a);
        builder.push(", ");
        push_exists(&mut builder, set_b, candidates_b);

        let (hit_a, hit_b): (i64, i64) = builder
            .build_query_as::<(i64, i64)>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok((hit_a != 0, hit_b != 0))
    }
}
