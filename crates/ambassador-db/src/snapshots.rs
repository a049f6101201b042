//! Database operations for the `diagnosis_snapshots` table.

use ambassador_core::{BlogMetrics, DiagnosisSnapshot, HealthStatus};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `diagnosis_snapshots` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DiagnosisSnapshotRow {
    pub seq: i64,
    pub id: Uuid,
    pub blog_id: String,
    pub diagnosed_at: DateTime<Utc>,
    pub status: String,
    pub score: i16,
    pub recent_post_count: i64,
    pub index_error_rate: f64,
    pub keyword_exposure_rate: f64,
    pub facts: Value,
    pub solution: Value,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl DiagnosisSnapshotRow {
    /// Converts the stored row back into the domain snapshot.
    ///
    /// Unrecognized status strings become [`HealthStatus::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidRow`] if a numeric column is out of range or
    /// `facts`/`solution` is not a JSON array of strings.
    pub fn into_snapshot(self) -> Result<DiagnosisSnapshot, DbError> {
        let score = u8::try_from(self.score)
            .ok()
            .filter(|s| *s <= 100)
            .ok_or_else(|| {
                DbError::InvalidRow(format!("snapshot {} has score {}", self.id, self.score))
            })?;
        let recent_post_count = u32::try_from(self.recent_post_count).map_err(|_| {
            DbError::InvalidRow(format!(
                "snapshot {} has recent_post_count {}",
                self.id, self.recent_post_count
            ))
        })?;

        Ok(DiagnosisSnapshot {
            id: self.id,
            date: self.diagnosed_at,
            status: HealthStatus::parse(&self.status),
            score,
            metrics: BlogMetrics::new(
                recent_post_count,
                self.index_error_rate,
                self.keyword_exposure_rate,
            ),
            facts: string_list(self.id, "facts", self.facts)?,
            solution: string_list(self.id, "solution", self.solution)?,
            comment: self.comment,
            blog_id: self.blog_id,
        })
    }
}

fn string_list(id: Uuid, column: &str, value: Value) -> Result<Vec<String>, DbError> {
    serde_json::from_value(value)
        .map_err(|e| DbError::InvalidRow(format!("snapshot {id} has malformed {column}: {e}")))
}

const SELECT_COLUMNS: &str = "SELECT seq, id, blog_id, diagnosed_at, status, score, \
     recent_post_count, index_error_rate, keyword_exposure_rate, facts, solution, comment, \
     created_at FROM diagnosis_snapshots";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert a snapshot, then prune everything older than the newest `retention`
/// rows (by insertion order, across all blogs). Both run in one transaction.
///
/// Returns the number of rows evicted. A `retention` of zero is treated as one.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either statement fails; nothing is committed.
pub async fn insert_diagnosis_snapshot(
    pool: &PgPool,
    snapshot: &DiagnosisSnapshot,
    retention: usize,
) -> Result<u64, DbError> {
    let facts = serde_json::to_value(&snapshot.facts)
        .map_err(|e| DbError::InvalidRow(format!("facts not serializable: {e}")))?;
    let solution = serde_json::to_value(&snapshot.solution)
        .map_err(|e| DbError::InvalidRow(format!("solution not serializable: {e}")))?;
    let retention = i64::try_from(retention.max(1)).unwrap_or(i64::MAX);

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO diagnosis_snapshots \
             (id, blog_id, diagnosed_at, status, score, recent_post_count, \
              index_error_rate, keyword_exposure_rate, facts, solution, comment) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(snapshot.id)
    .bind(&snapshot.blog_id)
    .bind(snapshot.date)
    .bind(snapshot.status.as_str())
    .bind(i16::from(snapshot.score))
    .bind(i64::from(snapshot.metrics.recent_post_count))
    .bind(snapshot.metrics.index_error_rate)
    .bind(snapshot.metrics.keyword_exposure_rate)
    .bind(facts)
    .bind(solution)
    .bind(&snapshot.comment)
    .execute(&mut *tx)
    .await?;

    let evicted = sqlx::query(
        "DELETE FROM diagnosis_snapshots \
         WHERE seq NOT IN ( \
             SELECT seq FROM diagnosis_snapshots ORDER BY seq DESC LIMIT $1 \
         )",
    )
    .bind(retention)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;

    if evicted > 0 {
        tracing::debug!(evicted, retention, "pruned diagnosis history");
    }
    Ok(evicted)
}

/// List snapshots newest first, optionally filtered by blog.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_diagnosis_snapshots(
    pool: &PgPool,
    blog_id: Option<&str>,
    limit: i64,
) -> Result<Vec<DiagnosisSnapshotRow>, DbError> {
    let rows = match blog_id {
        Some(blog_id) => {
            sqlx::query_as::<_, DiagnosisSnapshotRow>(&format!(
                "{SELECT_COLUMNS} WHERE blog_id = $1 ORDER BY seq DESC LIMIT $2"
            ))
            .bind(blog_id)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, DiagnosisSnapshotRow>(&format!(
                "{SELECT_COLUMNS} ORDER BY seq DESC LIMIT $1"
            ))
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// Return the latest snapshot for `blog_id` diagnosed on `day` (UTC), if any.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_snapshot_for_day(
    pool: &PgPool,
    blog_id: &str,
    day: NaiveDate,
) -> Result<Option<DiagnosisSnapshotRow>, DbError> {
    let (start, end) = day_bounds(day);
    let row = sqlx::query_as::<_, DiagnosisSnapshotRow>(&format!(
        "{SELECT_COLUMNS} \
         WHERE blog_id = $1 AND diagnosed_at >= $2 AND diagnosed_at < $3 \
         ORDER BY seq DESC LIMIT 1"
    ))
    .bind(blog_id)
    .bind(start)
    .bind(end)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Half-open `[start, end)` UTC bounds of a calendar day.
pub(crate) fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    let end = day
        .checked_add_days(Days::new(1))
        .map_or(DateTime::<Utc>::MAX_UTC, |next| {
            next.and_time(NaiveTime::MIN).and_utc()
        });
    (start, end)
}
