use std::path::Path;
use std::time::Duration;

use careerstack_core::JobPosting;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use thiserror::Error;

/// Default truncation for `recent`.
pub const DEFAULT_RECENT_LIMIT: u32 = 1000;

const LAST_RUN_KEY: &str = "last_run";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt timestamp in cache: {0}")]
    CorruptTimestamp(String),
}

/// SQLite-backed snapshot of the most recent refresh.
///
/// Owns the connection pool; every operation acquires from it instead of
/// opening a fresh handle. The snapshot is replaced as one transaction,
/// so readers never see a mix of two refresh cycles.
#[derive(Clone)]
pub struct CacheStore {
    pool: SqlitePool,
}

impl CacheStore {
    /// Opens (creating if needed) the store at `path` and ensures the
    /// schema exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let url = format!("sqlite://{}?mode=rwc", path.as_ref().display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&url)
            .await?;

        // WAL keeps readers unblocked while a refresh commits.
        sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
        sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), CacheError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                company TEXT,
                title TEXT,
                url TEXT,
                location TEXT,
                scraped_at TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("CREATE TABLE IF NOT EXISTS meta (key TEXT PRIMARY KEY, value TEXT)")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Timestamp of the last completed refresh, if any.
    pub async fn last_refreshed_at(&self) -> Result<Option<DateTime<Utc>>, CacheError> {
        let row = sqlx::query("SELECT value FROM meta WHERE key = ?")
            .bind(LAST_RUN_KEY)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let raw: String = row.get("value");
        Ok(Some(parse_timestamp(&raw)?))
    }

    /// True iff a refresh has completed and is younger than `ttl`.
    pub async fn is_fresh(&self, ttl: Duration) -> Result<bool, CacheError> {
        let Some(last) = self.last_refreshed_at().await? else {
            return Ok(false);
        };
        let ttl = ChronoDuration::from_std(ttl).unwrap_or(ChronoDuration::MAX);
        Ok(Utc::now() - last < ttl)
    }

    /// Clears and repopulates the snapshot in one transaction and records
    /// the refresh timestamp. Returns that timestamp.
    pub async fn replace_all(&self, postings: &[JobPosting]) -> Result<DateTime<Utc>, CacheError> {
        let refreshed_at = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM jobs").execute(&mut *tx).await?;
        for posting in postings {
            sqlx::query(
                "INSERT INTO jobs (company, title, url, location, scraped_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&posting.company)
            .bind(&posting.title)
            .bind(&posting.url)
            .bind(&posting.location)
            .bind(posting.discovered_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;
        }
        sqlx::query("INSERT OR REPLACE INTO meta (key, value) VALUES (?, ?)")
            .bind(LAST_RUN_KEY)
            .bind(refreshed_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(refreshed_at)
    }

    /// Most recently discovered postings first, truncated to `limit`.
    pub async fn recent(&self, limit: u32) -> Result<Vec<JobPosting>, CacheError> {
        let rows = sqlx::query(
            r#"
            SELECT company, title, url, location, scraped_at
            FROM jobs
            ORDER BY scraped_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let raw: String = row.get("scraped_at");
                Ok(JobPosting {
                    company: row.get("company"),
                    title: row.get("title"),
                    url: row.get("url"),
                    location: row.get("location"),
                    discovered_at: parse_timestamp(&raw)?,
                })
            })
            .collect()
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CacheError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| CacheError::CorruptTimestamp(format!("{raw}: {err}")))
}
