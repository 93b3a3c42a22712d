//! SQLite-backed scoreboard storage.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rpssl_domain::{Outcome, PlayRecord};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::{ClockPort, PlayResultRepo, RepoError};
use crate::infrastructure::retry::RetryPolicy;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:rpssl.db?mode=rwc";

const MAX_CONNECTIONS: u32 = 5;

/// SQLite implementation of the scoreboard.
///
/// Every operation runs under the storage `RetryPolicy` and takes a fresh
/// pooled connection per attempt.
pub struct SqlitePlayResultRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
    retry: RetryPolicy,
}

impl SqlitePlayResultRepo {
    /// Open (creating if needed) the database at `database_url` and ensure the schema exists.
    pub async fn connect(
        database_url: &str,
        clock: Arc<dyn ClockPort>,
        retry: RetryPolicy,
    ) -> Result<Self, RepoError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepoError::database("connect", e))?
            .create_if_missing(true);

        Self::connect_with(options, clock, retry).await
    }

    pub async fn connect_with(
        options: SqliteConnectOptions,
        clock: Arc<dyn ClockPort>,
        retry: RetryPolicy,
    ) -> Result<Self, RepoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| classify("connect", e))?;

        let repo = Self::new(pool, clock, retry);
        repo.ensure_schema().await?;
        Ok(repo)
    }

    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>, retry: RetryPolicy) -> Self {
        Self { pool, clock, retry }
    }

    pub async fn ensure_schema(&self) -> Result<(), RepoError> {
        for statement in [
            r#"
            CREATE TABLE IF NOT EXISTS play_results (
                username TEXT NOT NULL,
                play_time TEXT NOT NULL,
                result TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_play_results_play_time ON play_results (play_time)",
            "CREATE INDEX IF NOT EXISTS idx_play_results_username ON play_results (username)",
        ] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| classify("ensure_schema", e))?;
        }
        Ok(())
    }

    /// Run `unit` under the retry policy with its own connection per attempt.
    async fn run<T, F, Fut>(
        &self,
        operation: &'static str,
        cancel: &CancellationToken,
        unit: F,
    ) -> Result<T, RepoError>
    where
        F: Fn(PoolConnection<Sqlite>) -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        let unit = &unit;
        let pool = &self.pool;
        self.retry
            .execute(operation, cancel, RepoError::is_transient, move || async move {
                let conn = pool.acquire().await.map_err(|e| classify(operation, e))?;
                unit(conn).await.map_err(|e| classify(operation, e))
            })
            .await
    }
}

#[async_trait]
impl PlayResultRepo for SqlitePlayResultRepo {
    async fn save(
        &self,
        username: &str,
        outcome: Outcome,
        cancel: &CancellationToken,
    ) -> Result<bool, RepoError> {
        let played_at = format_timestamp(self.clock.now());

        let inserted = self
            .run("save", cancel, |mut conn| {
                let username = username.to_string();
                let played_at = played_at.clone();
                async move {
                    let result = sqlx::query(
                        "INSERT INTO play_results (username, play_time, result) VALUES (?, ?, ?)",
                    )
                    .bind(username)
                    .bind(played_at)
                    .bind(outcome.as_str())
                    .execute(&mut *conn)
                    .await?;
                    Ok::<_, sqlx::Error>(result.rows_affected())
                }
            })
            .await?;

        tracing::debug!(username = %username, result = %outcome, inserted, "Saved play result");
        Ok(inserted == 1)
    }

    async fn delete_all(&self, cancel: &CancellationToken) -> Result<bool, RepoError> {
        let deleted = self
            .run("delete_all", cancel, |mut conn| async move {
                let result = sqlx::query("DELETE FROM play_results")
                    .execute(&mut *conn)
                    .await?;
                Ok::<_, sqlx::Error>(result.rows_affected())
            })
            .await?;

        tracing::debug!(deleted, "Deleted all play results");
        Ok(deleted > 0)
    }

    async fn delete_for_user(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, RepoError> {
        let deleted = self
            .run("delete_for_user", cancel, |mut conn| {
                let username = username.to_string();
                async move {
                    let result = sqlx::query("DELETE FROM play_results WHERE username = ?")
                        .bind(username)
                        .execute(&mut *conn)
                        .await?;
                    Ok::<_, sqlx::Error>(result.rows_affected())
                }
            })
            .await?;

        tracing::debug!(username = %username, deleted, "Deleted play results for user");
        Ok(deleted > 0)
    }

    async fn list_latest(
        &self,
        count: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<PlayRecord>, RepoError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let rows = self
            .run("list_latest", cancel, |mut conn| async move {
                sqlx::query(
                    "SELECT username, play_time, result FROM play_results \
                     ORDER BY play_time DESC LIMIT ?",
                )
                .bind(i64::from(count))
                .fetch_all(&mut *conn)
                .await
            })
            .await?;

        rows.iter().map(record_from_row).collect()
    }

    async fn list_for_user(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<PlayRecord>, RepoError> {
        let rows = self
            .run("list_for_user", cancel, |mut conn| {
                let username = username.to_string();
                async move {
                    sqlx::query(
                        "SELECT username, play_time, result FROM play_results WHERE username = ?",
                    )
                    .bind(username)
                    .fetch_all(&mut *conn)
                    .await
                }
            })
            .await?;

        rows.iter().map(record_from_row).collect()
    }
}

/// Fixed-width UTC text, so lexical order matches chronological order.
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn record_from_row(row: &SqliteRow) -> Result<PlayRecord, RepoError> {
    let username: String = row.try_get("username").map_err(RepoError::serialization)?;
    let play_time: String = row.try_get("play_time").map_err(RepoError::serialization)?;
    let result: String = row.try_get("result").map_err(RepoError::serialization)?;

    let played_at = DateTime::parse_from_rfc3339(&play_time)
        .map_err(|e| RepoError::serialization(format!("Invalid play_time '{play_time}': {e}")))?
        .with_timezone(&Utc);
    let outcome = Outcome::from_str(&result).map_err(RepoError::serialization)?;

    PlayRecord::new(username, played_at, outcome).map_err(RepoError::serialization)
}

fn classify(operation: &'static str, error: sqlx::Error) -> RepoError {
    if is_transient(&error) {
        RepoError::unavailable(operation, error)
    } else {
        RepoError::database(operation, error)
    }
}

/// SQLITE_BUSY and SQLITE_LOCKED, including their extended codes.
const BUSY: i32 = 5;
const LOCKED: i32 = 6;

fn is_transient(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db) => db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .map(|code| matches!(code & 0xff, BUSY | LOCKED))
            .unwrap_or(false),
        _ => false,
    }
}
