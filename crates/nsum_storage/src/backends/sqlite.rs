use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use nsum_core::storage::validate_for_storage;
use nsum_core::{ArticleStore, CacheStats, Error, LanguageCode, ProcessedArticle, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::debug;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT UNIQUE NOT NULL,
        source TEXT NOT NULL,
        title TEXT NOT NULL,
        original_language TEXT NOT NULL,
        original_text TEXT NOT NULL,
        english_text TEXT,
        summary TEXT NOT NULL,
        date_published TEXT,
        date_processed TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        processing_ms INTEGER
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_articles_processed ON articles (date_processed)",
    // Add future migrations here
];

pub const DEFAULT_DB_PATH: &str = "articles.db";

fn storage_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> Error {
    move |e| Error::Storage(format!("{}: {}", context, e))
}

/// Timestamps are written with fixed microsecond precision so that text order
/// matches time order.
fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    // Rows that took the column default (CURRENT_TIMESTAMP)
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::Storage(format!("Failed to parse date '{}': {}", raw, e)))
}

pub struct SQLiteStorage {
    pool: SqlitePool,
}

impl SQLiteStorage {
    pub async fn new() -> Result<Self> {
        Self::new_with_path(Path::new(DEFAULT_DB_PATH)).await
    }

    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(storage_error("Failed to connect to database"))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("Failed to run migration {}: {}", i, e)))?;
        }
        debug!("SQLite database ready at {}", db_path.display());

        Ok(Self { pool })
    }

    fn row_to_article(row: &SqliteRow) -> Result<ProcessedArticle> {
        let language: String = row.get("original_language");
        let language = language
            .parse::<LanguageCode>()
            .map_err(|_| Error::Storage(format!("Unknown language code in database: {}", language)))?;
        let original_text: String = row.get("original_text");
        let english_text: Option<String> = row.get("english_text");
        let processed: Option<String> = row.get("date_processed");
        let processed_at = match processed {
            Some(raw) => decode_timestamp(&raw)?,
            None => Utc::now(),
        };
        let processing_ms: Option<i64> = row.get("processing_ms");

        Ok(ProcessedArticle {
            url: row.get("url"),
            source: row.get("source"),
            title: row.get("title"),
            language,
            english_text: english_text.unwrap_or_else(|| original_text.clone()),
            original_text,
            summary: row.get("summary"),
            published: row
                .get::<Option<String>, _>("date_published")
                .unwrap_or_else(|| nsum_core::NOT_AVAILABLE.to_string()),
            processing_time: Duration::from_millis(processing_ms.unwrap_or(0).max(0) as u64),
            processed_at,
        })
    }
}

#[async_trait]
impl ArticleStore for SQLiteStorage {
    async fn exists(&self, url: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE url = ?")
            .bind(url)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("Failed to check cache"))?;
        Ok(count > 0)
    }

    async fn get(&self, url: &str) -> Result<Option<ProcessedArticle>> {
        let row = sqlx::query("SELECT * FROM articles WHERE url = ?")
            .bind(url)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to retrieve article"))?;
        row.as_ref().map(Self::row_to_article).transpose()
    }

    async fn put(&self, article: &ProcessedArticle) -> Result<()> {
        validate_for_storage(article)?;

        let result = sqlx::query(
            r#"
            INSERT INTO articles
            (url, source, title, original_language, original_text, english_text,
             summary, date_published, date_processed, processing_ms)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.url)
        .bind(&article.source)
        .bind(&article.title)
        .bind(article.language.code())
        .bind(&article.original_text)
        .bind(&article.english_text)
        .bind(&article.summary)
        .bind(&article.published)
        .bind(encode_timestamp(&article.processed_at))
        .bind(article.processing_time.as_millis() as i64)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(Error::DuplicateUrl(article.url.clone()))
            }
            Err(e) => Err(Error::Storage(format!("Failed to store article: {}", e))),
        }
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<ProcessedArticle>> {
        // SQLite treats a negative LIMIT as no limit
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let rows = sqlx::query(
            r#"
            SELECT * FROM articles
            ORDER BY date_processed DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to list articles"))?;

        rows.iter().map(Self::row_to_article).collect()
    }

    async fn stats(&self) -> Result<CacheStats> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("Failed to count articles"))?;

        let by_language: Vec<(String, i64)> =
            sqlx::query_as("SELECT original_language, COUNT(*) FROM articles GROUP BY original_language")
                .fetch_all(&self.pool)
                .await
                .map_err(storage_error("Failed to group by language"))?;

        let by_source: Vec<(String, i64)> =
            sqlx::query_as("SELECT source, COUNT(*) FROM articles GROUP BY source")
                .fetch_all(&self.pool)
                .await
                .map_err(storage_error("Failed to group by source"))?;

        Ok(CacheStats {
            total: total as u64,
            by_language: by_language.into_iter().map(|(k, v)| (k, v as u64)).collect(),
            by_source: by_source.into_iter().map(|(k, v)| (k, v as u64)).collect(),
        })
    }

    async fn clear(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM articles")
            .execute(&self.pool)
            .await
            .map_err(storage_error("Failed to clear cache"))?;
        Ok(result.rows_affected())
    }
}
