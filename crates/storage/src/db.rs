use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;
use thiserror::Error;

use cardex_core::{ExtractedRecord, Issuer, OwnerId};

pub type DbPool = Pool<Sqlite>;

/// A persisted upload: the content fingerprint, ownership, and the record
/// mined from the document.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub id: i64,
    pub owner_id: OwnerId,
    pub content_digest: String,
    pub filename: String,
    pub issuer: Issuer,
    pub record: ExtractedRecord,
    /// UTC, `YYYY-MM-DD HH:MM:SS`, assigned by the database.
    pub uploaded_at: String,
}

#[derive(Debug, Error)]
pub enum InsertError {
    /// The owner already stored a byte-identical document. Raised by the
    /// UNIQUE(owner_id, content_digest) constraint, which stays authoritative
    /// when two identical uploads race past the lookup.
    #[error("owner already has a record for this content digest")]
    DuplicateDigest,
    #[error("failed to encode extracted record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

pub async fn create_db(path: &Path) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&format!("sqlite:{}?mode=rwc", path.display()))
        .await?;

    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA cache_size = -32000")
        .execute(&pool)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS uploads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            content_digest TEXT NOT NULL,
            filename TEXT NOT NULL,
            issuer TEXT NOT NULL,
            extracted_json TEXT NOT NULL,
            uploaded_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (owner_id, content_digest)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

type UploadRow = (i64, i64, String, String, String, String, String);

const UPLOAD_COLUMNS: &str =
    "id, owner_id, content_digest, filename, issuer, extracted_json, uploaded_at";

fn row_to_upload(r: UploadRow) -> StoredUpload {
    let issuer = r.4.parse().unwrap_or(Issuer::Unknown);
    // A row whose JSON no longer decodes degrades to an all-sentinel record.
    let record =
        serde_json::from_str(&r.5).unwrap_or_else(|_| ExtractedRecord::with_issuer(issuer));
    StoredUpload {
        id: r.0,
        owner_id: OwnerId(r.1),
        content_digest: r.2,
        filename: r.3,
        issuer,
        record,
        uploaded_at: r.6,
    }
}

/// Look up the owner's record for a content digest, if one exists.
pub async fn find_upload(
    pool: &DbPool,
    owner: OwnerId,
    digest: &str,
) -> Result<Option<StoredUpload>, sqlx::Error> {
    let row = sqlx::query_as::<_, UploadRow>(&format!(
        "SELECT {UPLOAD_COLUMNS} FROM uploads WHERE owner_id = ? AND content_digest = ?"
    ))
    .bind(owner.0)
    .bind(digest)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_upload))
}

/// Persist one processed upload. A digest the owner already stored comes
/// back as `InsertError::DuplicateDigest`; callers treat that as a skip,
/// not a failure.
pub async fn insert_upload(
    pool: &DbPool,
    owner: OwnerId,
    digest: &str,
    filename: &str,
    record: &ExtractedRecord,
) -> Result<StoredUpload, InsertError> {
    let json = serde_json::to_string(record)?;

    let result = sqlx::query(
        "INSERT INTO uploads (owner_id, content_digest, filename, issuer, extracted_json) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(owner.0)
    .bind(digest)
    .bind(filename)
    .bind(record.issuer.to_string())
    .bind(json)
    .execute(pool)
    .await
    .map_err(|e| match e.as_database_error() {
        Some(db) if db.is_unique_violation() => InsertError::DuplicateDigest,
        _ => InsertError::Db(e),
    })?;

    let id = result.last_insert_rowid();
    let row = sqlx::query_as::<_, UploadRow>(&format!(
        "SELECT {UPLOAD_COLUMNS} FROM uploads WHERE id = ?"
    ))
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(row_to_upload(row))
}

/// The owner's uploads, newest first, optionally narrowed to one issuer
/// and/or to uploads at or after `since`.
pub async fn list_uploads(
    pool: &DbPool,
    owner: OwnerId,
    issuer: Option<Issuer>,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<StoredUpload>, sqlx::Error> {
    let mut sql =
        format!("SELECT {UPLOAD_COLUMNS} FROM uploads WHERE owner_id = ?");
    if issuer.is_some() {
        sql.push_str(" AND issuer = ?");
    }
    if since.is_some() {
        sql.push_str(" AND uploaded_at >= ?");
    }
    sql.push_str(" ORDER BY uploaded_at DESC, id DESC");

    let mut query = sqlx::query_as::<_, UploadRow>(&sql).bind(owner.0);
    if let Some(issuer) = issuer {
        query = query.bind(issuer.to_string());
    }
    if let Some(since) = since {
        // Stored timestamps are UTC in the same lexicographically ordered shape.
        query = query.bind(since.format("%Y-%m-%d %H:%M:%S").to_string());
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows.into_iter().map(row_to_upload).collect())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
