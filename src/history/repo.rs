use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

/// One stored generation. `image` holds the PNG bytes the ASCII art was derived from.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HistoryEntry {
    pub id: i64,
    #[sqlx(rename = "user_email")]
    pub owner_email: String,
    pub number: i64,
    #[serde(skip_serializing)]
    pub image: Vec<u8>,
    #[sqlx(rename = "ascii_image")]
    pub ascii_art: String,
    pub created_at: i64,
}

pub async fn insert(
    db: &SqlitePool,
    owner_email: &str,
    number: u32,
    image: &[u8],
    ascii_art: &str,
) -> anyhow::Result<HistoryEntry> {
    let entry = sqlx::query_as::<_, HistoryEntry>(
        r#"
        INSERT INTO history (user_email, number, image, ascii_image, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id, user_email, number, image, ascii_image, created_at
        "#,
    )
    .bind(owner_email)
    .bind(i64::from(number))
    .bind(image)
    .bind(ascii_art)
    .bind(OffsetDateTime::now_utc().unix_timestamp())
    .fetch_one(db)
    .await
    .context("insert history entry")?;
    Ok(entry)
}

/// Entries owned by `owner_email`, newest first.
pub async fn list_by_owner(db: &SqlitePool, owner_email: &str) -> anyhow::Result<Vec<HistoryEntry>> {
    let rows = sqlx::query_as::<_, HistoryEntry>(
        r#"
        SELECT id, user_email, number, image, ascii_image, created_at
        FROM history
        WHERE user_email = ?1
        ORDER BY id DESC
        "#,
    )
    .bind(owner_email)
    .fetch_all(db)
    .await
    .context("list history by owner")?;
    Ok(rows)
}
