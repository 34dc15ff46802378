use std::future::Future;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::entities::SqliteStore;
use crate::entities::dao::{ContactMessage, NewContactMessage};

pub trait ContactMessageStore: Send + Sync + 'static {
    /// Persist `message` and return it with its generated id.
    fn create(
        &self,
        message: NewContactMessage,
    ) -> impl Future<Output = Result<ContactMessage, sqlx::Error>> + Send;

    /// Up to `limit` messages, newest first, skipping the first `offset`.
    ///
    /// Bounds are not checked here; callers pass validated values.
    fn list_latest(
        &self,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = Result<Vec<ContactMessage>, sqlx::Error>> + Send;
}

type ContactMessageRow = (i64, String, String, String, Option<bool>, String);

impl ContactMessageStore for SqliteStore {
    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage, sqlx::Error> {
        let created_at = encode_timestamp(&message.created_at);
        let result = sqlx::query(
            "INSERT INTO contact_message (created_at, full_name, email, message, consent) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&created_at)
        .bind(&message.full_name)
        .bind(&message.email)
        .bind(&message.message)
        .bind(message.consent)
        .execute(&self.pool)
        .await?;
        Ok(message.into_persisted(result.last_insert_rowid()))
    }

    async fn list_latest(&self, limit: i64, offset: i64) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let rows: Vec<ContactMessageRow> = sqlx::query_as(
            "SELECT id, full_name, email, message, consent, created_at \
             FROM contact_message ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(row_to_message).collect()
    }
}

fn row_to_message(
    (id, full_name, email, message, consent, created_at): ContactMessageRow,
) -> Result<ContactMessage, sqlx::Error> {
    Ok(ContactMessage {
        id,
        full_name,
        email,
        message,
        consent: consent.unwrap_or(false),
        created_at: decode_timestamp(&created_at)?,
    })
}

/// Fixed-width UTC form so that `ORDER BY created_at` sorts chronologically.
fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            tracing::warn!(raw = %raw, error = %e, "failed to parse contact_message.created_at");
            sqlx::Error::Decode(Box::new(e))
        })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
