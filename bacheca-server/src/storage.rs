use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use bacheca_core::utils::{from_unix_millis, new_message_id, now_utc, to_unix_millis};
use bacheca_core::{BoardError, ListOptions, MemoryStorage, Message, MessageDraft, Storage};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::{connect_pool, run_migrations, sqlite_url};

/// Valore di DATABASE_URL che seleziona lo storage in memoria.
pub const MEMORY_BACKEND: &str = "memory";

type StorageResult<T> = Result<T, BoardError>;

/// Storage dei messaggi su SQLite. `creation_time` è salvato in millisecondi Unix.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Sostituisce l'intera tabella con `messages` in un'unica transazione.
    pub async fn replace_all(&self, messages: &[Message]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM messages").execute(&mut *tx).await?;
        for msg in messages {
            sqlx::query(
                "INSERT INTO messages (id, name, email, text, creation_time) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&msg.id)
            .bind(&msg.name)
            .bind(&msg.email)
            .bind(&msg.text)
            .bind(to_unix_millis(msg.creation_time))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}

fn row_to_message(row: &SqliteRow) -> StorageResult<Message> {
    let id: String = row.try_get("id").map_err(BoardError::storage)?;
    let millis: i64 = row.try_get("creation_time").map_err(BoardError::storage)?;
    let creation_time = from_unix_millis(millis).ok_or_else(|| {
        BoardError::storage(format!("invalid creation_time {millis} for message {id}"))
    })?;
    Ok(Message {
        name: row.try_get("name").map_err(BoardError::storage)?,
        email: row.try_get("email").map_err(BoardError::storage)?,
        text: row.try_get("text").map_err(BoardError::storage)?,
        id,
        creation_time,
    })
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn create(&self, draft: &MessageDraft) -> StorageResult<Message> {
        let msg = Message {
            id: new_message_id(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            text: draft.text.clone(),
            creation_time: now_utc(),
        };
        sqlx::query(
            "INSERT INTO messages (id, name, email, text, creation_time) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&msg.id)
        .bind(&msg.name)
        .bind(&msg.email)
        .bind(&msg.text)
        .bind(to_unix_millis(msg.creation_time))
        .execute(&self.pool)
        .await
        .map_err(BoardError::storage)?;
        Ok(msg)
    }

    async fn get(&self, id: &str) -> StorageResult<Message> {
        let row = sqlx::query("SELECT id, name, email, text, creation_time FROM messages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(BoardError::storage)?;
        match row {
            Some(row) => row_to_message(&row),
            None => Err(BoardError::NotFound),
        }
    }

    async fn list(&self, opts: &ListOptions) -> StorageResult<Vec<Message>> {
        let offset = i64::try_from(opts.offset()).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            "SELECT id, name, email, text, creation_time FROM messages \
             ORDER BY creation_time DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(i64::from(opts.per_page))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(BoardError::storage)?;
        rows.iter().map(row_to_message).collect()
    }

    async fn count_total(&self) -> StorageResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await
            .map_err(BoardError::storage)?;
        Ok(total.max(0) as u64)
    }

    async fn update(&self, id: &str, draft: &MessageDraft) -> StorageResult<()> {
        sqlx::query("UPDATE messages SET name = ?, email = ?, text = ? WHERE id = ?")
            .bind(&draft.name)
            .bind(&draft.email)
            .bind(&draft.text)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(BoardError::storage)?;
        Ok(())
    }
}

/// Lo storage scelto da DATABASE_URL.
#[derive(Clone)]
pub enum Backend {
    Memory(Arc<MemoryStorage>),
    Sqlite(SqliteStorage),
}

impl Backend {
    /// Apre lo storage: "memory" per quello in memoria, altrimenti SQLite
    /// (connessione e migrazioni).
    pub async fn open(database_url: &str) -> anyhow::Result<Self> {
        if database_url == MEMORY_BACKEND {
            info!("using in-memory storage");
            return Ok(Backend::Memory(Arc::new(MemoryStorage::new())));
        }
        let url = sqlite_url(database_url).context("build sqlite DATABASE_URL")?;
        info!("using sqlite storage at {url}");
        let pool = connect_pool(&url).await.context("connect to sqlite")?;
        run_migrations(&pool).await.context("run migrations")?;
        Ok(Backend::Sqlite(SqliteStorage::new(pool)))
    }

    pub async fn replace_all(&self, messages: Vec<Message>) -> anyhow::Result<()> {
        match self {
            Backend::Memory(storage) => storage.replace_all(messages),
            Backend::Sqlite(storage) => storage
                .replace_all(&messages)
                .await
                .context("replace messages table")?,
        }
        Ok(())
    }

    pub fn storage(&self) -> Arc<dyn Storage> {
        match self {
            Backend::Memory(storage) => storage.clone(),
            Backend::Sqlite(storage) => Arc::new(storage.clone()),
        }
    }
}
