use anyhow::Context;
use bacheca_core::MessageService;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

use crate::config::Credentials;

pub mod auth;
pub mod config;
pub mod controllers;
pub mod error;
pub mod routes;
pub mod seed;
pub mod storage;

/// Stato condiviso fra gli handler, costruito una volta sola in `main`.
#[derive(Clone)]
pub struct AppState {
    pub service: MessageService,
    pub credentials: Credentials,
}

pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

// Dato un percorso di file, restituisce un URL SQLite valido. Crea le directory genitrici se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    if s.starts_with('/') {
        Ok(format!("sqlite://{}", s))
    } else {
        Ok(format!("sqlite:///{}", s))
    }
}

/// Converte il valore di DATABASE_URL in un URL SQLite.
/// Accetta "sqlite::memory:", un URL "sqlite://...", la forma breve
/// "sqlite:file.db" oppure un semplice percorso.
pub fn sqlite_url(raw: &str) -> anyhow::Result<String> {
    if raw == SQLITE_MEMORY_URL {
        return Ok(raw.to_string());
    }
    // Rimuovi il prefisso "sqlite:" (in tutte le sue forme) per ottenere il percorso del file.
    let path_part = raw
        .strip_prefix("sqlite:///")
        .map(|p| format!("/{p}"))
        .or_else(|| raw.strip_prefix("sqlite://").map(str::to_string))
        .or_else(|| raw.strip_prefix("sqlite:").map(str::to_string))
        .unwrap_or_else(|| raw.to_string());
    sqlite_url_for_path(Path::new(&path_part))
}

// Connect to the database and return a connection pool.
pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    // ogni connessione a ":memory:" apre un database diverso: ne teniamo una sola, sempre viva
    let options = if db_url == SQLITE_MEMORY_URL {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    };
    let pool = options
        .connect(db_url)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Esegue le migrazioni del database. Crea tabella e indice se non esistono.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id            TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            email         TEXT NOT NULL,
            text          TEXT NOT NULL,
            creation_time INTEGER NOT NULL
        );"#,
        r#"
        CREATE INDEX IF NOT EXISTS messages_creation_time
            ON messages (creation_time DESC);"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", &s[..s.len().min(40)].replace('\n', " ")))?;
    }
    Ok(())
}
