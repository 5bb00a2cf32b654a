//! Caricamento iniziale dei messaggi da CSV.
//!
//! Formato: una riga di intestazione, poi record da cinque colonne
//! `id, name, email, text, creation_time` con creation_time in RFC3339.
//! Il caricamento sostituisce l'intera collezione.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use bacheca_core::utils::time::truncate_to_millis;
use bacheca_core::Message;
use time::{format_description::well_known::Rfc3339, OffsetDateTime, UtcOffset};
use tracing::info;

use crate::storage::Backend;

const COLUMNS: usize = 5;

/// Legge tutti i record del CSV. Al primo record non valido fallisce indicando la riga.
pub fn read_messages<R: Read>(reader: R) -> anyhow::Result<Vec<Message>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut messages = Vec::new();
    for record in csv.records() {
        let record = record.context("read csv record")?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if record.len() != COLUMNS {
            bail!(
                "line {line}: expected {COLUMNS} columns, found {}",
                record.len()
            );
        }
        let creation_time = OffsetDateTime::parse(&record[4], &Rfc3339)
            .with_context(|| format!("invalid time on line {line}"))?
            .to_offset(UtcOffset::UTC);
        messages.push(Message {
            id: record[0].to_string(),
            name: record[1].to_string(),
            email: record[2].to_string(),
            text: record[3].to_string(),
            creation_time: truncate_to_millis(creation_time),
        });
    }
    Ok(messages)
}

pub fn load_csv(path: &Path) -> anyhow::Result<Vec<Message>> {
    let file = File::open(path).with_context(|| format!("open csv file {:?}", path))?;
    read_messages(file).with_context(|| format!("parse csv file {:?}", path))
}

/// Sostituisce il contenuto dello storage con i messaggi del CSV.
pub async fn seed_from_csv(backend: &Backend, path: &Path) -> anyhow::Result<usize> {
    info!("loading csv file {:?}", path);
    let messages = load_csv(path)?;
    let count = messages.len();
    backend.replace_all(messages).await?;
    info!("loaded {count} messages from {:?}", path);
    Ok(count)
}
