//! Capacità di persistenza dei messaggi.
//!
//! Ogni operazione è un future: se il chiamante lo abbandona (drop),
//! l'operazione viene annullata.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Message, MessageDraft};
use crate::options::ListOptions;

pub mod memory;

pub use memory::MemoryStorage;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Assegna id e creation_time, salva il record e lo restituisce.
    async fn create(&self, draft: &MessageDraft) -> Result<Message>;

    /// `BoardError::NotFound` se non esiste nessun record con questo id.
    async fn get(&self, id: &str) -> Result<Message>;

    /// Al massimo `per_page` messaggi dopo `offset()`, per creation_time decrescente.
    async fn list(&self, opts: &ListOptions) -> Result<Vec<Message>>;

    async fn count_total(&self) -> Result<u64>;

    /// Sovrascrive name, email e text; id e creation_time restano invariati.
    async fn update(&self, id: &str, draft: &MessageDraft) -> Result<()>;
}
