use std::sync::Arc;

use crate::aggregate::list_messages;
use crate::error::Result;
use crate::models::{Message, MessageDraft, MessageList};
use crate::options::ListOptions;
use crate::storage::Storage;

/// CRUD dei messaggi sopra uno [`Storage`].
///
/// Strato sottile: valida, delega allo storage e rilegge il record salvato.
/// Gli errori arrivano al chiamante senza retry.
#[derive(Clone)]
pub struct MessageService {
    storage: Arc<dyn Storage>,
}

impl MessageService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Valida e salva un nuovo messaggio, poi restituisce la copia letta dallo storage.
    pub async fn create(&self, mut draft: MessageDraft) -> Result<Message> {
        draft.validate()?;
        let created = self.storage.create(&draft).await?;
        self.get(&created.id).await
    }

    pub async fn list(&self, opts: &ListOptions) -> Result<MessageList> {
        list_messages(self.storage.as_ref(), opts).await
    }

    pub async fn get(&self, id: &str) -> Result<Message> {
        self.storage.get(id).await
    }

    /// L'esistenza di `id` non viene ricontrollata qui: il chiamante carica
    /// il messaggio con [`MessageService::get`] prima dell'update.
    pub async fn update(&self, id: &str, mut draft: MessageDraft) -> Result<Message> {
        draft.validate()?;
        self.storage.update(id, &draft).await?;
        self.get(id).await
    }
}
