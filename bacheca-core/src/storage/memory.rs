use async_trait::async_trait;
use dashmap::DashMap;

use super::Storage;
use crate::error::{BoardError, Result};
use crate::models::{Message, MessageDraft};
use crate::options::ListOptions;
use crate::utils::{new_message_id, now_utc};

/// Storage in memoria, id -> messaggio. Non sopravvive al riavvio.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    messages: DashMap<String, Message>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sostituisce l'intera collezione con `messages`.
    pub fn replace_all(&self, messages: Vec<Message>) {
        self.messages.clear();
        for msg in messages {
            self.messages.insert(msg.id.clone(), msg);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create(&self, draft: &MessageDraft) -> Result<Message> {
        let msg = Message {
            id: new_message_id(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            text: draft.text.clone(),
            creation_time: now_utc(),
        };
        self.messages.insert(msg.id.clone(), msg.clone());
        Ok(msg)
    }

    async fn get(&self, id: &str) -> Result<Message> {
        self.messages
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(BoardError::NotFound)
    }

    async fn list(&self, opts: &ListOptions) -> Result<Vec<Message>> {
        let mut all: Vec<Message> = self.messages.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| {
            b.creation_time
                .cmp(&a.creation_time)
                .then_with(|| b.id.cmp(&a.id))
        });
        let skip = usize::try_from(opts.offset()).unwrap_or(usize::MAX);
        Ok(all
            .into_iter()
            .skip(skip)
            .take(opts.per_page as usize)
            .collect())
    }

    async fn count_total(&self) -> Result<u64> {
        Ok(self.messages.len() as u64)
    }

    async fn update(&self, id: &str, draft: &MessageDraft) -> Result<()> {
        // come un $set senza match: nessun errore se l'id non esiste
        if let Some(mut entry) = self.messages.get_mut(id) {
            entry.name = draft.name.clone();
            entry.email = draft.email.clone();
            entry.text = draft.text.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn seeded(n: usize) -> MemoryStorage {
        let storage = MemoryStorage::new();
        let base = datetime!(2020-08-12 15:30:00 UTC);
        storage.replace_all(
            (0..n)
                .map(|i| Message {
                    id: format!("id-{i}"),
                    name: format!("name {i}"),
                    email: "a@b.c".to_string(),
                    text: "text".to_string(),
                    creation_time: base + time::Duration::minutes(i as i64),
                })
                .collect(),
        );
        storage
    }

    #[tokio::test]
    async fn create_assigns_id_and_time() {
        let storage = MemoryStorage::new();
        let msg = storage
            .create(&MessageDraft::new("n", "e", "t"))
            .await
            .expect("create");
        assert!(!msg.id.is_empty());
        assert_eq!(storage.get(&msg.id).await.expect("get"), msg);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let storage = MemoryStorage::new();
        assert!(matches!(storage.get("nope").await, Err(BoardError::NotFound)));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paginated() {
        let storage = seeded(5);
        let first = storage.list(&ListOptions::new(2, 1)).await.expect("list");
        let ids: Vec<_> = first.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["id-4", "id-3"]);

        let last = storage.list(&ListOptions::new(2, 3)).await.expect("list");
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].id, "id-0");

        let beyond = storage.list(&ListOptions::new(10, 2)).await.expect("list");
        assert!(beyond.is_empty());
        assert_eq!(storage.count_total().await.expect("count"), 5);
    }

    #[tokio::test]
    async fn update_keeps_id_and_creation_time() {
        let storage = seeded(1);
        let before = storage.get("id-0").await.expect("get");
        storage
            .update("id-0", &MessageDraft::new("new", "new@b.c", "new text"))
            .await
            .expect("update");
        let after = storage.get("id-0").await.expect("get");
        assert_eq!(after.id, before.id);
        assert_eq!(after.creation_time, before.creation_time);
        assert_eq!(after.text, "new text");
    }

    #[tokio::test]
    async fn replace_all_drops_previous_records() {
        let storage = seeded(3);
        storage.replace_all(Vec::new());
        assert!(storage.is_empty());
    }
}
