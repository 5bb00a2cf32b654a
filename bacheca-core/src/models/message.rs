use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{BoardError, Field};

/// Messaggio persistito: id e creation_time sono assegnati dallo storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime, // RFC3339 UTC
}

/// Contenuto di un messaggio nuovo o da modificare.
///
/// Eventuali `id` e `creation_time` inviati dal client vengono ignorati in
/// deserializzazione; i campi assenti diventano stringhe vuote e li segnala
/// [`MessageDraft::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub text: String,
}

impl MessageDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            text: text.into(),
        }
    }

    /// Rimuove gli spazi in testa e in coda e controlla i campi obbligatori
    /// nell'ordine name, email, text. Si ferma al primo campo vuoto.
    pub fn validate(&mut self) -> Result<(), BoardError> {
        trim_in_place(&mut self.name);
        if self.name.is_empty() {
            return Err(BoardError::MissingField(Field::Name));
        }
        trim_in_place(&mut self.email);
        if self.email.is_empty() {
            return Err(BoardError::MissingField(Field::Email));
        }
        trim_in_place(&mut self.text);
        if self.text.is_empty() {
            return Err(BoardError::MissingField(Field::Text));
        }
        Ok(())
    }
}

impl From<&Message> for MessageDraft {
    fn from(msg: &Message) -> Self {
        Self::new(&msg.name, &msg.email, &msg.text)
    }
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}
