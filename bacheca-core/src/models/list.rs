use serde::{Deserialize, Serialize};

use super::Message;

/// Una pagina di messaggi (creation_time decrescente) insieme al totale della collezione.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageList {
    /// Numero di messaggi nell'intera collezione, indipendente dalla paginazione.
    pub total: u64,
    pub data: Vec<Message>,
}
