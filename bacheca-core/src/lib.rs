//! bacheca-core: tipi condivisi della bacheca (modelli, paginazione, errori),
//! il trait di storage e il servizio CRUD. Niente I/O di rete o su disco.

pub mod aggregate;
pub mod error;
pub mod models;
pub mod options;
pub mod service;
pub mod storage;
pub mod utils;

// Re-export utili per ridurre i percorsi nel crate server
pub use aggregate::list_messages;
pub use error::{BoardError, ErrorBody, Field};
pub use models::{Message, MessageDraft, MessageList};
pub use options::{ListOptions, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use service::MessageService;
pub use storage::{MemoryStorage, Storage};
pub use utils::{new_message_id, now_utc};
