pub mod list;
pub mod message;

// Re-export per comodità
pub use list::MessageList;
pub use message::{Message, MessageDraft};
