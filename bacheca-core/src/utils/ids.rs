use uuid::Uuid;

/// Genera un nuovo id di messaggio (UUIDv4) come stringa.
pub fn new_message_id() -> String {
    Uuid::new_v4().to_string()
}
