pub mod ids;
pub mod time;

pub use self::ids::new_message_id;
pub use self::time::{from_unix_millis, now_utc, to_unix_millis};
