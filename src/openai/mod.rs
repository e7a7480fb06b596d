mod core;
pub use self::core::{EMPTY_COMPLETION_PLACEHOLDER, Message, Role, completion, completion_text};
