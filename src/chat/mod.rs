mod core;
mod language;
mod models;
mod offline;

pub use self::core::{
    DEFAULT_PROVIDER_TIMEOUT, DEFAULT_REQUEST_DEADLINE, Dispatcher, DispatcherBuilder,
};
pub use language::detect_language;
pub use models::{
    ChatReply, ChatRequest, Language, MEDIA_ONLY_PLACEHOLDER, MediaAttachment, RequestError,
    Status,
};
pub use offline::OfflineResponder;
