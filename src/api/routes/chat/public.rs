//! Public types for the chat API
//!
//! The request body is validated by hand in `ChatRequest::parse` so
//! each kind of bad input gets its own error message.

pub use crate::chat::{
    ChatReply as ChatResponse, ChatRequest, Language, MediaAttachment, Status,
};
