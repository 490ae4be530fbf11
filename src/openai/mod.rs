//! Chat completion client for the generative-text service.
//!
//! Speaks the OpenAI-compatible `/chat/completions` protocol with JSON
//! response mode. Requests are made once; there is no retry layer.
//!
//! `OpenAiClient` is `Clone + Send + Sync` and shares one HTTP connection
//! pool between clones.

mod client;
mod error;
mod models;

pub use client::OpenAiClient;
pub use error::{OpenAiError, OpenAiResult};
pub use models::{
    ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatRole, ChoiceMessage, ResponseFormat,
};
