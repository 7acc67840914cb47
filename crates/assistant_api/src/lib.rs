//! Transport-only client primitives for the conversation backend.
//!
//! This crate owns request building, response parsing, and SSE stream
//! normalization for the conversation-thread endpoints. It intentionally
//! contains no transcript state, no gating logic, and no UI coupling.
//!
//! SSE normalization produces a closed [`StreamEvent`] union; event types
//! the parser does not recognize surface as [`StreamEvent::Unknown`] so
//! callers can skip them without failing the exchange.

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod headers;
pub mod payload;
pub mod retry;
pub mod sse;
pub mod url;

pub use client::{AssistantApiClient, ExchangeStream};
pub use config::AssistantApiConfig;
pub use error::AssistantApiError;
pub use events::{Annotation, StreamEvent, ToolCall, ToolCallKind};
pub use payload::{ActionRequest, MessageRequest, ThreadHandle, ToolOutput};
pub use sse::SseStreamParser;
pub use url::{actions_url, messages_url, normalize_base_url, threads_url};
