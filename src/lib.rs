//! Streaming conversation core for an assistant chat client.
//!
//! Invariant: one exchange at a time. Events for an exchange are applied
//! to the transcript strictly in arrival order, and new submissions are
//! rejected while its stream is open.
//!
//! # Public API Overview
//! - Hold conversation state in a [`Transcript`] of role-tagged messages.
//! - Drive one exchange's event stream with [`StreamInterpreter`] /
//!   [`run_exchange`], including tool-call delegation through a
//!   [`ToolHandler`].
//! - Interpose the usage gate with [`AuthGate`]; it pauses the
//!   conversation to capture credentials and replays the deferred message
//!   on success.
//! - Or let [`ChatSession`] wire all of the above to the HTTP transports.

pub mod annotations;
pub mod error;
pub mod gate;
pub mod interpreter;
pub mod session;
pub mod tools;
pub mod transcript;
pub mod transport;

pub use error::ChatError;
pub use gate::{AuthGate, GateOutcome, GateState, DEFAULT_GATE_THRESHOLD};
pub use interpreter::{run_exchange, EventOutcome, RunContext, StreamInterpreter};
pub use session::{ChatSession, SessionConfig, SessionOptions, SubmitOutcome, QUICK_QUESTIONS};
pub use tools::{resolve_tool_calls, NoopToolHandler, ToolHandler};
pub use transcript::{Message, Role, Transcript};
pub use transport::{AuthBackend, EventSource, ExchangeTransport};
