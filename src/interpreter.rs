//! Applies one exchange's event stream to the transcript, in arrival order,
//! pausing for tool-call delegation and resuming on the continuation
//! stream.

use assistant_api::{StreamEvent, ToolCall, ToolCallKind};

use crate::annotations::image_markup;
use crate::error::ChatError;
use crate::tools::{resolve_tool_calls, ToolHandler};
use crate::transcript::{Role, Transcript};
use crate::transport::ExchangeTransport;

/// Per-exchange run state, discarded when the run reaches a terminal event.
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    pub thread_id: String,
    pub run_id: Option<String>,
    pub pending_tool_calls: Vec<ToolCall>,
}

impl RunContext {
    fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            run_id: None,
            pending_tool_calls: Vec::new(),
        }
    }
}

/// What the caller must do after applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Keep pulling events from the current stream.
    Continue,
    /// Resolve the pending tool calls and open the continuation stream.
    RequiresAction,
    /// The run finished; the exchange is complete.
    Completed,
    /// The run failed with a display-safe message.
    Failed(String),
}

/// Interpreter for one exchange's event sequence.
pub struct StreamInterpreter {
    context: RunContext,
}

impl StreamInterpreter {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            context: RunContext::new(thread_id),
        }
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Apply a single event to the transcript.
    ///
    /// Unknown event types are skipped; a delta for a role with no open
    /// message synthesizes a placeholder inside the transcript rather than
    /// failing the exchange.
    pub fn apply_event(&mut self, transcript: &mut Transcript, event: StreamEvent) -> EventOutcome {
        match event {
            StreamEvent::TextCreated => {
                transcript.append(Role::Assistant, "");
                EventOutcome::Continue
            }
            StreamEvent::TextDelta { value, annotations } => {
                transcript.append_delta(Role::Assistant, &value);
                if !annotations.is_empty() {
                    transcript.rewrite_last(Role::Assistant, &annotations);
                }
                EventOutcome::Continue
            }
            StreamEvent::ImageFile { file_id } => {
                transcript.append_delta(Role::Assistant, &image_markup(&file_id));
                EventOutcome::Continue
            }
            StreamEvent::ToolCallCreated { kind } => {
                if kind == ToolCallKind::CodeExecution {
                    transcript.append(Role::Code, "");
                }
                EventOutcome::Continue
            }
            StreamEvent::ToolCallDelta { kind, fragment } => {
                if kind == ToolCallKind::CodeExecution {
                    transcript.append_delta(Role::Code, &fragment);
                }
                EventOutcome::Continue
            }
            StreamEvent::RunRequiresAction { run_id, tool_calls } => {
                self.context.run_id = Some(run_id);
                self.context.pending_tool_calls = tool_calls;
                EventOutcome::RequiresAction
            }
            StreamEvent::RunCompleted => EventOutcome::Completed,
            StreamEvent::RunFailed { message } => EventOutcome::Failed(
                message.unwrap_or_else(|| "the assistant could not finish its reply".to_string()),
            ),
            StreamEvent::Unknown { event_type, .. } => {
                tracing::debug!(%event_type, "skipping unrecognized stream event");
                EventOutcome::Continue
            }
        }
    }

    /// Take the pending action recorded by a requires-action event.
    pub fn take_pending_action(&mut self) -> Option<(String, Vec<ToolCall>)> {
        let run_id = self.context.run_id.take()?;
        let calls = std::mem::take(&mut self.context.pending_tool_calls);
        Some((run_id, calls))
    }
}

/// Run one full exchange: open the message stream, apply every event in
/// arrival order, and service requires-action pauses by resolving tool
/// calls and continuing on the stream their submission returns.
///
/// Transcript content appended before a failure is left in place.
pub async fn run_exchange(
    transport: &dyn ExchangeTransport,
    tools: &dyn ToolHandler,
    transcript: &mut Transcript,
    thread_id: &str,
    content: &str,
    credential: Option<&str>,
) -> Result<(), ChatError> {
    let mut interpreter = StreamInterpreter::new(thread_id);
    let mut stream = transport
        .open_message_stream(thread_id, content, credential)
        .await?;

    loop {
        let Some(event) = stream.next_event().await? else {
            return Err(ChatError::ExchangeFailed(
                "stream ended without a terminal run event".to_string(),
            ));
        };

        match interpreter.apply_event(transcript, event) {
            EventOutcome::Continue => {}
            EventOutcome::RequiresAction => {
                let Some((run_id, calls)) = interpreter.take_pending_action() else {
                    return Err(ChatError::ExchangeFailed(
                        "requires-action event carried no pending tool calls".to_string(),
                    ));
                };
                let outputs = resolve_tool_calls(tools, &calls).await;
                stream = transport
                    .submit_tool_outputs(thread_id, &run_id, outputs, credential)
                    .await?;
            }
            EventOutcome::Completed => return Ok(()),
            EventOutcome::Failed(message) => return Err(ChatError::ExchangeFailed(message)),
        }
    }
}
