use serde::{Deserialize, Serialize};

/// Response body returned when a conversation thread is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadHandle {
    #[serde(rename = "threadId")]
    pub thread_id: String,
}

/// Request body for posting a user message to a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

impl MessageRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// One resolved tool-call output, keyed by the backend's call id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

impl ToolOutput {
    pub fn new(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            output: output.into(),
        }
    }
}

/// Request body for resuming a paused run with tool-call outputs.
///
/// The backend requires exactly one output per pending call id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(rename = "runId")]
    pub run_id: String,
    #[serde(rename = "toolCallOutputs")]
    pub tool_call_outputs: Vec<ToolOutput>,
}

impl ActionRequest {
    pub fn new(run_id: impl Into<String>, tool_call_outputs: Vec<ToolOutput>) -> Self {
        Self {
            run_id: run_id.into(),
            tool_call_outputs,
        }
    }
}
