use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind discriminator carried by tool-call stream events.
///
/// Only code-execution calls render into the transcript; function calls are
/// resolved host-side through the delegation path. Kinds this client does
/// not recognize are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCallKind {
    CodeExecution,
    Function,
    Other(String),
}

impl ToolCallKind {
    pub fn parse(value: &str) -> Self {
        match value {
            "code_execution" => Self::CodeExecution,
            "function" => Self::Function,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::CodeExecution => "code_execution",
            Self::Function => "function",
            Self::Other(value) => value,
        }
    }
}

impl Serialize for ToolCallKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ToolCallKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// One delegated call pending host resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub kind: ToolCallKind,
    #[serde(default)]
    pub payload: Value,
}

/// In-text citation marker emitted alongside a text delta.
///
/// `match_text` is the literal placeholder the backend wrote into the
/// message; `target_file_id` identifies the retrievable file it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "text")]
    pub match_text: String,
    #[serde(rename = "file_id")]
    pub target_file_id: String,
}

/// Stream event emitted by the parser after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StreamEvent {
    #[serde(rename = "message.created")]
    TextCreated,
    #[serde(rename = "message.delta")]
    TextDelta {
        value: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        annotations: Vec<Annotation>,
    },
    #[serde(rename = "message.image")]
    ImageFile { file_id: String },
    #[serde(rename = "tool_call.created")]
    ToolCallCreated { kind: ToolCallKind },
    #[serde(rename = "tool_call.delta")]
    ToolCallDelta { kind: ToolCallKind, fragment: String },
    #[serde(rename = "run.requires_action")]
    RunRequiresAction {
        run_id: String,
        tool_calls: Vec<ToolCall>,
    },
    #[serde(rename = "run.completed")]
    RunCompleted,
    #[serde(rename = "run.failed")]
    RunFailed { message: Option<String> },
    /// Unrecognized event type retained for skip-don't-crash passthrough.
    #[serde(rename = "unknown")]
    Unknown { event_type: String, payload: Value },
}

impl StreamEvent {
    /// Returns true when this event ends the exchange.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::RunCompleted | Self::RunFailed { .. })
    }
}
