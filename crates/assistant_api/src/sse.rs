use serde_json::Value;

use crate::events::{Annotation, StreamEvent, ToolCall, ToolCallKind};

/// Incremental parser for SSE text streams.
#[derive(Debug, Default)]
pub struct SseStreamParser {
    buffer: String,
}

impl SseStreamParser {
    /// Feed arbitrary bytes into the parser and drain complete events.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<StreamEvent> {
        self.buffer.push_str(&String::from_utf8_lossy(bytes));
        let mut events = Vec::new();

        while let Some(split) = self.buffer.find("\n\n") {
            let frame = self.buffer[..split].to_string();
            self.buffer.drain(0..split + 2);

            if let Some(payload) = extract_data_payload(&frame) {
                if payload == "[DONE]" || payload.is_empty() {
                    continue;
                }

                match serde_json::from_str::<Value>(&payload) {
                    Ok(value) => {
                        if let Some(event) = map_event(value) {
                            events.push(event);
                        }
                    }
                    Err(error) => {
                        tracing::debug!(%error, "skipping undecodable SSE payload");
                    }
                }
            }
        }

        events
    }

    /// Parse a complete SSE payload string in one shot.
    pub fn parse_frames(input: &str) -> Vec<StreamEvent> {
        let mut parser = Self::default();
        parser.feed(input.as_bytes())
    }

    pub fn is_empty_buffer(&self) -> bool {
        self.buffer.trim().is_empty()
    }
}

fn extract_data_payload(frame: &str) -> Option<String> {
    let data_lines: Vec<&str> = frame
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect();

    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}

fn map_event(value: Value) -> Option<StreamEvent> {
    let event_type = value.get("type")?.as_str()?;

    match event_type {
        "message.created" => Some(StreamEvent::TextCreated),
        "message.delta" => {
            let delta = value
                .get("value")
                .and_then(|value| value.as_str())
                .unwrap_or("");
            Some(StreamEvent::TextDelta {
                value: delta.to_owned(),
                annotations: parse_annotations(&value),
            })
        }
        "message.image" => {
            let file_id = value
                .get("file_id")
                .and_then(|value| value.as_str())
                .map(ToString::to_string)?;
            Some(StreamEvent::ImageFile { file_id })
        }
        "tool_call.created" => {
            let kind = parse_kind(&value);
            Some(StreamEvent::ToolCallCreated { kind })
        }
        "tool_call.delta" => {
            let kind = parse_kind(&value);
            let fragment = value
                .get("fragment")
                .and_then(|value| value.as_str())
                .unwrap_or("");
            Some(StreamEvent::ToolCallDelta {
                kind,
                fragment: fragment.to_owned(),
            })
        }
        "run.requires_action" => {
            let run_id = value
                .get("run_id")
                .and_then(|value| value.as_str())
                .map(ToString::to_string)?;
            Some(StreamEvent::RunRequiresAction {
                run_id,
                tool_calls: parse_tool_calls(&value),
            })
        }
        "run.completed" => Some(StreamEvent::RunCompleted),
        "run.failed" => {
            let message = value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(ToString::to_string);
            Some(StreamEvent::RunFailed { message })
        }
        other => Some(StreamEvent::Unknown {
            event_type: other.to_owned(),
            payload: value,
        }),
    }
}

fn parse_kind(value: &Value) -> ToolCallKind {
    value
        .get("kind")
        .and_then(|kind| kind.as_str())
        .map(ToolCallKind::parse)
        .unwrap_or_else(|| ToolCallKind::Other(String::new()))
}

fn parse_annotations(value: &Value) -> Vec<Annotation> {
    value
        .get("annotations")
        .and_then(|annotations| annotations.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<Annotation>(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn parse_tool_calls(value: &Value) -> Vec<ToolCall> {
    value
        .get("tool_calls")
        .and_then(|calls| calls.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<ToolCall>(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::SseStreamParser;
    use crate::events::StreamEvent;

    #[test]
    fn parse_sse_frames_incrementally() {
        let mut parser = SseStreamParser::default();
        let mut events = Vec::new();

        events.extend(
            parser.feed(b"data: {\"type\":\"message.delta\",\"value\":\"Hello\"}\n\n"),
        );
        assert_eq!(events.len(), 1);

        events.extend(parser.feed(b"data: [DONE]\n\n"));
        assert_eq!(events.len(), 1);
        assert!(parser.is_empty_buffer());
    }

    #[test]
    fn partial_frame_is_buffered_until_complete() {
        let mut parser = SseStreamParser::default();

        let first = parser.feed(b"data: {\"type\":\"message.del");
        assert!(first.is_empty());

        let second = parser.feed(b"ta\",\"value\":\"Hi\"}\n\n");
        assert_eq!(
            second,
            vec![StreamEvent::TextDelta {
                value: "Hi".to_owned(),
                annotations: Vec::new(),
            }]
        );
    }
}
