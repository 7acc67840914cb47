use assistant_api::{ToolCall, ToolCallKind};
use futures_util::future::BoxFuture;
use palaver::{resolve_tool_calls, NoopToolHandler, ToolHandler};
use serde_json::json;

struct ScriptedHandler;

impl ToolHandler for ScriptedHandler {
    fn handle<'a>(&'a self, call: &'a ToolCall) -> BoxFuture<'a, Result<String, String>> {
        Box::pin(async move {
            match call.id.as_str() {
                "a" => Err("weather service unreachable".to_string()),
                "b" => Ok("overcast, 12C".to_string()),
                other => Ok(format!("unhandled call {other}")),
            }
        })
    }
}

fn call(id: &str) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        kind: ToolCallKind::Function,
        payload: json!({"name": "weather"}),
    }
}

#[tokio::test]
async fn delegation_submits_one_output_per_call_even_when_a_handler_fails() {
    let outputs = resolve_tool_calls(&ScriptedHandler, &[call("a"), call("b")]).await;

    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].tool_call_id, "a");
    assert_eq!(outputs[0].output, "error: weather service unreachable");
    assert_eq!(outputs[1].tool_call_id, "b");
    assert_eq!(outputs[1].output, "overcast, 12C");
}

#[tokio::test]
async fn delegation_preserves_call_order_in_outputs() {
    let outputs = resolve_tool_calls(&ScriptedHandler, &[call("b"), call("a"), call("c")]).await;

    let ids: Vec<&str> = outputs
        .iter()
        .map(|output| output.tool_call_id.as_str())
        .collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[tokio::test]
async fn delegation_with_no_calls_yields_no_outputs() {
    let outputs = resolve_tool_calls(&ScriptedHandler, &[]).await;
    assert!(outputs.is_empty());
}

#[tokio::test]
async fn noop_handler_resolves_every_call_with_empty_output() {
    let outputs = resolve_tool_calls(&NoopToolHandler, &[call("a"), call("b")]).await;

    assert_eq!(outputs.len(), 2);
    assert!(outputs.iter().all(|output| output.output.is_empty()));
}
