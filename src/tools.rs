//! Host-side resolution of delegated tool calls.

use assistant_api::{ToolCall, ToolOutput};
use futures_util::future::{join_all, BoxFuture};

/// Externally supplied resolver for calls the assistant cannot execute
/// itself. Implementations may do arbitrary I/O; the future's error string
/// becomes the call's reported output rather than aborting the batch.
pub trait ToolHandler: Send + Sync {
    fn handle<'a>(&'a self, call: &'a ToolCall) -> BoxFuture<'a, Result<String, String>>;
}

/// Handler that resolves every call with an empty output.
///
/// The default for sessions that never expect delegated calls; mirrors a
/// backend configured without host-mediated tools.
#[derive(Debug, Default)]
pub struct NoopToolHandler;

impl ToolHandler for NoopToolHandler {
    fn handle<'a>(&'a self, _call: &'a ToolCall) -> BoxFuture<'a, Result<String, String>> {
        Box::pin(async { Ok(String::new()) })
    }
}

/// Resolve all pending calls concurrently and return one output per call
/// id, in call order.
///
/// The backend requires one-to-one completeness, so a failed handler is
/// encoded as that call's error output instead of dropping the entry.
pub async fn resolve_tool_calls(handler: &dyn ToolHandler, calls: &[ToolCall]) -> Vec<ToolOutput> {
    let resolved = join_all(calls.iter().map(|call| handler.handle(call))).await;

    calls
        .iter()
        .zip(resolved)
        .map(|(call, result)| match result {
            Ok(output) => ToolOutput::new(call.id.clone(), output),
            Err(error) => {
                tracing::warn!(call_id = %call.id, %error, "tool handler failed");
                ToolOutput::new(call.id.clone(), format!("error: {error}"))
            }
        })
        .collect()
}
