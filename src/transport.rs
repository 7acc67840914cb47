//! Seams between the conversation core and its network collaborators.
//!
//! The core drives exchanges and the gate through these traits; production
//! code plugs in the real HTTP clients below, tests plug in scripted fakes.

use assistant_api::{
    AssistantApiClient, AssistantApiError, ExchangeStream, StreamEvent, ThreadHandle, ToolOutput,
};
use auth_api::{AuthApiClient, AuthApiError, CredentialGrant};
use futures_util::future::BoxFuture;

/// Pull-based source of normalized stream events for one exchange.
pub trait EventSource: Send {
    /// Next event in arrival order; `Ok(None)` marks end of stream.
    fn next_event(&mut self) -> BoxFuture<'_, Result<Option<StreamEvent>, AssistantApiError>>;
}

impl EventSource for ExchangeStream {
    fn next_event(&mut self) -> BoxFuture<'_, Result<Option<StreamEvent>, AssistantApiError>> {
        Box::pin(ExchangeStream::next_event(self))
    }
}

/// Conversation backend boundary: thread creation plus the two stream-
/// opening POSTs. The credential is passed per call because the same
/// session flips from anonymous to authenticated mid-conversation.
pub trait ExchangeTransport: Send + Sync {
    fn create_thread<'a>(
        &'a self,
        credential: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ThreadHandle, AssistantApiError>>;

    fn open_message_stream<'a>(
        &'a self,
        thread_id: &'a str,
        content: &'a str,
        credential: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Box<dyn EventSource>, AssistantApiError>>;

    fn submit_tool_outputs<'a>(
        &'a self,
        thread_id: &'a str,
        run_id: &'a str,
        outputs: Vec<ToolOutput>,
        credential: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Box<dyn EventSource>, AssistantApiError>>;
}

impl ExchangeTransport for AssistantApiClient {
    fn create_thread<'a>(
        &'a self,
        credential: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ThreadHandle, AssistantApiError>> {
        Box::pin(AssistantApiClient::create_thread(self, credential))
    }

    fn open_message_stream<'a>(
        &'a self,
        thread_id: &'a str,
        content: &'a str,
        credential: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Box<dyn EventSource>, AssistantApiError>> {
        Box::pin(async move {
            let stream =
                AssistantApiClient::open_message_stream(self, thread_id, content, credential)
                    .await?;
            Ok(Box::new(stream) as Box<dyn EventSource>)
        })
    }

    fn submit_tool_outputs<'a>(
        &'a self,
        thread_id: &'a str,
        run_id: &'a str,
        outputs: Vec<ToolOutput>,
        credential: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Box<dyn EventSource>, AssistantApiError>> {
        Box::pin(async move {
            let stream =
                AssistantApiClient::submit_tool_outputs(self, thread_id, run_id, outputs, credential)
                    .await?;
            Ok(Box::new(stream) as Box<dyn EventSource>)
        })
    }
}

/// Auth backend boundary used by the gate (register) and the session's
/// returning-user path (login).
pub trait AuthBackend: Send + Sync {
    fn register<'a>(
        &'a self,
        identifier: &'a str,
        secret: &'a str,
    ) -> BoxFuture<'a, Result<CredentialGrant, AuthApiError>>;

    fn login<'a>(
        &'a self,
        identifier: &'a str,
        secret: &'a str,
    ) -> BoxFuture<'a, Result<CredentialGrant, AuthApiError>>;
}

impl AuthBackend for AuthApiClient {
    fn register<'a>(
        &'a self,
        identifier: &'a str,
        secret: &'a str,
    ) -> BoxFuture<'a, Result<CredentialGrant, AuthApiError>> {
        Box::pin(AuthApiClient::register(self, identifier, secret))
    }

    fn login<'a>(
        &'a self,
        identifier: &'a str,
        secret: &'a str,
    ) -> BoxFuture<'a, Result<CredentialGrant, AuthApiError>> {
        Box::pin(AuthApiClient::login(self, identifier, secret))
    }
}
