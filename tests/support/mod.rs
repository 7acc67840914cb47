//! Scripted stand-ins for the network seams.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use assistant_api::{AssistantApiError, StreamEvent, ThreadHandle, ToolOutput};
use auth_api::{AuthApiError, CredentialGrant, StatusCode};
use futures_util::future::BoxFuture;
use palaver::transport::{AuthBackend, EventSource, ExchangeTransport};

pub enum ScriptItem {
    Event(StreamEvent),
    Fail(String),
}

pub struct ScriptedSource {
    items: VecDeque<ScriptItem>,
}

impl ScriptedSource {
    pub fn new(items: Vec<ScriptItem>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl EventSource for ScriptedSource {
    fn next_event(&mut self) -> BoxFuture<'_, Result<Option<StreamEvent>, AssistantApiError>> {
        let next = self.items.pop_front();
        Box::pin(async move {
            match next {
                Some(ScriptItem::Event(event)) => Ok(Some(event)),
                Some(ScriptItem::Fail(message)) => {
                    Err(AssistantApiError::MalformedStream(message))
                }
                None => Ok(None),
            }
        })
    }
}

/// Scripted conversation backend recording every call it receives.
#[derive(Default)]
pub struct FakeTransport {
    message_streams: Mutex<VecDeque<Vec<ScriptItem>>>,
    action_streams: Mutex<VecDeque<Vec<ScriptItem>>>,
    pub sent_messages: Mutex<Vec<(String, Option<String>)>>,
    pub submitted_actions: Mutex<Vec<(String, Vec<ToolOutput>, Option<String>)>>,
    pub threads_created: Mutex<usize>,
}

impl FakeTransport {
    pub fn push_message_stream(&self, items: Vec<ScriptItem>) {
        self.message_streams
            .lock()
            .expect("message stream scripts")
            .push_back(items);
    }

    pub fn push_action_stream(&self, items: Vec<ScriptItem>) {
        self.action_streams
            .lock()
            .expect("action stream scripts")
            .push_back(items);
    }
}

impl ExchangeTransport for FakeTransport {
    fn create_thread<'a>(
        &'a self,
        _credential: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ThreadHandle, AssistantApiError>> {
        Box::pin(async move {
            *self.threads_created.lock().expect("thread counter") += 1;
            Ok(ThreadHandle {
                thread_id: "thread-1".to_string(),
            })
        })
    }

    fn open_message_stream<'a>(
        &'a self,
        _thread_id: &'a str,
        content: &'a str,
        credential: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Box<dyn EventSource>, AssistantApiError>> {
        Box::pin(async move {
            self.sent_messages
                .lock()
                .expect("sent messages")
                .push((content.to_string(), credential.map(str::to_owned)));
            let items = self
                .message_streams
                .lock()
                .expect("message stream scripts")
                .pop_front()
                .expect("a scripted message stream for every message send");
            Ok(Box::new(ScriptedSource::new(items)) as Box<dyn EventSource>)
        })
    }

    fn submit_tool_outputs<'a>(
        &'a self,
        _thread_id: &'a str,
        run_id: &'a str,
        outputs: Vec<ToolOutput>,
        credential: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Box<dyn EventSource>, AssistantApiError>> {
        Box::pin(async move {
            self.submitted_actions.lock().expect("submitted actions").push((
                run_id.to_string(),
                outputs,
                credential.map(str::to_owned),
            ));
            let items = self
                .action_streams
                .lock()
                .expect("action stream scripts")
                .pop_front()
                .expect("a scripted action stream for every submission");
            Ok(Box::new(ScriptedSource::new(items)) as Box<dyn EventSource>)
        })
    }
}

/// Scripted auth backend recording register/login attempts.
#[derive(Default)]
pub struct FakeAuthBackend {
    register_outcomes: Mutex<VecDeque<Result<CredentialGrant, AuthApiError>>>,
    login_outcomes: Mutex<VecDeque<Result<CredentialGrant, AuthApiError>>>,
    pub register_calls: Mutex<Vec<(String, String)>>,
    pub login_calls: Mutex<Vec<(String, String)>>,
}

impl FakeAuthBackend {
    pub fn push_register_outcome(&self, outcome: Result<CredentialGrant, AuthApiError>) {
        self.register_outcomes
            .lock()
            .expect("register outcomes")
            .push_back(outcome);
    }

    pub fn push_login_outcome(&self, outcome: Result<CredentialGrant, AuthApiError>) {
        self.login_outcomes
            .lock()
            .expect("login outcomes")
            .push_back(outcome);
    }

    pub fn register_call_count(&self) -> usize {
        self.register_calls.lock().expect("register calls").len()
    }
}

impl AuthBackend for FakeAuthBackend {
    fn register<'a>(
        &'a self,
        identifier: &'a str,
        secret: &'a str,
    ) -> BoxFuture<'a, Result<CredentialGrant, AuthApiError>> {
        Box::pin(async move {
            self.register_calls
                .lock()
                .expect("register calls")
                .push((identifier.to_string(), secret.to_string()));
            self.register_outcomes
                .lock()
                .expect("register outcomes")
                .pop_front()
                .expect("a scripted outcome for every register call")
        })
    }

    fn login<'a>(
        &'a self,
        identifier: &'a str,
        secret: &'a str,
    ) -> BoxFuture<'a, Result<CredentialGrant, AuthApiError>> {
        Box::pin(async move {
            self.login_calls
                .lock()
                .expect("login calls")
                .push((identifier.to_string(), secret.to_string()));
            self.login_outcomes
                .lock()
                .expect("login outcomes")
                .pop_front()
                .expect("a scripted outcome for every login call")
        })
    }
}

pub fn grant(token: &str) -> CredentialGrant {
    CredentialGrant {
        token: token.to_string(),
    }
}

pub fn rejected(status: u16, message: &str) -> AuthApiError {
    AuthApiError::Rejected {
        status: StatusCode::from_u16(status).expect("valid status code"),
        message: message.to_string(),
    }
}
