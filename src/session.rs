//! Wires the transcript, gate, interpreter, and transport clients into one
//! conversation session with a single thread of control.

use std::path::PathBuf;
use std::sync::Arc;

use assistant_api::{AssistantApiClient, AssistantApiConfig};
use auth_api::{AuthApiClient, AuthApiConfig, IdentifierPolicy, SecretPolicy};
use credential_store::CredentialStore;

use crate::error::ChatError;
use crate::gate::{AuthGate, GateOutcome, GateState, DEFAULT_GATE_THRESHOLD};
use crate::interpreter::run_exchange;
use crate::tools::{NoopToolHandler, ToolHandler};
use crate::transcript::{Role, Transcript};
use crate::transport::{AuthBackend, ExchangeTransport};

/// Starter questions offered before the first message. The picker surface
/// that renders them is a host concern; a selection enters the session
/// exactly as typed input does.
pub const QUICK_QUESTIONS: [&str; 4] = [
    "Can you help me plan healthier meals for this week?",
    "What exercise routine would suit a beginner?",
    "How can I sleep better on a busy schedule?",
    "I'm traveling soon. How do I keep my routine on track?",
];

/// Gate and persistence knobs, separate from the transport configs so test
/// hosts can construct sessions around fake transports.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub store_path: PathBuf,
    /// Key into the credential store; minted fresh when absent.
    pub session_key: Option<String>,
    pub gate_threshold: u32,
    pub identifier_policy: IdentifierPolicy,
    pub secret_policy: SecretPolicy,
}

impl SessionOptions {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            session_key: None,
            gate_threshold: DEFAULT_GATE_THRESHOLD,
            identifier_policy: IdentifierPolicy::default(),
            secret_policy: SecretPolicy::default(),
        }
    }

    pub fn with_session_key(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = Some(session_key.into());
        self
    }

    pub fn with_gate_threshold(mut self, gate_threshold: u32) -> Self {
        self.gate_threshold = gate_threshold;
        self
    }

    pub fn with_identifier_policy(mut self, identifier_policy: IdentifierPolicy) -> Self {
        self.identifier_policy = identifier_policy;
        self
    }

    pub fn with_secret_policy(mut self, secret_policy: SecretPolicy) -> Self {
        self.secret_policy = secret_policy;
        self
    }
}

/// Full session configuration with real HTTP transports.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub assistant: AssistantApiConfig,
    pub auth: AuthApiConfig,
    pub options: SessionOptions,
}

/// What happened to one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// The exchange ran to completion.
    Exchanged,
    /// The gate consumed the input (capture step).
    Held,
    /// Local validation failed; message for inline display.
    Rejected(String),
    /// Registration was rejected; banner set, gate reverted one step.
    RegistrationFailed(String),
    /// The exchange was aborted; banner set, partial transcript retained.
    ExchangeFailed(String),
}

/// One conversation session: single logical thread of control, at most one
/// in-flight exchange.
pub struct ChatSession {
    transcript: Transcript,
    gate: AuthGate,
    transport: Arc<dyn ExchangeTransport>,
    auth: Arc<dyn AuthBackend>,
    tools: Arc<dyn ToolHandler>,
    store: CredentialStore,
    session_key: String,
    thread_id: Option<String>,
    input_disabled: bool,
    banner: Option<String>,
}

impl ChatSession {
    /// Build a session over real HTTP clients, loading any persisted
    /// credential to pre-authenticate.
    pub fn new(config: SessionConfig) -> Result<Self, ChatError> {
        let transport = Arc::new(AssistantApiClient::new(config.assistant)?);
        let auth = Arc::new(AuthApiClient::new(config.auth)?);
        Self::with_transports(transport, auth, config.options)
    }

    /// Build a session around caller-supplied transport seams. This is the
    /// embedding and testing entry point; `new` delegates here.
    pub fn with_transports(
        transport: Arc<dyn ExchangeTransport>,
        auth: Arc<dyn AuthBackend>,
        options: SessionOptions,
    ) -> Result<Self, ChatError> {
        let store = CredentialStore::open(&options.store_path)?;
        let session_key = options
            .session_key
            .unwrap_or_else(CredentialStore::new_session_key);

        let gate = match store.load(&session_key) {
            Some(stored) => AuthGate::pre_authenticated(
                stored.token.clone(),
                options.identifier_policy,
                options.secret_policy,
            ),
            None => AuthGate::new(
                options.gate_threshold,
                options.identifier_policy,
                options.secret_policy,
            ),
        };

        Ok(Self {
            transcript: Transcript::new(),
            gate,
            transport,
            auth,
            tools: Arc::new(NoopToolHandler),
            store,
            session_key,
            thread_id: None,
            input_disabled: false,
            banner: None,
        })
    }

    /// Replace the tool handler used for delegated calls.
    pub fn with_tool_handler(mut self, tools: Arc<dyn ToolHandler>) -> Self {
        self.tools = tools;
        self
    }

    pub fn transcript(&self) -> &[crate::transcript::Message] {
        self.transcript.messages()
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    pub fn is_input_disabled(&self) -> bool {
        self.input_disabled
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn quick_questions(&self) -> &'static [&'static str] {
        &QUICK_QUESTIONS
    }

    /// Create the conversation thread up front. `submit` also does this
    /// lazily on first use.
    pub async fn start(&mut self) -> Result<(), ChatError> {
        self.ensure_thread().await?;
        Ok(())
    }

    /// Route one user submission through the gate and, when forwarded, run
    /// the full exchange. Input is rejected while a stream is open; the
    /// gate transition (including any registration round trip) completes
    /// before this returns.
    pub async fn submit(&mut self, input: &str) -> Result<SubmitOutcome, ChatError> {
        let content = input.trim();
        if content.is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }
        if self.input_disabled {
            return Err(ChatError::Busy);
        }

        self.input_disabled = true;
        let result = self.submit_gated(content).await;
        self.input_disabled = false;
        result
    }

    /// A quick-question selection enters the gate exactly as typed input.
    pub async fn submit_quick_question(
        &mut self,
        question: &str,
    ) -> Result<SubmitOutcome, ChatError> {
        self.submit(question).await
    }

    /// Returning-user sign-in. Validates with the same policies as the
    /// capture flow, then adopts and persists the granted token.
    pub async fn login(&mut self, identifier: &str, secret: &str) -> Result<(), ChatError> {
        let identifier = identifier.trim();
        if let Err(error) = self.gate.identifier_policy().validate(identifier) {
            return Err(ChatError::Validation(error.to_string()));
        }
        if let Err(error) = self.gate.secret_policy().validate(secret) {
            return Err(ChatError::Validation(error.to_string()));
        }

        match self.auth.login(identifier, secret).await {
            Ok(grant) => {
                self.gate.adopt_credential(grant.token);
                self.persist_credential()?;
                self.transcript
                    .append(Role::System, "Welcome back. You're signed in.");
                Ok(())
            }
            Err(error) => {
                let message = error.display_message();
                tracing::warn!(%error, "login failed");
                self.transcript
                    .append(Role::System, format!("Sign-in failed: {message}."));
                self.banner = Some(message);
                Err(ChatError::Auth(error))
            }
        }
    }

    async fn submit_gated(&mut self, content: &str) -> Result<SubmitOutcome, ChatError> {
        let outcome = {
            let auth = Arc::clone(&self.auth);
            self.gate
                .submit(content, &mut self.transcript, auth.as_ref())
                .await
        };

        match outcome {
            GateOutcome::Forward { content } => {
                self.persist_credential()?;
                self.run_forwarded_exchange(&content).await
            }
            GateOutcome::Held => {
                self.persist_credential()?;
                Ok(SubmitOutcome::Held)
            }
            GateOutcome::Rejected { message } => Ok(SubmitOutcome::Rejected(message)),
            GateOutcome::RegistrationFailed { message } => {
                self.banner = Some(message.clone());
                Ok(SubmitOutcome::RegistrationFailed(message))
            }
        }
    }

    async fn run_forwarded_exchange(&mut self, content: &str) -> Result<SubmitOutcome, ChatError> {
        let thread_id = self.ensure_thread().await?;
        let credential = self.gate.credential_token().map(str::to_owned);

        self.transcript.append(Role::User, content);

        let transport = Arc::clone(&self.transport);
        let tools = Arc::clone(&self.tools);
        let result = run_exchange(
            transport.as_ref(),
            tools.as_ref(),
            &mut self.transcript,
            &thread_id,
            content,
            credential.as_deref(),
        )
        .await;

        match result {
            Ok(()) => Ok(SubmitOutcome::Exchanged),
            Err(ChatError::Transport(error)) => {
                tracing::warn!(%error, "exchange transport failure");
                let message = "The assistant connection was interrupted.".to_string();
                self.banner = Some(message.clone());
                Ok(SubmitOutcome::ExchangeFailed(message))
            }
            Err(ChatError::ExchangeFailed(message)) => {
                tracing::warn!(%message, "exchange reported failure");
                self.banner = Some(message.clone());
                Ok(SubmitOutcome::ExchangeFailed(message))
            }
            Err(other) => Err(other),
        }
    }

    async fn ensure_thread(&mut self) -> Result<String, ChatError> {
        if let Some(thread_id) = &self.thread_id {
            return Ok(thread_id.clone());
        }

        let credential = self.gate.credential_token().map(str::to_owned);
        let transport = Arc::clone(&self.transport);
        let handle = transport.create_thread(credential.as_deref()).await?;
        self.thread_id = Some(handle.thread_id.clone());
        Ok(handle.thread_id)
    }

    fn persist_credential(&mut self) -> Result<(), ChatError> {
        let Some(token) = self.gate.credential_token() else {
            return Ok(());
        };

        let already_stored = self
            .store
            .load(&self.session_key)
            .is_some_and(|stored| stored.token == token);
        if already_stored {
            return Ok(());
        }

        let token = token.to_owned();
        self.store.save(&self.session_key, token)?;
        Ok(())
    }
}
