//! Usage-gated identity capture interleaved with the conversation.
//!
//! The gate watches user-originated exchanges and, at a configured
//! threshold, pauses forwarding to capture an account number and password.
//! The paused submission is held verbatim and replayed as a fresh exchange
//! the moment registration succeeds, so the user never retypes it.

use auth_api::{IdentifierPolicy, SecretPolicy};

use crate::transcript::{Role, Transcript};
use crate::transport::AuthBackend;

/// Default number of user exchanges allowed before the gate interposes.
pub const DEFAULT_GATE_THRESHOLD: u32 = 5;

/// Where the gate is in its capture flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Open,
    AwaitingIdentifier,
    AwaitingSecret,
    Authenticated,
}

/// What the session should do with a submission after the gate has seen it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Forward this content to the interpreter as a fresh exchange.
    Forward { content: String },
    /// The gate consumed the input (capture prompt or stored step).
    Held,
    /// Local validation failed; state unchanged, message surfaced inline.
    Rejected { message: String },
    /// The registration endpoint rejected the attempt; the gate reverted
    /// to awaiting the identifier.
    RegistrationFailed { message: String },
}

/// The identity-capture state machine.
///
/// Owns no I/O beyond the registration call through [`AuthBackend`]; the
/// session persists the captured token and runs forwarded exchanges.
pub struct AuthGate {
    state: GateState,
    exchange_count: u32,
    threshold: u32,
    deferred_message: Option<String>,
    pending_identifier: Option<String>,
    credential_token: Option<String>,
    identifier_policy: IdentifierPolicy,
    secret_policy: SecretPolicy,
}

impl AuthGate {
    pub fn new(
        threshold: u32,
        identifier_policy: IdentifierPolicy,
        secret_policy: SecretPolicy,
    ) -> Self {
        Self {
            state: GateState::Open,
            exchange_count: 0,
            threshold,
            deferred_message: None,
            pending_identifier: None,
            credential_token: None,
            identifier_policy,
            secret_policy,
        }
    }

    /// Gate for a session whose credential was loaded at startup; the
    /// threshold never arms.
    pub fn pre_authenticated(
        token: impl Into<String>,
        identifier_policy: IdentifierPolicy,
        secret_policy: SecretPolicy,
    ) -> Self {
        let mut gate = Self::new(DEFAULT_GATE_THRESHOLD, identifier_policy, secret_policy);
        gate.state = GateState::Authenticated;
        gate.credential_token = Some(token.into());
        gate
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn exchange_count(&self) -> u32 {
        self.exchange_count
    }

    pub fn credential_token(&self) -> Option<&str> {
        self.credential_token.as_deref()
    }

    pub fn identifier_policy(&self) -> IdentifierPolicy {
        self.identifier_policy
    }

    pub fn secret_policy(&self) -> SecretPolicy {
        self.secret_policy
    }

    /// Adopt a token obtained outside the capture flow (returning-user
    /// login). Does not touch the exchange count.
    pub fn adopt_credential(&mut self, token: impl Into<String>) {
        self.credential_token = Some(token.into());
        self.state = GateState::Authenticated;
        tracing::debug!("gate authenticated via login");
    }

    /// Route one submission through the gate.
    ///
    /// The returned outcome is fully resolved (including the registration
    /// round trip) before this call returns, so the caller can safely
    /// accept the next submission afterwards.
    pub async fn submit(
        &mut self,
        input: &str,
        transcript: &mut Transcript,
        auth: &dyn AuthBackend,
    ) -> GateOutcome {
        match self.state {
            GateState::Open => self.on_open_submission(input, transcript),
            GateState::AwaitingIdentifier => self.on_identifier_submission(input, transcript),
            GateState::AwaitingSecret => self.on_secret_submission(input, transcript, auth).await,
            GateState::Authenticated => {
                self.exchange_count += 1;
                GateOutcome::Forward {
                    content: input.to_string(),
                }
            }
        }
    }

    fn on_open_submission(&mut self, input: &str, transcript: &mut Transcript) -> GateOutcome {
        self.exchange_count += 1;

        if self.exchange_count < self.threshold {
            return GateOutcome::Forward {
                content: input.to_string(),
            };
        }

        tracing::debug!(
            exchange_count = self.exchange_count,
            "gate threshold reached; deferring submission"
        );
        self.deferred_message = Some(input.to_string());
        self.state = GateState::AwaitingIdentifier;
        transcript.append(Role::System, self.identifier_prompt());
        GateOutcome::Held
    }

    fn on_identifier_submission(
        &mut self,
        input: &str,
        transcript: &mut Transcript,
    ) -> GateOutcome {
        let identifier = input.trim();
        if let Err(error) = self.identifier_policy.validate(identifier) {
            return GateOutcome::Rejected {
                message: error.to_string(),
            };
        }

        self.pending_identifier = Some(identifier.to_string());
        transcript.append(Role::User, identifier);
        transcript.append(Role::System, self.secret_prompt());
        self.state = GateState::AwaitingSecret;
        GateOutcome::Held
    }

    async fn on_secret_submission(
        &mut self,
        input: &str,
        transcript: &mut Transcript,
        auth: &dyn AuthBackend,
    ) -> GateOutcome {
        if let Err(error) = self.secret_policy.validate(input) {
            return GateOutcome::Rejected {
                message: error.to_string(),
            };
        }

        let Some(identifier) = self.pending_identifier.clone() else {
            // State desync; restart the capture step instead of crashing.
            self.state = GateState::AwaitingIdentifier;
            return GateOutcome::Rejected {
                message: "account number missing; please enter it again".to_string(),
            };
        };

        match auth.register(&identifier, input).await {
            Ok(grant) => {
                self.credential_token = Some(grant.token);
                self.state = GateState::Authenticated;
                transcript.append_sensitive(Role::User, input);
                transcript.append(
                    Role::System,
                    "Your account is ready. Resuming your conversation.",
                );
                tracing::debug!("gate registration succeeded");

                match self.deferred_message.take() {
                    Some(content) => GateOutcome::Forward { content },
                    None => GateOutcome::Held,
                }
            }
            Err(error) => {
                let message = error.display_message();
                tracing::warn!(%error, "gate registration failed");
                transcript.append(
                    Role::System,
                    format!(
                        "Account setup failed: {message}. Please enter your account number again."
                    ),
                );
                self.pending_identifier = None;
                self.state = GateState::AwaitingIdentifier;
                GateOutcome::RegistrationFailed { message }
            }
        }
    }

    fn identifier_prompt(&self) -> String {
        format!(
            "You've reached the free message limit. To keep chatting, let's set up \
             your account. Please enter your {}-digit account number.",
            self.identifier_policy.digit_count()
        )
    }

    fn secret_prompt(&self) -> String {
        format!(
            "Thanks. Now choose a password (at least {} characters).",
            self.secret_policy.min_length()
        )
    }
}
