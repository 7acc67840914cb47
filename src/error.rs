use assistant_api::AssistantApiError;
use auth_api::AuthApiError;
use credential_store::CredentialStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// A submission arrived while an exchange stream was still open.
    #[error("an exchange is already in progress")]
    Busy,

    /// Input failed a local credential-format policy.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] AssistantApiError),

    #[error(transparent)]
    Auth(#[from] AuthApiError),

    #[error(transparent)]
    Store(#[from] CredentialStoreError),

    /// The backend reported the run as failed, or the stream ended without
    /// a terminal event.
    #[error("exchange failed: {0}")]
    ExchangeFailed(String),
}
