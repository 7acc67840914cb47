//! Transport client for the registration/login endpoints, plus the local
//! credential-format policies enforced before any request is made.
//!
//! Server-side hashing and storage are collaborator concerns; this crate
//! only ever sees the opaque token a successful call returns. The documented
//! deployment hashes secrets with a salted one-way hash at cost factor 10.

pub mod client;
pub mod error;
pub mod policy;

pub use client::{login_url, register_url, AuthApiClient, AuthApiConfig, CredentialGrant};
pub use error::AuthApiError;
pub use policy::{IdentifierPolicy, PolicyError, SecretPolicy};
pub use reqwest::StatusCode;
