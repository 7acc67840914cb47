//! File-backed persistence for the opaque credential token, keyed by
//! session. The document is a single versioned JSON file rewritten
//! atomically on every change; a malformed or version-mismatched file is an
//! explicit error rather than silent data loss.

mod error;
mod paths;
mod schema;
mod store;

pub use error::CredentialStoreError;
pub use paths::{credential_file_name, credential_root};
pub use schema::{CredentialFile, StoredCredential, CREDENTIAL_FILE_VERSION};
pub use store::CredentialStore;
