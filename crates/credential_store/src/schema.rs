use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const CREDENTIAL_FILE_VERSION: u32 = 1;

/// One persisted credential entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredCredential {
    pub token: String,
    pub saved_at: String,
}

/// On-disk document: a versioned map of session key to credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialFile {
    pub version: u32,
    pub sessions: BTreeMap<String, StoredCredential>,
}

impl CredentialFile {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: CREDENTIAL_FILE_VERSION,
            sessions: BTreeMap::new(),
        }
    }
}

impl Default for CredentialFile {
    fn default() -> Self {
        Self::empty()
    }
}
