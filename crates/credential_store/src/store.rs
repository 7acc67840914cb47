use std::fs;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::CredentialStoreError;
use crate::schema::{CredentialFile, StoredCredential, CREDENTIAL_FILE_VERSION};

/// In-memory handle over the credential document at `path`.
///
/// Every mutation rewrites the whole file through a sibling temp file and
/// rename, so a crash mid-write never leaves a half-written document.
pub struct CredentialStore {
    path: PathBuf,
    document: CredentialFile,
}

impl CredentialStore {
    /// Open the store at `path`, starting empty when the file is absent.
    pub fn open(path: &Path) -> Result<Self, CredentialStoreError> {
        let path = path.to_path_buf();

        let document = match fs::read_to_string(&path) {
            Ok(raw) => {
                let parsed: CredentialFile = serde_json::from_str(&raw).map_err(|source| {
                    CredentialStoreError::Parse {
                        path: path.clone(),
                        source,
                    }
                })?;
                if parsed.version != CREDENTIAL_FILE_VERSION {
                    return Err(CredentialStoreError::UnsupportedVersion {
                        path,
                        found: parsed.version,
                        expected: CREDENTIAL_FILE_VERSION,
                    });
                }
                parsed
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                CredentialFile::empty()
            }
            Err(source) => {
                return Err(CredentialStoreError::io("reading credential file", path, source))
            }
        };

        Ok(Self { path, document })
    }

    /// Mint a fresh opaque session key.
    #[must_use]
    pub fn new_session_key() -> String {
        Uuid::new_v4().to_string()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up the persisted credential for a session key.
    #[must_use]
    pub fn load(&self, session_key: &str) -> Option<&StoredCredential> {
        self.document.sessions.get(session_key)
    }

    /// Insert or replace the credential for a session key and persist.
    pub fn save(
        &mut self,
        session_key: &str,
        token: impl Into<String>,
    ) -> Result<(), CredentialStoreError> {
        let saved_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(CredentialStoreError::ClockFormat)?;

        self.document.sessions.insert(
            session_key.to_string(),
            StoredCredential {
                token: token.into(),
                saved_at,
            },
        );
        self.persist()
    }

    /// Remove the credential for a session key and persist. Removing an
    /// absent key is a no-op.
    pub fn clear(&mut self, session_key: &str) -> Result<(), CredentialStoreError> {
        if self.document.sessions.remove(session_key).is_none() {
            return Ok(());
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), CredentialStoreError> {
        let serialized = serde_json::to_string_pretty(&self.document).map_err(|source| {
            CredentialStoreError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| {
                    CredentialStoreError::io("creating credential directory", parent, source)
                })?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serialized).map_err(|source| {
            CredentialStoreError::io("writing credential temp file", &temp_path, source)
        })?;
        fs::rename(&temp_path, &self.path).map_err(|source| {
            CredentialStoreError::io("replacing credential file", &self.path, source)
        })
    }
}
