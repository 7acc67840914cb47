use std::path::{Path, PathBuf};

pub const CREDENTIAL_DIR: [&str; 2] = [".palaver", "credentials"];

#[must_use]
pub fn credential_root(home: &Path) -> PathBuf {
    home.join(CREDENTIAL_DIR[0]).join(CREDENTIAL_DIR[1])
}

#[must_use]
pub fn credential_file_name() -> &'static str {
    "credentials.json"
}
