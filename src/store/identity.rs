use super::IdentityProvider;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::PathBuf;

/// Anonymous identity persisted in a small file.
///
/// The first sign-in generates `anon-<16 hex>`; every later sign-in on the
/// same machine returns the same value.
pub struct FileIdentity {
    path: PathBuf,
}

impl FileIdentity {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn generate() -> String {
        format!("anon-{:016x}", rand::random::<u64>())
    }
}

impl IdentityProvider for FileIdentity {
    fn sign_in_anonymously(&mut self) -> AppResult<String> {
        if let Ok(existing) = fs::read_to_string(&self.path) {
            let uid = existing.trim();
            if !uid.is_empty() {
                return Ok(uid.to_string());
            }
        }

        let uid = Self::generate();
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| AppError::AuthFailure(e.to_string()))?;
        }
        fs::write(&self.path, &uid).map_err(|e| AppError::AuthFailure(e.to_string()))?;
        Ok(uid)
    }
}
