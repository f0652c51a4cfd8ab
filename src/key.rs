use std::{
    env::{self, VarError},
    fmt, io,
    path::Path,
};

use thiserror::Error;
use tracing::warn;

/// Errors that can occur when loading a SecretKey.
#[derive(Debug, Error)]
pub enum SecretKeyError {
    #[error("secret key must not be empty")]
    Empty,
    #[error("environment variable `{0}` is not set")]
    MissingEnv(String),
    #[error("environment variable `{0}` is not valid unicode")]
    NotUnicodeEnv(String),
    #[error("filesystem i/o error: `{0}`")]
    IO(#[from] io::Error),
}

/// Shared secret used to compute HMAC signatures. Opaque bytes, never empty.
#[derive(Clone, PartialEq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Shorter keys are accepted but weaken HMAC-SHA256 below its digest size.
    pub const RECOMMENDED_MIN_LEN: usize = 32;

    /// Load the key from the value of an environment variable.
    pub fn from_env(var: &str) -> Result<Self, SecretKeyError> {
        match env::var(var) {
            Ok(value) => Self::try_from(value),
            Err(VarError::NotPresent) => Err(SecretKeyError::MissingEnv(var.to_string())),
            Err(VarError::NotUnicode(_)) => Err(SecretKeyError::NotUnicodeEnv(var.to_string())),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for SecretKey {
    type Error = SecretKeyError;

    fn try_from(key: Vec<u8>) -> Result<Self, Self::Error> {
        // An empty HMAC key is silently zero-padded, it would sign with a publicly known key.
        if key.is_empty() {
            return Err(SecretKeyError::Empty);
        }
        if key.len() < Self::RECOMMENDED_MIN_LEN {
            warn!(
                "secret key is {} bytes long, at least {} are recommended",
                key.len(),
                Self::RECOMMENDED_MIN_LEN
            );
        }
        Ok(Self(key))
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = SecretKeyError;

    fn try_from(key: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from(key.to_vec())
    }
}

impl TryFrom<&str> for SecretKey {
    type Error = SecretKeyError;

    fn try_from(key: &str) -> Result<Self, Self::Error> {
        Self::try_from(key.as_bytes())
    }
}

impl TryFrom<String> for SecretKey {
    type Error = SecretKeyError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        Self::try_from(key.into_bytes())
    }
}

// Attempt to load the key from a file. A single trailing line break is not part of the key.
impl TryFrom<&Path> for SecretKey {
    type Error = SecretKeyError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let mut key = std::fs::read(path)?;
        if key.ends_with(b"\n") {
            key.pop();
            if key.ends_with(b"\r") {
                key.pop();
            }
        }
        Self::try_from(key)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey: redacted")
    }
}
