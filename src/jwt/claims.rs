use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Claim names with a dedicated field in [Claims].
pub const REGISTERED_CLAIMS: [&str; 7] = ["sub", "iat", "iss", "aud", "exp", "nbf", "jti"];

#[derive(Error, Debug, PartialEq)]
#[error("`{0}` is a registered claim and cannot be set as a private claim")]
pub struct ReservedClaimError(pub String);

/// JWT Claims. Declared fields are serialized first, in order, followed by private claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (whom token refers to). A string or a resource URI.
    pub(crate) sub: String,
    /// Issued at (as UTC timestamp).
    pub(crate) iat: i64,
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) iss: Option<String>,
    /// Audience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) aud: Option<String>,
    /// Expiration time (as UTC timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) exp: Option<i64>,
    /// Not before (as UTC timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) nbf: Option<i64>,
    /// JWT ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) jti: Option<String>,
    /// Application specific claims.
    #[serde(flatten)]
    pub(crate) private: Map<String, Value>,
}

impl Claims {
    /// Create a new Claims instance with only the subject and issued-at time.
    pub fn new(sub: impl Into<String>, iat: i64) -> Self {
        Self {
            sub: sub.into(),
            iat,
            iss: None,
            aud: None,
            exp: None,
            nbf: None,
            jti: None,
            private: Map::new(),
        }
    }

    pub fn with_issuer(self, iss: impl Into<String>) -> Self {
        Self {
            iss: Some(iss.into()),
            ..self
        }
    }

    pub fn with_audience(self, aud: impl Into<String>) -> Self {
        Self {
            aud: Some(aud.into()),
            ..self
        }
    }

    pub fn with_expiration(self, exp: i64) -> Self {
        Self {
            exp: Some(exp),
            ..self
        }
    }

    pub fn with_not_before(self, nbf: i64) -> Self {
        Self {
            nbf: Some(nbf),
            ..self
        }
    }

    pub fn with_jwt_id(self, jti: impl Into<String>) -> Self {
        Self {
            jti: Some(jti.into()),
            ..self
        }
    }

    /// Sets a fresh UUIDv7 as the JWT ID.
    pub fn with_generated_jwt_id(self) -> Self {
        self.with_jwt_id(Uuid::now_v7().to_string())
    }

    /// Adds an application specific claim. Registered claim names are rejected so the
    /// serialized payload never holds duplicated keys.
    pub fn with_private_claim(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ReservedClaimError> {
        let name = name.into();
        if REGISTERED_CLAIMS.contains(&name.as_str()) {
            return Err(ReservedClaimError(name));
        }
        self.private.insert(name, value.into());
        Ok(self)
    }

    pub fn sub(&self) -> &str {
        &self.sub
    }

    pub fn iat(&self) -> i64 {
        self.iat
    }

    pub fn jti(&self) -> Option<&str> {
        self.jti.as_deref()
    }

    pub fn private_claim(&self, name: &str) -> Option<&Value> {
        self.private.get(name)
    }
}
