use std::fmt;

use serde::{Deserialize, Serialize};

/// Default media type of the token.
pub const JWT_TYPE: &str = "JWT";

/// Signing algorithms supported by the crate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Algorithm {
    /// HMAC using SHA-256.
    #[default]
    HS256,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::HS256 => write!(f, "HS256"),
        }
    }
}

/// JOSE header of the token. Fields are serialized in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Header {
    /// Algorithm used to compute the signature.
    pub(crate) alg: Algorithm,
    /// Media type. Uppercase `JWT` is recommended.
    pub(crate) typ: String,
}

impl Default for Header {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

impl Header {
    pub fn new(alg: Algorithm) -> Self {
        Self {
            alg,
            typ: JWT_TYPE.to_string(),
        }
    }

    /// Replace the media type.
    pub fn with_typ(self, typ: impl Into<String>) -> Self {
        Self {
            typ: typ.into(),
            ..self
        }
    }

    pub fn alg(&self) -> Algorithm {
        self.alg
    }

    pub fn typ(&self) -> &str {
        &self.typ
    }
}
