use super::{claims::Claims, error::JwtEncoderError, signed::SignedJwt};
use hmac_sha256::HmacSha256Signer;

pub mod hmac_sha256;

/// A JWT signer.
#[cfg_attr(test, mockall::automock)]
pub trait JwtSigner {
    fn sign(&self, claims: &Claims) -> Result<SignedJwt, JwtEncoderError>;
}

/// Enumerates all implementations for `JwtSigner` for static dispatching reasons.
pub enum JwtSignerImpl {
    Hmac(HmacSha256Signer),
}

impl JwtSigner for JwtSignerImpl {
    fn sign(&self, claims: &Claims) -> Result<SignedJwt, JwtEncoderError> {
        match self {
            Self::Hmac(hmac_signer) => hmac_signer.sign(claims),
        }
    }
}
