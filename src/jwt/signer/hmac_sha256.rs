use crate::jwt::{
    claims::Claims, encoding::SegmentEncoding, error::JwtEncoderError, header::Header,
    signed::SignedJwt,
};
use crate::key::SecretKey;

use super::JwtSigner;

/// Signer holding a shared secret, producing HS256 tokens.
#[derive(Debug)]
pub struct HmacSha256Signer {
    key: SecretKey,
    header: Header,
    encoding: SegmentEncoding,
}

impl From<SecretKey> for HmacSha256Signer {
    fn from(key: SecretKey) -> Self {
        Self::new(key, SegmentEncoding::default())
    }
}

impl HmacSha256Signer {
    pub fn new(key: SecretKey, encoding: SegmentEncoding) -> Self {
        Self {
            key,
            header: Header::default(),
            encoding,
        }
    }

    /// Use a custom header. Its `alg` must describe HMAC-SHA256.
    pub fn with_header(self, header: Header) -> Self {
        Self { header, ..self }
    }
}

impl JwtSigner for HmacSha256Signer {
    fn sign(&self, claims: &Claims) -> Result<SignedJwt, JwtEncoderError> {
        crate::jwt::sign(&self.header, claims, &self.key, self.encoding)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jwt::signer::JwtSignerImpl;
    use crate::jwt::test::{
        HEADER_SEGMENT, PAYLOAD_SEGMENT, SIGNATURE_SEGMENT, demo_claims, demo_key,
    };
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn hmac_signer_reproduces_demo_token() {
        let signer = HmacSha256Signer::from(demo_key());

        let signed = signer.sign(&demo_claims()).unwrap();

        assert_eq!(
            signed.value(),
            format!("{HEADER_SEGMENT}.{PAYLOAD_SEGMENT}.{SIGNATURE_SEGMENT}")
        );
    }

    #[test]
    fn static_dispatch_delegates() {
        let signer = JwtSignerImpl::Hmac(HmacSha256Signer::new(
            demo_key(),
            SegmentEncoding::Standard,
        ));
        let signed = signer.sign(&demo_claims()).unwrap();
        assert_eq!(signed.signature_segment(), SIGNATURE_SEGMENT);
    }

    #[test]
    fn custom_header_is_signed() {
        let signer =
            HmacSha256Signer::from(demo_key()).with_header(Header::default().with_typ("at+jwt"));
        let signed = signer.sign(&demo_claims()).unwrap();
        assert_eq!(signed.header_json(), r#"{"alg":"HS256","typ":"at+jwt"}"#);
        assert_ne!(signed.signature_segment(), SIGNATURE_SEGMENT);
    }

    #[test]
    fn concurrent_signing_is_consistent() {
        let signer = Arc::new(HmacSha256Signer::from(demo_key()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let signer = Arc::clone(&signer);
                thread::spawn(move || signer.sign(&demo_claims()).unwrap().value().to_string())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().ends_with(SIGNATURE_SEGMENT));
        }
    }

    #[test]
    fn debug_does_not_leak_key() {
        let signer = HmacSha256Signer::from(demo_key());
        assert!(!format!("{signer:?}").contains("secretKey"));
    }
}
