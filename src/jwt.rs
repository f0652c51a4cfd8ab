//! Construction of JWTs in compact serialization, signed with HMAC-SHA256.
//!
//! A token is `header.payload.signature` where the first two segments are the base64 encoded
//! JSON texts (see [SegmentEncoding]) and the last one is the URL-safe, unpadded base64 encoding
//! of `HMAC-SHA256(key, "header.payload")`.
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use tracing::debug;

use crate::key::SecretKey;
use encoding::SegmentEncoding;
use error::JwtEncoderError;
use signed::SignedJwt;

pub mod claims;
pub mod encoding;
pub mod error;
pub mod header;
pub mod signed;
pub mod signer;

type HmacSha256 = Hmac<Sha256>;

/// Builds a signed compact token out of any serializable header and payload.
///
/// Either the whole token is returned or an error, never a partial token.
pub fn sign<H, P>(
    header: &H,
    payload: &P,
    key: &SecretKey,
    encoding: SegmentEncoding,
) -> Result<SignedJwt, JwtEncoderError>
where
    H: Serialize + ?Sized,
    P: Serialize + ?Sized,
{
    let header_json = serde_json::to_string(header)?;
    let payload_json = serde_json::to_string(payload)?;

    let header_segment = encoding.encode(&header_json);
    let payload_segment = encoding.encode(&payload_json);
    let signing_input = format!("{header_segment}.{payload_segment}");
    let signature_segment = signature(key, signing_input.as_bytes());

    debug!(
        header_len = header_segment.len(),
        payload_len = payload_segment.len(),
        "jwt signed"
    );

    Ok(SignedJwt {
        value: format!("{signing_input}.{signature_segment}"),
        header_json,
        payload_json,
    })
}

/// URL-safe unpadded base64 of the HMAC-SHA256 digest of `message`.
fn signature(key: &SecretKey, message: &[u8]) -> String {
    // HMAC accepts keys of any length, so this never fails.
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key.as_bytes())
        .unwrap_or_else(|_| unreachable!("hmac takes keys of any size"));
    mac.update(message);
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}
