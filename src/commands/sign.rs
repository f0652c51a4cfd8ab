use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::jwt::claims::Claims;
use crate::jwt::error::JwtEncoderError;
use crate::jwt::signed::SignedJwt;
use crate::jwt::signer::JwtSigner;
use crate::parameters::OutputFormat;

#[derive(Error, Debug)]
pub enum SignCommandError {
    #[error("signing JWT: `{0}`")]
    Signing(#[from] JwtEncoderError),
    #[error("rendering output: `{0}`")]
    Output(#[source] serde_json::Error),
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    header: Value,
    payload: Value,
    signature: &'a str,
    token: &'a str,
}

pub struct SignCommand<S>
where
    S: JwtSigner,
{
    signer: S,
}

impl<S> SignCommand<S>
where
    S: JwtSigner,
{
    pub fn new(signer: S) -> Self {
        Self { signer }
    }

    pub fn sign(&self, claims: &Claims) -> Result<SignedJwt, SignCommandError> {
        let signed = self.signer.sign(claims)?;
        info!(sub = claims.sub(), "token signed");
        Ok(signed)
    }

    /// Signs the claims and renders the result in the requested format.
    pub fn run(&self, claims: &Claims, format: OutputFormat) -> Result<String, SignCommandError> {
        let signed = self.sign(claims)?;
        render(&signed, format)
    }
}

pub fn render(signed: &SignedJwt, format: OutputFormat) -> Result<String, SignCommandError> {
    match format {
        OutputFormat::Plain => Ok(signed.value().to_string()),
        OutputFormat::Json => {
            let output = JsonOutput {
                header: serde_json::from_str(signed.header_json())
                    .map_err(SignCommandError::Output)?,
                payload: serde_json::from_str(signed.payload_json())
                    .map_err(SignCommandError::Output)?,
                signature: signed.signature_segment(),
                token: signed.value(),
            };
            serde_json::to_string_pretty(&output).map_err(SignCommandError::Output)
        }
        OutputFormat::Verbose => Ok([
            ("Header JSON", signed.header_json()),
            ("Payload JSON", signed.payload_json()),
            ("Signature", signed.signature_segment()),
            ("JWT", signed.value()),
        ]
        .iter()
        .map(|(name, value)| format!("{name}\n{value}\n"))
        .collect::<Vec<_>>()
        .join("\n")),
    }
}
