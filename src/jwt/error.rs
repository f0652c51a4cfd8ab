use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtEncoderError {
    /// Header or payload could not be represented as JSON text.
    #[error("unable to serialize token contents: `{0}`")]
    Serialization(#[from] serde_json::Error),
}
