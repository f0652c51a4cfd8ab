use std::fmt;

/// A signed JWT in compact serialization, along with the JSON texts it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedJwt {
    /// Encoded value
    pub(crate) value: String,
    pub(crate) header_json: String,
    pub(crate) payload_json: String,
}

impl SignedJwt {
    /// Get the encoded value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// JSON text of the header, as signed.
    pub fn header_json(&self) -> &str {
        &self.header_json
    }

    /// JSON text of the payload, as signed.
    pub fn payload_json(&self) -> &str {
        &self.payload_json
    }

    pub fn header_segment(&self) -> &str {
        self.segment(0)
    }

    pub fn payload_segment(&self) -> &str {
        self.segment(1)
    }

    pub fn signature_segment(&self) -> &str {
        self.segment(2)
    }

    // Neither base64 alphabet contains '.', so the value always has exactly three segments.
    fn segment(&self, index: usize) -> &str {
        self.value.split('.').nth(index).unwrap_or_default()
    }
}

impl fmt::Display for SignedJwt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
