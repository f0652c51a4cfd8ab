use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

/// Base64 alphabet used for the header and payload segments.
///
/// The signature segment is always URL-safe without padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SegmentEncoding {
    /// Standard alphabet with `=` padding (RFC 4648 §4). Not RFC 7519 compliant, but it is how
    /// tokens issued by this crate have always been shaped.
    #[default]
    Standard,
    /// URL-safe alphabet without padding (RFC 4648 §5), as RFC 7519 requires.
    UrlSafeNoPad,
}

impl SegmentEncoding {
    pub fn encode<T: AsRef<[u8]>>(&self, input: T) -> String {
        match self {
            Self::Standard => STANDARD.encode(input),
            Self::UrlSafeNoPad => URL_SAFE_NO_PAD.encode(input),
        }
    }
}

impl fmt::Display for SegmentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::UrlSafeNoPad => write!(f, "url-safe"),
        }
    }
}
