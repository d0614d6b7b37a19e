//! Bodies accepted when pushing fake responses.

use bytes::Bytes;

/// A fake response body.
///
/// Structured bodies are encoded to JSON text before the response is built;
/// raw bodies are used byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Literal body bytes.
    Raw(Bytes),
    /// A structured value, encoded with `serde_json`.
    Json(serde_json::Value),
}

impl Body {
    /// Encode the body into the bytes a response carries.
    pub fn into_bytes(self) -> Result<Bytes, serde_json::Error> {
        match self {
            Body::Raw(bytes) => Ok(bytes),
            Body::Json(value) => serde_json::to_vec(&value).map(Bytes::from),
        }
    }

    /// Build a JSON body from any serializable value.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Body::Json)
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::Raw(Bytes::new())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Raw(Bytes::copy_from_slice(text.as_bytes()))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Raw(Bytes::from(text))
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Raw(Bytes::from(bytes))
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Raw(bytes)
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}
