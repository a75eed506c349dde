//! Response targets: where a decoded response body ends up.

use serde::de::DeserializeOwned;

use crate::core::error::RequestErrorKind;

/// Anything a JSON response body can be decoded into.
pub trait JsonSink {
    fn fill_from_slice(&mut self, bytes: &[u8]) -> serde_json::Result<()>;
}

impl<T: DeserializeOwned> JsonSink for T {
    fn fill_from_slice(&mut self, bytes: &[u8]) -> serde_json::Result<()> {
        *self = serde_json::from_slice(bytes)?;
        Ok(())
    }
}

/// Caller-owned destination for a successful response body.
///
/// The response content type only picks the decode path. Image responses
/// bind to `Bytes`, everything else is decoded as JSON into `Json`; any other
/// pairing is a `TargetMismatch`.
pub enum Target<'a> {
    Json(&'a mut (dyn JsonSink + Send)),
    Bytes(&'a mut Vec<u8>),
}

impl<'a> Target<'a> {
    pub fn json<T: DeserializeOwned + Send + 'a>(value: &'a mut T) -> Self {
        Target::Json(value)
    }

    pub fn bytes(buf: &'a mut Vec<u8>) -> Self {
        Target::Bytes(buf)
    }

    pub fn shape(&self) -> &'static str {
        match self {
            Target::Json(_) => "json",
            Target::Bytes(_) => "bytes",
        }
    }

    pub(crate) fn bind(self, content_type: &str, body: Vec<u8>) -> Result<(), RequestErrorKind> {
        let binary = content_type.contains("image");
        match (self, binary) {
            (Target::Bytes(buf), true) => {
                *buf = body;
                Ok(())
            }
            (Target::Json(sink), false) => {
                sink.fill_from_slice(&body).map_err(RequestErrorKind::Decode)
            }
            (target, _) => Err(RequestErrorKind::TargetMismatch {
                content_type: content_type.to_string(),
                declared: target.shape(),
            }),
        }
    }
}

impl std::fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Target::{}", self.shape())
    }
}
