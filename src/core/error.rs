use std::time::Duration;

use thiserror::Error;

use crate::clients::request::ResponseSummary;

/// Failure of a single `Executor::execute` call.
///
/// Every failure carries the response summary seen at the point of failure,
/// so callers can still inspect status information. Summaries for failures
/// that never reached the network are synthesized (400 for caller misuse,
/// 500 for encode/decode problems).
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct RequestError {
    summary: ResponseSummary,
    kind: RequestErrorKind,
}

impl RequestError {
    pub fn new(summary: ResponseSummary, kind: RequestErrorKind) -> Self {
        Self { summary, kind }
    }

    pub fn summary(&self) -> &ResponseSummary {
        &self.summary
    }

    pub fn kind(&self) -> &RequestErrorKind {
        &self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.summary.status_code
    }

    pub fn into_parts(self) -> (ResponseSummary, RequestErrorKind) {
        (self.summary, self.kind)
    }

    /// True for failures caused by the caller's descriptor or target rather
    /// than by the network or the remote server.
    pub fn is_caller_misuse(&self) -> bool {
        matches!(
            self.kind,
            RequestErrorKind::MissingHeaders
                | RequestErrorKind::MissingBody(_)
                | RequestErrorKind::MissingTarget
                | RequestErrorKind::TargetMismatch { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum RequestErrorKind {
    #[error("request headers are not initialized")]
    MissingHeaders,

    #[error("request body can't be empty for {0}")]
    MissingBody(reqwest::Method),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid request: {0}")]
    Build(#[source] reqwest::Error),

    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("request deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// 5xx after the retry budget ran out; holds the status text.
    #[error("{0}")]
    Server(String),

    /// 4xx or sub-200 response; holds the raw response body.
    #[error("{0}")]
    Client(String),

    #[error("response target can't be empty")]
    MissingTarget,

    #[error("response with content type {content_type:?} can't be bound to a {declared} target")]
    TargetMismatch {
        content_type: String,
        declared: &'static str,
    },

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Bearer token extraction failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("bad request")]
    BadRequest,
    #[error("invalid authentication")]
    InvalidAuthentication,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_displays_the_kind_message() {
        let e = RequestError::new(
            ResponseSummary::synthetic(400, ""),
            RequestErrorKind::MissingHeaders,
        );
        assert_eq!(e.to_string(), "request headers are not initialized");
        assert_eq!(e.status_code(), 400);
        assert!(e.is_caller_misuse());
    }

    #[test]
    fn client_errors_display_the_raw_body() {
        let e = RequestError::new(
            ResponseSummary::synthetic(404, "404 Not Found"),
            RequestErrorKind::Client("no such coffee".into()),
        );
        assert_eq!(e.to_string(), "no such coffee");
        assert!(!e.is_caller_misuse());
        let (summary, kind) = e.into_parts();
        assert_eq!(summary.status, "404 Not Found");
        assert!(matches!(kind, RequestErrorKind::Client(_)));
    }

    #[test]
    fn token_errors_display_lowercase_messages() {
        assert_eq!(TokenError::BadRequest.to_string(), "bad request");
        assert_eq!(
            TokenError::InvalidAuthentication.to_string(),
            "invalid authentication"
        );
    }
}
