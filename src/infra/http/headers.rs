use reqwest::header::{HeaderMap, HeaderValue, CONNECTION, CONTENT_TYPE};

use crate::domain::random::random_string;

/// Generate a simple request id suitable for logging/correlation.
pub fn generate_request_id() -> String {
    format!("rq-{}", random_string(12))
}

/// Copy the caller's headers and add the JSON defaults when no content type
/// was given. The caller's map is left untouched.
pub fn outbound_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    if !out.contains_key(CONTENT_TYPE) {
        out.append(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        out.append(CONNECTION, HeaderValue::from_static("close"));
    }
    out
}
