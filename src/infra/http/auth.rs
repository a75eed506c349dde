use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::core::error::TokenError;

/// Extract the bearer token from an `Authorization: Bearer <token>` header.
///
/// The token is returned verbatim; it is not decoded or validated.
pub fn extract_token(headers: &HeaderMap) -> Result<String, TokenError> {
    let authorization = match headers.get(AUTHORIZATION) {
        Some(v) if !v.is_empty() => v.to_str().map_err(|_| TokenError::InvalidAuthentication)?,
        _ => return Err(TokenError::BadRequest),
    };
    match authorization.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(TokenError::InvalidAuthentication),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_auth(value: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_static(value));
        h
    }

    #[test]
    fn extracts_bearer_token() {
        let got = extract_token(&with_auth("Bearer Hello_gatecloud")).unwrap();
        assert_eq!(got, "Hello_gatecloud");
    }

    #[test]
    fn keeps_everything_after_the_first_space() {
        let got = extract_token(&with_auth("Bearer a b  c")).unwrap();
        assert_eq!(got, "a b  c");
    }

    #[test]
    fn missing_or_empty_header_is_bad_request() {
        assert_eq!(extract_token(&HeaderMap::new()), Err(TokenError::BadRequest));
        assert_eq!(extract_token(&with_auth("")), Err(TokenError::BadRequest));
    }

    #[test]
    fn malformed_header_is_invalid_authentication() {
        for value in ["Bearer", "Bearer ", "bearer abc", "Basic abc", "Token"] {
            assert_eq!(
                extract_token(&with_auth(value)),
                Err(TokenError::InvalidAuthentication),
                "{value:?}"
            );
        }
    }

    #[test]
    fn non_utf8_header_is_invalid_authentication() {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xff").unwrap());
        assert_eq!(extract_token(&h), Err(TokenError::InvalidAuthentication));
    }
}
