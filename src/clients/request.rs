use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;

use crate::core::content::Target;
use crate::core::error::{RequestError, RequestErrorKind};
use crate::infra::config::HttpConfig;
use crate::infra::http::headers::{generate_request_id, outbound_headers};
use crate::infra::logging::log_metric;
use crate::infra::runtime::limits::{make_http_client, read_capped};

/// Declarative description of one HTTP call.
///
/// `headers` must be populated (`Request::new` starts with an empty map);
/// `None` is rejected before any network activity. Methods other than GET,
/// HEAD and OPTIONS need a `body`, which is sent as JSON.
#[derive(Debug, Clone)]
pub struct Request<B = serde_json::Value> {
    pub method: Method,
    pub url: String,
    pub headers: Option<HeaderMap>,
    pub body: Option<B>,
    /// Retry budget for 5xx responses. A budget below 2 means no retry.
    pub retry: u32,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Some(HeaderMap::new()),
            body: None,
            retry: 0,
        }
    }
}

impl<B> Request<B> {
    pub fn with_body<C: Serialize>(self, body: C) -> Request<C> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: Some(body),
            retry: self.retry,
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }
}

impl<B: Serialize> Request<B> {
    /// Execute with a default executor (10 s deadline, 1 MiB body cap).
    pub async fn send(&self, target: Option<Target<'_>>) -> Result<ResponseSummary, RequestError> {
        let executor = Executor::new(HttpConfig::default()).map_err(|e| {
            RequestError::new(
                ResponseSummary::synthetic(500, "Request 500 Internal Server Error"),
                RequestErrorKind::Build(e),
            )
        })?;
        executor.execute(self, target).await
    }
}

/// Status and headers of the response that decided the outcome of a call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseSummary {
    /// Status line text, e.g. `"200 OK"`.
    pub status: String,
    pub status_code: u16,
    pub headers: HeaderMap,
}

impl ResponseSummary {
    pub fn synthetic(status_code: u16, status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            status_code,
            headers: HeaderMap::new(),
        }
    }

    fn from_response(resp: &reqwest::Response) -> Self {
        Self {
            status: status_text(resp.status()),
            status_code: resp.status().as_u16(),
            headers: resp.headers().clone(),
        }
    }
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

fn requires_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn fail(status_code: u16, status: &str, kind: RequestErrorKind) -> RequestError {
    RequestError::new(ResponseSummary::synthetic(status_code, status), kind)
}

/// Runs `Request`s against a shared reqwest client.
#[derive(Clone)]
pub struct Executor {
    http: Client,
    config: HttpConfig,
}

impl Executor {
    pub fn new(config: HttpConfig) -> Result<Self, reqwest::Error> {
        let http = make_http_client(&config)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Perform the request, retrying 5xx responses while the budget allows,
    /// and bind a successful body into `target`.
    ///
    /// One deadline of `config.timeout` covers every attempt. A 204 leaves
    /// the target untouched.
    pub async fn execute<B: Serialize>(
        &self,
        request: &Request<B>,
        target: Option<Target<'_>>,
    ) -> Result<ResponseSummary, RequestError> {
        let deadline = Instant::now() + self.config.timeout;

        let headers = request
            .headers
            .as_ref()
            .ok_or_else(|| fail(400, "", RequestErrorKind::MissingHeaders))?;

        let payload = if requires_body(&request.method) {
            let body = request
                .body
                .as_ref()
                .ok_or_else(|| fail(400, "", RequestErrorKind::MissingBody(request.method.clone())))?;
            let data = serde_json::to_vec(body)
                .map_err(|e| fail(500, "Request Marshal Error", RequestErrorKind::Encode(e)))?;
            Some(data)
        } else {
            None
        };

        let headers = outbound_headers(headers);
        let rid = generate_request_id();
        let start = Instant::now();
        let mut budget = request.retry;
        let mut attempt: u32 = 0;

        let mut resp = loop {
            attempt += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                log_metric("http.request", "error_total", 1.0);
                return Err(fail(
                    0,
                    "",
                    RequestErrorKind::DeadlineExceeded(self.config.timeout),
                ));
            }

            tracing::debug!(
                request_id = %rid,
                method = %request.method,
                url = %request.url,
                attempt,
                "http request"
            );
            let resp = self
                .send_once(request, &headers, payload.as_deref(), remaining)
                .await?;

            if resp.status().as_u16() >= 500 {
                let summary = ResponseSummary::from_response(&resp);
                if budget < 2 {
                    log_metric("http.request", "error_total", 1.0);
                    let text = summary.status.clone();
                    return Err(RequestError::new(summary, RequestErrorKind::Server(text)));
                }
                budget -= 1;
                tracing::warn!(
                    request_id = %rid,
                    status = summary.status_code,
                    budget,
                    "retrying after server error"
                );
                log_metric("http.request", "retry_total", 1.0);
                continue;
            }
            break resp;
        };

        let summary = ResponseSummary::from_response(&resp);
        log_metric(
            "http.request",
            "latency_ms",
            start.elapsed().as_millis() as f64,
        );

        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(summary);
        }

        let body = match read_capped(&mut resp, self.config.body_limit).await {
            Ok(body) => body,
            Err(e) => return Err(RequestError::new(summary, RequestErrorKind::Transport(e))),
        };
        if body.truncated {
            tracing::warn!(
                request_id = %rid,
                limit = self.config.body_limit,
                "response body truncated"
            );
        }

        let code = summary.status_code;
        if (400..500).contains(&code) || code < 200 {
            let text = String::from_utf8_lossy(&body.bytes).into_owned();
            return Err(RequestError::new(summary, RequestErrorKind::Client(text)));
        }

        let Some(target) = target else {
            return Err(fail(400, "", RequestErrorKind::MissingTarget));
        };

        let content_type = summary
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        target.bind(&content_type, body.bytes).map_err(|kind| {
            let status = match kind {
                RequestErrorKind::TargetMismatch { .. } => "Request Assert Error",
                _ => "Request Unmarshal Error",
            };
            fail(500, status, kind)
        })?;

        Ok(summary)
    }

    async fn send_once<B>(
        &self,
        request: &Request<B>,
        headers: &HeaderMap,
        payload: Option<&[u8]>,
        timeout: Duration,
    ) -> Result<reqwest::Response, RequestError> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.as_str())
            .headers(headers.clone())
            .timeout(timeout);
        if let Some(data) = payload {
            builder = builder.body(data.to_vec());
        }
        builder.send().await.map_err(|e| {
            log_metric("http.request", "error_total", 1.0);
            if e.is_builder() {
                fail(
                    500,
                    "Request 500 Internal Server Error",
                    RequestErrorKind::Build(e),
                )
            } else {
                RequestError::new(ResponseSummary::default(), RequestErrorKind::Transport(e))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use reqwest::Method;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Coffee {
        #[serde(rename = "Size")]
        size: String,
        #[serde(rename = "Type")]
        kind: String,
    }

    fn executor() -> Executor {
        Executor::new(HttpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn missing_headers_fail_before_network() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.any_request();
            then.status(200);
        });
        let mut req = Request::new(Method::GET, server.url("/"));
        req.headers = None;
        let mut got = Coffee::default();
        let err = executor()
            .execute(&req, Some(Target::json(&mut got)))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(matches!(err.kind(), RequestErrorKind::MissingHeaders));
        m.assert_hits(0);
    }

    #[tokio::test]
    async fn body_carrying_method_without_body_fails() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.any_request();
            then.status(200);
        });
        let req = Request::new(Method::POST, server.url("/orders"));
        let err = executor().execute(&req, None).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(matches!(err.kind(), RequestErrorKind::MissingBody(method) if *method == Method::POST));
        m.assert_hits(0);
    }

    #[tokio::test]
    async fn unserializable_body_is_a_500_marshal_error() {
        use std::collections::BTreeMap;
        let mut body = BTreeMap::new();
        body.insert(vec![1u8], "non-string key");
        let req = Request::new(Method::PUT, "http://127.0.0.1:9/").with_body(body);
        let err = executor().execute(&req, None).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.summary().status, "Request Marshal Error");
        assert!(matches!(err.kind(), RequestErrorKind::Encode(_)));
    }

    #[tokio::test]
    async fn posts_json_body_with_default_headers() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/orders")
                .header("content-type", "application/json")
                .json_body(json!({"Size": "Small", "Type": "Latte"}));
            then.status(201).json_body(json!({"Size": "Small", "Type": "Latte"}));
        });
        let order = Coffee {
            size: "Small".into(),
            kind: "Latte".into(),
        };
        let req = Request::new(Method::POST, server.url("/orders")).with_body(order.clone());
        let mut got = Coffee::default();
        let resp = executor()
            .execute(&req, Some(Target::json(&mut got)))
            .await
            .unwrap();
        m.assert();
        assert_eq!(resp.status_code, 201);
        assert_eq!(resp.status, "201 Created");
        assert_eq!(got, order);
    }

    #[tokio::test]
    async fn no_content_leaves_target_untouched() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/orders/1");
            then.status(204);
        });
        let req = Request::new(Method::DELETE, server.url("/orders/1")).with_body(json!({}));
        let mut got = Coffee {
            size: "keep".into(),
            kind: "me".into(),
        };
        let resp = executor()
            .execute(&req, Some(Target::json(&mut got)))
            .await
            .unwrap();
        assert_eq!(resp.status_code, 204);
        assert_eq!(got.size, "keep");
    }

    #[tokio::test]
    async fn success_without_target_is_a_400() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).json_body(json!({}));
        });
        let req = Request::new(Method::GET, server.url("/"));
        let err = executor().execute(&req, None).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(matches!(err.kind(), RequestErrorKind::MissingTarget));
    }

    #[tokio::test]
    async fn invalid_url_is_a_build_error() {
        let req = Request::new(Method::GET, "not a url");
        let err = executor().execute(&req, None).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(matches!(err.kind(), RequestErrorKind::Build(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let req = Request::new(Method::GET, "http://127.0.0.1:9/");
        let err = executor().execute(&req, None).await.unwrap_err();
        assert_eq!(err.status_code(), 0);
        assert!(matches!(err.kind(), RequestErrorKind::Transport(_)));
    }

    #[test]
    fn status_text_uses_canonical_reason() {
        assert_eq!(status_text(StatusCode::OK), "200 OK");
        assert_eq!(
            status_text(StatusCode::INTERNAL_SERVER_ERROR),
            "500 Internal Server Error"
        );
        assert_eq!(status_text(StatusCode::from_u16(599).unwrap()), "599");
    }

    #[test]
    fn only_get_head_options_skip_the_body() {
        assert!(!requires_body(&Method::GET));
        assert!(!requires_body(&Method::HEAD));
        assert!(!requires_body(&Method::OPTIONS));
        assert!(requires_body(&Method::POST));
        assert!(requires_body(&Method::PATCH));
        assert!(requires_body(&Method::DELETE));
    }
}
