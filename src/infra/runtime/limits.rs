use std::time::Duration;

use crate::infra::config::HttpConfig;

/// Maximum number of response body bytes read per call.
pub const BODY_LIMIT: usize = 1024 * 1024;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build a reqwest client for the executor. Per-call deadlines are applied on
/// each request, so only the connect phase is bounded here.
pub fn make_http_client(cfg: &HttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(cfg.timeout)
        .build()
}

/// A response body read up to a byte cap.
#[derive(Debug)]
pub struct CappedBody {
    pub bytes: Vec<u8>,
    pub truncated: bool,
}

/// Read at most `limit` bytes of the body; anything beyond is dropped.
pub async fn read_capped(
    resp: &mut reqwest::Response,
    limit: usize,
) -> Result<CappedBody, reqwest::Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        let room = limit.saturating_sub(bytes.len());
        if chunk.len() > room {
            bytes.extend_from_slice(&chunk[..room]);
            return Ok(CappedBody {
                bytes,
                truncated: true,
            });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(CappedBody {
        bytes,
        truncated: false,
    })
}
