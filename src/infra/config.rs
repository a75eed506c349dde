use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::infra::runtime::limits::{BODY_LIMIT, DEFAULT_TIMEOUT};

/// Verbosity of error responses handed back to HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Debug,
    Release,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Mode::Debug),
            "release" => Ok(Mode::Release),
            other => Err(format!("invalid mode: {other}")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Debug => f.write_str("debug"),
            Mode::Release => f.write_str("release"),
        }
    }
}

/// Knobs for the request executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Overall deadline for one `execute` call, retries included.
    pub timeout: Duration,
    /// Hard cap on bytes read from a response body.
    pub body_limit: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            body_limit: BODY_LIMIT,
        }
    }
}

pub struct Config {
    pub mode: Mode,
    pub http: HttpConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let mode = std::env::var("APP_MODE")
            .ok()
            .and_then(|s| s.parse::<Mode>().ok())
            .unwrap_or_default();
        let timeout = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        let body_limit = std::env::var("HTTP_BODY_LIMIT")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(BODY_LIMIT);

        Self {
            mode,
            http: HttpConfig {
                timeout,
                body_limit,
            },
        }
    }
}
