//! Small stateless helpers: a JSON/binary HTTP request executor with bounded
//! retry on 5xx, bearer-token extraction, URL slugs, random strings and
//! great-circle distance.

pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;

pub use crate::clients::request::{Executor, Request, ResponseSummary};
pub use crate::core::content::{JsonSink, Target};
pub use crate::core::error::{RequestError, RequestErrorKind, TokenError};
pub use crate::domain::{distance, random_string, slugify, Coordinate};
pub use crate::infra::config::{Config, HttpConfig, Mode};
pub use crate::infra::http::auth::extract_token;
pub use crate::infra::http::json::error_response;
