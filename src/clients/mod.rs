//! Outbound HTTP: request descriptors and the executor that runs them.

pub mod request;
