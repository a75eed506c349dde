//! Core types: response targets and error model shared by the clients.

pub mod content;
pub mod error;
