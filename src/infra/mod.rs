pub mod config;
pub mod logging;
pub mod http {
    pub mod auth;
    pub mod headers;
    pub mod json;
}
pub mod runtime {
    pub mod limits;
}
