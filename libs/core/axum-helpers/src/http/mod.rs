//! HTTP middleware: CORS and security headers.

pub mod cors;
pub mod security;

pub use cors::{CORS_ENV_VAR, cors_layer_from_env, parse_allowed_origins};
pub use security::security_headers;
