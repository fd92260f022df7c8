//! Custom extractors for Axum handlers.
//!
//! Both extractors turn rejections into [`crate::AppError`] so clients always
//! receive an `{error}` JSON body.

pub mod json_body;
pub mod query_params;

pub use json_body::JsonBody;
pub use query_params::QueryParams;
