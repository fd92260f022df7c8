//! JSON body extractor that reports failures as [`AppError`] responses.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Drop-in replacement for `axum::Json` whose rejection is an `{error}` body.
///
/// # Example
/// ```ignore
/// use axum_helpers::JsonBody;
///
/// async fn create(JsonBody(payload): JsonBody<CreateProduct>) -> impl IntoResponse {
///     // ...
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}
