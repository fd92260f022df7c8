//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "error": "Server selection timeout: No available servers"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed parameter or body",
    content_type = "application/json",
    example = json!({
        "error": "Invalid query parameter 'maxPrice': expected a number, got 'cheap'"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "error": "MongoDB is not reachable"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
