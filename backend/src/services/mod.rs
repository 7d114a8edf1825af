pub mod catalog;
pub mod colleges;
pub mod scholarships;

use actix_web::HttpRequest;

use crate::error::ApiError;

/// Pulls the authenticated user id out of the `X-User-Id` header. The auth
/// proxy in front of this service resolves credentials and injects the
/// header; by the time a request lands here, identity is just a number.
pub fn user_id(req: &HttpRequest) -> Result<i64, ApiError> {
    req.headers()
        .get("X-User-Id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i64>().ok())
        .ok_or(ApiError::Unauthorized)
}
