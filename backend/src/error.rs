use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

/// Everything a tracker or catalog operation can fail with. Handlers return
/// this directly; the `ResponseError` impl is the single place where errors
/// become HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The row does not exist, or it exists but belongs to another user.
    /// The two cases are deliberately indistinguishable.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A save for a (user, target) pair that already has a record.
    #[error("{0} is already tracked")]
    Duplicate(&'static str),

    /// Missing or unparsable X-User-Id header.
    #[error("Missing or invalid user identity")]
    Unauthorized,

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Duplicate(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Db(e) = self {
            error!("Database error: {}", e);
        }
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

/// Remaps a UNIQUE-constraint violation on insert to `Duplicate`. The
/// pre-insert existence check is advisory; under concurrent saves the
/// constraint is what actually decides.
pub fn duplicate_on_conflict(err: rusqlite::Error, what: &'static str) -> ApiError {
    match err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            ApiError::Duplicate(what)
        }
        other => ApiError::Db(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_the_taxonomy() {
        assert_eq!(ApiError::NotFound("institution").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Duplicate("institution").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }
}
