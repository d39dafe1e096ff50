//! Errors surfaced by the HTTP layer.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// One or more submitted fields were missing or invalid.
    #[error("validation failed")]
    Validation(Vec<String>),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            log::error!("Request failed: {detail}");
        }
        let details = match self {
            ApiError::Validation(errors) => errors.clone(),
            _ => Vec::new(),
        };
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
            "details": details,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("appointment").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("taken".into()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn not_found_display_names_the_resource() {
        assert_eq!(
            ApiError::NotFound("appointment").to_string(),
            "appointment not found"
        );
    }
}
