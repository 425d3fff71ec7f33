use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reelshelf_core::CatalogError;
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => Self::not_found(format!("film {id} not found")),
            CatalogError::InvalidRecord(msg) => Self::unprocessable(msg),
            CatalogError::SearchUnavailable(reason) => {
                warn!(%reason, "search provider unavailable");
                Self::service_unavailable("search unavailable")
            }
            other => {
                error!(error = %other, "catalog request failed");
                Self::internal("internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use reelshelf_core::{SearchError, model::MediaId};

    use super::*;

    #[test]
    fn catalog_errors_map_to_statuses() {
        let cases = [
            (CatalogError::NotFound(MediaId(7)), StatusCode::NOT_FOUND),
            (
                CatalogError::InvalidRecord("title is required".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                CatalogError::from(SearchError::Disabled),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                CatalogError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let err = AppError::from(CatalogError::Internal("connection refused".into()));
        assert_eq!(err.message, "internal server error");
    }
}
