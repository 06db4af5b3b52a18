use crate::contact::ContactError;
use crate::portfolio::PortfolioError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Anything a handler can fail with, mapped onto an HTTP status
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error("invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),

    #[error("invalid query: {}", .0.body_text())]
    Query(#[from] QueryRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Portfolio(PortfolioError::NotFound) => StatusCode::NOT_FOUND,
            Self::Portfolio(PortfolioError::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Portfolio(PortfolioError::Yaml(_) | PortfolioError::Json(_) | PortfolioError::Io(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Contact(ContactError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Contact(ContactError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            Self::Contact(ContactError::Validation(_) | ContactError::UnknownStatus(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Body(rejection) => rejection.status(),
            Self::Query(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        } else {
            tracing::debug!(%status, "request rejected: {self}");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
