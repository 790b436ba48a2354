//! HTTP error translation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::fare::FareError;
use crate::graph::GraphError;
use crate::network::NetworkError;
use crate::path::PathError;

use super::dto::ErrorResponse;

/// Application error type.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        let message = e.to_string();
        match e {
            NetworkError::Domain(_) | NetworkError::DuplicateName { .. } => {
                AppError::BadRequest { message }
            }
            NetworkError::UnknownLine(_) => AppError::NotFound { message },
            NetworkError::Graph(e) => match e {
                GraphError::UnknownStation(_) | GraphError::UnknownSection(_) => {
                    AppError::NotFound { message }
                }
                GraphError::InvalidDistance { .. }
                | GraphError::SelfLoop { .. }
                | GraphError::VertexInUse { .. }
                | GraphError::DuplicateSection(_) => AppError::BadRequest { message },
            },
            NetworkError::Path(e) => match e {
                PathError::SameStation(_) => AppError::BadRequest { message },
                PathError::StationNotFound(_) | PathError::NoPath { .. } => {
                    AppError::NotFound { message }
                }
            },
            NetworkError::InvalidSeed(_) => AppError::Internal { message },
        }
    }
}

impl From<FareError> for AppError {
    fn from(e: FareError) -> Self {
        match e {
            FareError::InvalidDistance(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
