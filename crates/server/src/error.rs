use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::services::error_messages::format_error_for_display;
use services::services::save_retry::SaveError;
use services::services::trash::TrashError;
use thiserror::Error;
use utils::response::ApiResponse;

use db::models::session::SessionError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Trash(#[from] TrashError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error("Not found")]
    NotFound,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Database(sqlx::Error::RowNotFound) | ApiError::NotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Session(SessionError::SessionFull)
            | ApiError::Session(SessionError::AlreadyRegistered) => StatusCode::CONFLICT,
            ApiError::Session(SessionError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Trash(TrashError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Trash(TrashError::LetterCodeTaken(_)) => StatusCode::CONFLICT,
            ApiError::Trash(TrashError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Save(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message. Internal database errors go through the
    /// Dutch translation table instead of leaking SQL details.
    fn user_message(&self) -> String {
        match self {
            ApiError::Database(sqlx::Error::RowNotFound) | ApiError::NotFound => {
                "Niet gevonden".to_string()
            }
            ApiError::Database(e) => format_error_for_display(&e.to_string()),
            ApiError::Session(SessionError::Database(e)) => {
                format_error_for_display(&e.to_string())
            }
            ApiError::Trash(TrashError::Database(e)) => format_error_for_display(&e.to_string()),
            ApiError::Save(e) => format_error_for_display(&e.message),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }
        let body: ApiResponse<()> = ApiResponse::error(&self.user_message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Trash(TrashError::LetterCodeTaken("A".to_string())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Session(SessionError::SessionFull).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
