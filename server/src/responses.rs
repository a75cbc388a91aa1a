use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::services::posts::PostsError;

/// JSON error body: `{"message": ...}`.
pub(crate) struct Error {
    status_code: StatusCode,
    message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        (
            self.status_code,
            [("content-type", "application/json")],
            Json(json!({
                "message": self.message,
            })),
        )
            .into_response()
    }
}

impl Error {
    pub(crate) fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code,
            message,
        }
    }
}

impl From<PostsError> for Error {
    fn from(err: PostsError) -> Self {
        tracing::error!(error = %err, "post provider failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load posts".to_owned(),
        )
    }
}
