use axum::http::StatusCode;

pub(crate) mod posts;

pub(crate) async fn healthz() -> StatusCode {
    StatusCode::OK
}
