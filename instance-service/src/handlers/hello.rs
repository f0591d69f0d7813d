use crate::dtos::{HelloRequest, HelloResponse};
use axum::{body::Bytes, http::StatusCode, Json};

/// Echo a greeting for the posted name.
///
/// The body is decoded as JSON whatever the request's content type; a missing
/// `name` greets the empty string.
pub async fn hello(body: Bytes) -> (StatusCode, Json<HelloResponse>) {
    match serde_json::from_slice::<HelloRequest>(&body) {
        Ok(request) => (
            StatusCode::OK,
            Json(HelloResponse {
                message: format!("Hello, {}!", request.name),
            }),
        ),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected greeting body");
            (
                StatusCode::BAD_REQUEST,
                Json(HelloResponse {
                    message: "Invalid JSON".to_string(),
                }),
            )
        }
    }
}
