pub mod handlers;
pub mod server;

use crate::utils::error::BlendError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Maps engine and store errors onto HTTP statuses. The body shape matches
/// the rest of the API: `{"error": "..."}`.
impl IntoResponse for BlendError {
    fn into_response(self) -> Response {
        let status = match &self {
            BlendError::InvalidTankData { .. }
            | BlendError::Csv(_)
            | BlendError::Config { .. } => StatusCode::BAD_REQUEST,
            BlendError::TankNotFound(_) | BlendError::PlanNotFound(_) => StatusCode::NOT_FOUND,
            BlendError::TankExists(_) => StatusCode::CONFLICT,
            BlendError::InsufficientCapacity { .. } | BlendError::EmptyInventory => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            BlendError::Io(_) | BlendError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
