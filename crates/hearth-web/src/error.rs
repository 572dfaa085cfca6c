use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use hearth_core::ValidationError;
use hearth_warehouse::WarehouseError;

pub type ApiResult<T> = Result<T, ApiError>;

/// API-level failures. Store problems surface as a generic server error
/// with no category-specific recovery; only caller mistakes (unknown
/// category, structurally invalid range) get specific statuses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown category")]
    UnknownCategory(ValidationError),

    #[error("invalid range: {0}")]
    InvalidRange(ValidationError),

    #[error("incomplete range: all of startMonth, startYear, endMonth, endYear are required")]
    IncompleteRange,

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::UnknownCategory(error) => (StatusCode::NOT_FOUND, error.to_string()),
            Self::InvalidRange(error) => (StatusCode::BAD_REQUEST, error.to_string()),
            Self::IncompleteRange => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Warehouse(error) => {
                tracing::error!(%error, "warehouse failure while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("failed to fetch market data"),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
