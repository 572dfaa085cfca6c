use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;

use hearth_core::{default_range, filter_by_range, Category, MetricRecord, Period, PeriodRange};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Optional range parameters. Either all four are present (filter
/// server-side) or none are (return the raw collection).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeQuery {
    start_month: Option<u32>,
    start_year: Option<i32>,
    end_month: Option<u32>,
    end_year: Option<i32>,
}

impl RangeQuery {
    fn into_range(self) -> Result<Option<PeriodRange>, ApiError> {
        match (
            self.start_month,
            self.start_year,
            self.end_month,
            self.end_year,
        ) {
            (None, None, None, None) => Ok(None),
            (Some(start_month), Some(start_year), Some(end_month), Some(end_year)) => Ok(Some(
                PeriodRange::new(start_month, start_year, end_month, end_year),
            )),
            _ => Err(ApiError::IncompleteRange),
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_category(
    Path(segment): Path<String>,
    Query(params): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MetricRecord>>> {
    let category = Category::from_str(&segment).map_err(ApiError::UnknownCategory)?;
    let records = state.warehouse.fetch_category(category)?;

    let records = match params.into_range()? {
        Some(range) => {
            filter_by_range(&records, &range)
                .map_err(ApiError::InvalidRange)?
                .records
        }
        None => records,
    };

    Ok(Json(records))
}

async fn get_default_range(State(state): State<Arc<AppState>>) -> ApiResult<Json<PeriodRange>> {
    let mut collections = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        collections.push(state.warehouse.fetch_category(category)?);
    }

    let now = Period::from(OffsetDateTime::now_utc());
    let range = default_range(collections.iter().map(Vec::as_slice), now);
    Ok(Json(range))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/range", get(get_default_range))
        .route("/api/:category", get(get_category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_range_params_mean_no_filtering() {
        let query = RangeQuery::default();
        assert!(matches!(query.into_range(), Ok(None)));
    }

    #[test]
    fn complete_range_params_build_a_range() {
        let query = RangeQuery {
            start_month: Some(3),
            start_year: Some(2024),
            end_month: Some(9),
            end_year: Some(2024),
        };
        let range = query.into_range().expect("complete").expect("present");
        assert_eq!(range, PeriodRange::new(3, 2024, 9, 2024));
    }

    #[test]
    fn partial_range_params_are_rejected() {
        let query = RangeQuery {
            start_month: Some(3),
            ..RangeQuery::default()
        };
        assert!(matches!(query.into_range(), Err(ApiError::IncompleteRange)));
    }
}
