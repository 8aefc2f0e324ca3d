//! 차트 생성 endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

use crate::error::ApiResult;
use crate::service::ChartPayload;
use crate::state::AppState;

/// 성공 응답.
///
/// ```json
/// {
///   "status": "success",
///   "data": { "image": "iVBORw0...", "timestamp": "2024-03-01T12:00:00Z", "symbol": "EURUSD", "timeframe": "H1" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    /// 항상 "success"
    pub status: String,
    pub data: ChartPayload,
}

impl ChartResponse {
    pub fn success(data: ChartPayload) -> Self {
        Self {
            status: "success".to_string(),
            data,
        }
    }
}

/// 차트를 생성해 base64 PNG로 반환합니다.
///
/// GET /get_chart
pub async fn get_chart(State(state): State<Arc<AppState>>) -> ApiResult<Json<ChartResponse>> {
    match state.chart_service.generate().await {
        Ok(payload) => Ok(Json(ChartResponse::success(payload))),
        Err(err) => {
            if err.is_internal() {
                error!(code = err.code(), error = %err, "Chart generation failed");
            } else {
                warn!(code = err.code(), error = %err, "Chart generation failed");
            }
            Err(err)
        }
    }
}

/// 차트 라우터.
pub fn chart_router() -> Router<Arc<AppState>> {
    Router::new().route("/get_chart", get(get_chart))
}
