//! API 라우트.
//!
//! - `/get_chart` - 차트 생성
//! - `/health` - 헬스 체크 (liveness)

pub mod chart;
pub mod health;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

pub use chart::{chart_router, get_chart, ChartResponse};
pub use health::{health_check, health_router};

/// 전체 API 라우터를 생성합니다.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_router())
        .merge(chart_router())
        .with_state(state)
}
