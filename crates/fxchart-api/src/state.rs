//! 핸들러에서 공유되는 애플리케이션 상태.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::service::ChartService;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 `Arc<AppState>`로 주입됩니다.
/// 요청 간 가변 상태는 없습니다.
#[derive(Clone)]
pub struct AppState {
    /// 차트 생성 파이프라인
    pub chart_service: Arc<ChartService>,

    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(chart_service: ChartService) -> Self {
        Self {
            chart_service: Arc::new(chart_service),
            started_at: Utc::now(),
        }
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
