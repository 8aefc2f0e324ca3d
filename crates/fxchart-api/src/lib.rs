//! 차트 생성 서비스와 HTTP 서버.
//!
//! # 모듈 구성
//!
//! - [`service`]: fetch → 지표 → 차트 명세 → 렌더링 파이프라인 (`ChartService`)
//! - [`routes`]: `/get_chart`, `/health` 엔드포인트
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`error`]: 파이프라인 에러와 HTTP 상태 매핑

pub mod error;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{ApiErrorResponse, ApiResult, PipelineError, PipelineResult};
pub use routes::{create_router, ChartResponse};
pub use service::{ChartData, ChartPayload, ChartService, ChartSettings, RenderedChart};
pub use state::AppState;
