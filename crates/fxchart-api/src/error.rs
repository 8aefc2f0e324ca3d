//! 파이프라인 에러와 API 에러 응답.
//!
//! 모든 실패 경로는 `{"status": "error", "message": ...}` 형식의 단일 응답으로 변환됩니다.
//!
//! | 원인 | HTTP 상태 |
//! |------|-----------|
//! | 데이터 소스 접근 불가, 비정상 응답, 잘못된 바 | 502 |
//! | 빈 바 시리즈 | 502 |
//! | 데이터 소스 응답 시간 초과 | 504 |
//! | 렌더링, 인코딩, 내부 오류 | 500 |

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fxchart_analytics::{ChartError, IndicatorError};
use fxchart_feed::FeedError;
use fxchart_render::RenderError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 차트 파이프라인 에러.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 데이터 소스 실패 (전송 계층 또는 바 검증)
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// 지표 파라미터 오류
    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    /// 차트 구성 실패
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// 렌더링/인코딩 실패
    #[error(transparent)]
    Render(#[from] RenderError),

    /// 파이프라인이 부과한 fetch 기한 초과
    #[error("데이터 소스가 {}초 안에 응답하지 않았습니다", .0.as_secs_f64())]
    Timeout(Duration),

    /// 렌더링 작업이 완료되지 못함 (panic 또는 취소)
    #[error("렌더링 작업 실패: {0}")]
    Join(String),

    /// 잘못된 파이프라인 설정
    #[error("설정 오류: {0}")]
    Config(String),
}

/// 파이프라인 Result 타입.
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// 응답 HTTP 상태 코드.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::Feed(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            PipelineError::Feed(_) => StatusCode::BAD_GATEWAY,
            PipelineError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            PipelineError::Chart(ChartError::EmptySeries) => StatusCode::BAD_GATEWAY,
            PipelineError::Chart(_)
            | PipelineError::Indicator(_)
            | PipelineError::Render(_)
            | PipelineError::Join(_)
            | PipelineError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 로그에 남길 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Feed(err) => err.code(),
            PipelineError::Indicator(_) => "INDICATOR_PARAMETER",
            PipelineError::Chart(ChartError::EmptySeries) => "EMPTY_SERIES",
            PipelineError::Chart(_) => "CHART_LAYOUT",
            PipelineError::Render(_) => "RENDER_FAILED",
            PipelineError::Timeout(_) => "FEED_TIMEOUT",
            PipelineError::Join(_) => "RENDER_TASK",
            PipelineError::Config(_) => "CONFIG",
        }
    }

    /// 서버 측 원인인지 (5xx 중 500).
    pub fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// 에러 응답 본문.
///
/// ```json
/// { "status": "error", "message": "HTTP 503: upstream down" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 항상 "error"
    pub status: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
}

impl ApiErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

impl From<&PipelineError> for ApiErrorResponse {
    fn from(err: &PipelineError) -> Self {
        Self::new(err.to_string())
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ApiErrorResponse::from(&self))).into_response()
    }
}

/// API 핸들러 Result 타입.
pub type ApiResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fxchart_core::{BarField, SeriesError};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                PipelineError::Feed(FeedError::Network("refused".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                PipelineError::Feed(FeedError::Status {
                    code: 503,
                    body: "down".into(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (
                PipelineError::Feed(FeedError::Series(SeriesError::InvalidBar {
                    index: 0,
                    field: BarField::High,
                    reason: "high (5) < open (10)".into(),
                })),
                StatusCode::BAD_GATEWAY,
            ),
            (
                PipelineError::Feed(FeedError::Timeout("slow".into())),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                PipelineError::Timeout(Duration::from_secs(10)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                PipelineError::Chart(ChartError::EmptySeries),
                StatusCode::BAD_GATEWAY,
            ),
            (
                PipelineError::Render(RenderError::Encoding {
                    message: "boom".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                PipelineError::Join("panicked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{:?}", err);
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PipelineError::Chart(ChartError::EmptySeries).code(),
            "EMPTY_SERIES"
        );
        assert_eq!(
            PipelineError::Feed(FeedError::Decode("eof".into())).code(),
            "FEED_DECODE"
        );
        assert_eq!(
            PipelineError::Timeout(Duration::from_secs(1)).code(),
            "FEED_TIMEOUT"
        );
    }

    #[test]
    fn test_error_body_shape() {
        let err = PipelineError::Timeout(Duration::from_secs(10));
        let body = serde_json::to_value(ApiErrorResponse::from(&err)).unwrap();
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("10"));
        assert_eq!(body.as_object().unwrap().len(), 2);
    }
}
