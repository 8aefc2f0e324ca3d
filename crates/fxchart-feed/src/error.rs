//! 데이터 소스 에러 타입.

use fxchart_core::SeriesError;
use thiserror::Error;

/// 데이터 소스 에러.
///
/// `Series`를 제외한 모든 변형은 전송 계층 에러(소스 접근 불가, 비정상 상태 코드,
/// 잘못된 JSON 본문)입니다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    Network(String),

    /// 요청 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 2xx가 아닌 응답
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// 응답 본문 파싱 실패
    #[error("Decode error: {0}")]
    Decode(String),

    /// 요청 URL 구성 실패
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// 바 검증 실패
    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// 데이터 소스 작업을 위한 Result 타입.
pub type FeedResult<T> = Result<T, FeedError>;

impl FeedError {
    /// 전송 계층 에러인지 확인.
    pub fn is_transport(&self) -> bool {
        !matches!(self, FeedError::Series(_))
    }

    /// 타임아웃인지 확인.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FeedError::Timeout(_))
    }

    /// 로그와 API 응답에 사용할 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            FeedError::Network(_) => "FEED_NETWORK",
            FeedError::Timeout(_) => "FEED_TIMEOUT",
            FeedError::Status { .. } => "FEED_STATUS",
            FeedError::Decode(_) => "FEED_DECODE",
            FeedError::InvalidUrl(_) => "FEED_INVALID_URL",
            FeedError::Series(err) => err.code(),
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout(err.to_string())
        } else if err.is_builder() {
            FeedError::InvalidUrl(err.to_string())
        } else if err.is_decode() {
            FeedError::Decode(err.to_string())
        } else {
            FeedError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Decode(err.to_string())
    }
}
