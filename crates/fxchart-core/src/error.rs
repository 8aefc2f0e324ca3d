//! 바 시리즈 구성 에러 타입.
//!
//! 원시 레코드를 `BarSeries`로 변환할 때 발생하는 에러를 정의합니다.
//! 세 가지 모두 요청 단위로 치명적이며, 부분적인 시리즈는 만들어지지 않습니다.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::BarField;

/// 바 시리즈 구성 에러.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// 타임스탬프를 해석할 수 없는 레코드
    #[error("잘못된 바 레코드 (index {index}): {reason}")]
    MalformedBar { index: usize, reason: String },

    /// 타임스탬프가 직전 레코드보다 크지 않음
    #[error("시간 순서 위반 (index {index}): {current} <= 이전 {previous}")]
    OutOfOrder {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    /// OHLC 불변식 또는 거래량 조건 위반
    #[error("유효하지 않은 바 (index {index}, field {field}): {reason}")]
    InvalidBar {
        index: usize,
        field: BarField,
        reason: String,
    },
}

/// 바 시리즈 작업을 위한 Result 타입.
pub type SeriesResult<T> = Result<T, SeriesError>;

impl SeriesError {
    /// 에러가 발생한 레코드 인덱스를 반환합니다.
    pub fn index(&self) -> usize {
        match self {
            SeriesError::MalformedBar { index, .. }
            | SeriesError::OutOfOrder { index, .. }
            | SeriesError::InvalidBar { index, .. } => *index,
        }
    }

    /// API 응답에 사용할 에러 코드를 반환합니다.
    pub fn code(&self) -> &'static str {
        match self {
            SeriesError::MalformedBar { .. } => "MALFORMED_BAR",
            SeriesError::OutOfOrder { .. } => "OUT_OF_ORDER",
            SeriesError::InvalidBar { .. } => "INVALID_BAR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_index_and_code() {
        let err = SeriesError::InvalidBar {
            index: 3,
            field: BarField::High,
            reason: "high (5) < open (10)".to_string(),
        };
        assert_eq!(err.index(), 3);
        assert_eq!(err.code(), "INVALID_BAR");

        let err = SeriesError::MalformedBar {
            index: 0,
            reason: "bad time".to_string(),
        };
        assert_eq!(err.code(), "MALFORMED_BAR");
    }

    #[test]
    fn test_error_display_names_field() {
        let err = SeriesError::InvalidBar {
            index: 0,
            field: BarField::Volume,
            reason: "volume (-1) < 0".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("volume"));
        assert!(message.contains("index 0"));
    }
}
