//! OHLCV 바 타입.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SeriesError, SeriesResult};

/// 바의 개별 필드. 검증 에러가 어떤 필드를 위반했는지 가리킬 때 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarField {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl fmt::Display for BarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BarField::Open => "open",
            BarField::High => "high",
            BarField::Low => "low",
            BarField::Close => "close",
            BarField::Volume => "volume",
        };
        f.write_str(name)
    }
}

/// 데이터 소스가 반환하는 원시 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    /// ISO-8601 또는 그에 준하는 타임스탬프 문자열
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// 거래량 (없으면 0)
    #[serde(default)]
    pub volume: f64,
}

impl RawBar {
    /// 새 원시 레코드를 생성합니다.
    pub fn new(
        time: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            time: time.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// 검증된 OHLCV 바.
///
/// `low <= min(open, close) <= max(open, close) <= high`, `volume >= 0`을 만족합니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// 바 시작 시각
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// 바를 생성하고 OHLC 불변식을 검증합니다.
    ///
    /// `index`는 에러 보고에만 사용됩니다.
    pub fn new(
        index: usize,
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> SeriesResult<Self> {
        let bar = Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        };
        bar.validate(index)?;
        Ok(bar)
    }

    /// OHLC 불변식과 거래량 조건을 검사합니다.
    pub fn validate(&self, index: usize) -> SeriesResult<()> {
        let invalid = |field: BarField, reason: String| SeriesError::InvalidBar {
            index,
            field,
            reason,
        };

        for (field, value) in [
            (BarField::Open, self.open),
            (BarField::High, self.high),
            (BarField::Low, self.low),
            (BarField::Close, self.close),
            (BarField::Volume, self.volume),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, format!("{} is not finite ({})", field, value)));
            }
        }

        if self.high < self.open {
            return Err(invalid(
                BarField::High,
                format!("high ({}) < open ({})", self.high, self.open),
            ));
        }
        if self.high < self.close {
            return Err(invalid(
                BarField::High,
                format!("high ({}) < close ({})", self.high, self.close),
            ));
        }
        if self.low > self.open {
            return Err(invalid(
                BarField::Low,
                format!("low ({}) > open ({})", self.low, self.open),
            ));
        }
        if self.low > self.close {
            return Err(invalid(
                BarField::Low,
                format!("low ({}) > close ({})", self.low, self.close),
            ));
        }
        if self.volume < 0.0 {
            return Err(invalid(
                BarField::Volume,
                format!("volume ({}) < 0", self.volume),
            ));
        }
        Ok(())
    }

    /// 양봉(종가 >= 시가)인지 확인합니다. 보합은 양봉으로 취급합니다.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_bar() {
        let bar = Bar::new(0, ts(), 10.0, 12.0, 9.0, 11.0, 100.0).unwrap();
        assert!(bar.is_bullish());
        assert_eq!(bar.range(), 3.0);
    }

    #[test]
    fn test_high_below_open_names_high() {
        let err = Bar::new(2, ts(), 10.0, 5.0, 1.0, 8.0, 0.0).unwrap_err();
        match err {
            SeriesError::InvalidBar {
                index,
                field,
                reason,
            } => {
                assert_eq!(index, 2);
                assert_eq!(field, BarField::High);
                assert!(reason.contains("open"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_low_above_close_names_low() {
        let err = Bar::new(0, ts(), 10.0, 12.0, 9.5, 9.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::InvalidBar {
                field: BarField::Low,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_volume_and_nan() {
        let err = Bar::new(0, ts(), 1.0, 1.0, 1.0, 1.0, -1.0).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::InvalidBar {
                field: BarField::Volume,
                ..
            }
        ));

        let err = Bar::new(0, ts(), 1.0, 1.0, 1.0, f64::NAN, 0.0).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::InvalidBar {
                field: BarField::Close,
                ..
            }
        ));
    }

    #[test]
    fn test_raw_bar_deserialize_without_volume() {
        let raw: RawBar = serde_json::from_str(
            r#"{"time":"2024-01-01T00:00:00","open":1.1,"high":1.2,"low":1.0,"close":1.15}"#,
        )
        .unwrap();
        assert_eq!(raw.volume, 0.0);
        assert_eq!(raw.time, "2024-01-01T00:00:00");
    }

    #[test]
    fn test_bar_field_display_is_lowercase() {
        assert_eq!(BarField::High.to_string(), "high");
        assert_eq!(serde_json::to_string(&BarField::Volume).unwrap(), "\"volume\"");
    }
}
