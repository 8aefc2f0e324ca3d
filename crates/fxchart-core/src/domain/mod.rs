//! 차트 파이프라인 도메인 모델.
//!
//! - `Bar`, `RawBar`, `BarField` - OHLCV 바와 원시 레코드
//! - `BarSeries` - 시간 순서가 보장된 바 시리즈
//! - `IndicatorSeries` - 바 시리즈에 1:1로 정렬된 지표 값
//! - `parse_timestamp` - 피드 타임스탬프 해석

mod bar;
mod series;
mod time;

pub use bar::*;
pub use series::*;
pub use time::*;
