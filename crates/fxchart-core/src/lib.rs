//! # FX Chart Core
//!
//! 차트 서비스의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - OHLC 바(`Bar`)와 원시 레코드(`RawBar`)
//! - 시간 순서가 보장된 바 시리즈(`BarSeries`)
//! - 바 시리즈에 정렬된 지표 시리즈(`IndicatorSeries`)
//! - 심볼 및 타임프레임 정의
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
