//! 기술적 지표 모듈.
//!
//! 차트 파이프라인이 사용하는 지표를 제공합니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **EMA**: 지수 이동평균, 가격 패널 오버레이
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수, 오실레이터 패널
//!
//! ## 공통
//! - **EWM**: 편향 보정 지수 가중 이동평균 (RSI/EMA의 기반)
//!
//! # 사용 예시
//!
//! ```
//! use fxchart_analytics::indicators::{EmaParams, IndicatorEngine, RsiParams};
//!
//! let engine = IndicatorEngine::new();
//! let closes = [1.10, 1.11, 1.12];
//!
//! let ema = engine.ema(&closes, EmaParams { span: 20 }).unwrap();
//! assert_eq!(ema[0], Some(1.10));
//!
//! let rsi = engine.rsi(&closes, RsiParams { period: 14 }).unwrap();
//! assert!(rsi.iter().all(Option::is_none));
//! ```

mod ewm;
pub mod momentum;
pub mod trend;

use fxchart_core::{BarSeries, IndicatorSeries};
use thiserror::Error;

pub use ewm::EwmParams;
pub use momentum::{MomentumCalculator, RsiParams};
pub use trend::{EmaParams, TrendIndicators};

/// 지표 계산 오류.
///
/// 수치적 경계 상황(0으로 나누기, 데이터 부족)은 오류가 아니라 `None` 값으로 표현됩니다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 통합 지표 엔진.
///
/// 입력을 변경하지 않는 순수 함수 모음입니다. 결과는 입력과 같은 길이로 정렬됩니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 추세 지표 ====================

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// # 인자
    /// * `prices` - 가격 데이터 (종가)
    /// * `params` - EMA 파라미터 (span)
    ///
    /// # 반환
    /// 모든 인덱스에서 정의된 EMA 값들
    pub fn ema(&self, prices: &[f64], params: EmaParams) -> IndicatorResult<Vec<Option<f64>>> {
        self.trend.ema(prices, params)
    }

    // ==================== 모멘텀 지표 ====================

    /// RSI (Relative Strength Index) 계산.
    ///
    /// # 인자
    /// * `prices` - 가격 데이터 (종가)
    /// * `params` - RSI 파라미터 (기간, 기본값 14)
    ///
    /// # 반환
    /// 0-100 사이의 RSI 값들 (처음 `period`개는 None)
    pub fn rsi(&self, prices: &[f64], params: RsiParams) -> IndicatorResult<Vec<Option<f64>>> {
        self.momentum.rsi(prices, params)
    }

    // ==================== 범용 ====================

    /// 지수 가중 이동평균 (EWM) 계산.
    pub fn ewm(&self, values: &[f64], params: EwmParams) -> IndicatorResult<Vec<Option<f64>>> {
        params.validate()?;
        Ok(ewm::ewm_mean(values, &params)
            .into_iter()
            .map(|v| (!v.is_nan()).then_some(v))
            .collect())
    }

    // ==================== 시리즈 단위 ====================

    /// 바 시리즈의 종가로 RSI 시리즈를 계산합니다. 이름은 `"RSI"`.
    pub fn rsi_series(&self, bars: &BarSeries, params: RsiParams) -> IndicatorResult<IndicatorSeries> {
        let values = self.rsi(&bars.closes(), params)?;
        Ok(IndicatorSeries::from_values("RSI", bars, values))
    }

    /// 바 시리즈의 종가로 EMA 시리즈를 계산합니다. 이름은 `"EMA{span}"`.
    pub fn ema_series(&self, bars: &BarSeries, params: EmaParams) -> IndicatorResult<IndicatorSeries> {
        let values = self.ema(&bars.closes(), params)?;
        Ok(IndicatorSeries::from_values(
            format!("EMA{}", params.span),
            bars,
            values,
        ))
    }
}
