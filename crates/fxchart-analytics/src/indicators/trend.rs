//! 추세 지표 (Trend Indicators).
//!
//! - EMA: 가격 패널 오버레이용 지수 이동평균

use serde::{Deserialize, Serialize};

use super::ewm::{ewm_mean, EwmParams};
use super::IndicatorResult;

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmaParams {
    /// EMA span (α = 2 / (span + 1)).
    pub span: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { span: 20 }
    }
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// bias 보정 없는 재귀식: `ema[0] = price[0]`, `ema[i] = α·price[i] + (1-α)·ema[i-1]`.
    /// RSI와 달리 워밍업 구간이 없어 모든 인덱스가 정의됩니다.
    pub fn ema(&self, prices: &[f64], params: EmaParams) -> IndicatorResult<Vec<Option<f64>>> {
        let smoothing = EwmParams::from_span(params.span)?.with_adjust(false);

        Ok(ewm_mean(prices, &smoothing)
            .into_iter()
            .map(|v| (!v.is_nan()).then_some(v))
            .collect())
    }
}
