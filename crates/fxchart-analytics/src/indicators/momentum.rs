//! 모멘텀 지표 (Momentum Indicators).
//!
//! - RSI (Relative Strength Index), Wilder 방식의 지수 평활

use serde::{Deserialize, Serialize};

use super::ewm::{ewm_mean, EwmParams};
use super::{IndicatorError, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS)), RS = 평균 상승폭 / 평균 하락폭
    ///
    /// 평균은 `com = period - 1` (α = 1/period), bias-adjusted EWM,
    /// `min_periods = period`로 계산합니다. 따라서 인덱스 `0..period`는 `None`입니다.
    ///
    /// - 평균 하락폭이 0이고 평균 상승폭이 양수이면 100
    /// - 둘 다 0이면 (`0/0`) `None`
    ///
    /// 데이터가 부족해도 에러가 아니며, 해당 위치가 모두 `None`이 됩니다.
    pub fn rsi(&self, prices: &[f64], params: RsiParams) -> IndicatorResult<Vec<Option<f64>>> {
        let period = params.period;
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        // 가격 변화 (첫 번째는 정의되지 않음)
        let deltas: Vec<f64> = std::iter::once(f64::NAN)
            .chain(prices.windows(2).map(|w| w[1] - w[0]))
            .take(prices.len())
            .collect();

        let gains: Vec<f64> = deltas
            .iter()
            .map(|&d| if d.is_nan() { d } else { d.max(0.0) })
            .collect();
        let losses: Vec<f64> = deltas
            .iter()
            .map(|&d| if d.is_nan() { d } else { (-d).max(0.0) })
            .collect();

        let smoothing = EwmParams::from_com((period - 1) as f64)?.with_min_periods(period);
        let avg_gains = ewm_mean(&gains, &smoothing);
        let avg_losses = ewm_mean(&losses, &smoothing);

        let result = avg_gains
            .iter()
            .zip(&avg_losses)
            .map(|(&gain, &loss)| {
                let rsi = 100.0 - 100.0 / (1.0 + gain / loss);
                // NaN은 워밍업 구간 또는 0/0
                (!rsi.is_nan()).then_some(rsi)
            })
            .collect();

        Ok(result)
    }
}
