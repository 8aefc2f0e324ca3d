//! 지수 가중 이동평균 (EWM).
//!
//! 가중치 갱신 순서가 고정되어 있어 같은 입력에 대해 비트 단위로 같은 값을 냅니다.
//! NaN이 끼어 있어도 이전 가중치는 계속 감쇠합니다.
//!
//! - `adjust = true`: 누적 가중치로 정규화 (bias-adjusted).
//!   `y_t = Σ (1-α)^(t-k) x_k / Σ (1-α)^(t-k)`
//! - `adjust = false`: 단순 재귀. `y_0 = x_0`, `y_t = (1-α) y_{t-1} + α x_t`
//!
//! NaN 입력은 관측으로 세지 않으며, 관측 수가 `min_periods`에 도달하기 전에는 NaN을 냅니다.

use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// EWM 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EwmParams {
    /// 평활 계수 α, (0, 1]
    pub alpha: f64,
    /// 누적 가중치 정규화 여부
    pub adjust: bool,
    /// 값을 보고하기 위해 필요한 최소 관측 수
    pub min_periods: usize,
}

impl EwmParams {
    /// center of mass 파라미터화. `α = 1 / (1 + com)`.
    pub fn from_com(com: f64) -> IndicatorResult<Self> {
        if !com.is_finite() || com < 0.0 {
            return Err(IndicatorError::InvalidParameter(format!(
                "com은 0 이상이어야 합니다: {}",
                com
            )));
        }
        Ok(Self {
            alpha: 1.0 / (1.0 + com),
            adjust: true,
            min_periods: 0,
        })
    }

    /// span 파라미터화. `com = (span - 1) / 2`, 즉 `α = 2 / (span + 1)`.
    pub fn from_span(span: usize) -> IndicatorResult<Self> {
        if span == 0 {
            return Err(IndicatorError::InvalidParameter(
                "span은 0보다 커야 합니다".to_string(),
            ));
        }
        Self::from_com((span as f64 - 1.0) / 2.0)
    }

    pub fn with_adjust(mut self, adjust: bool) -> Self {
        self.adjust = adjust;
        self
    }

    pub fn with_min_periods(mut self, min_periods: usize) -> Self {
        self.min_periods = min_periods;
        self
    }

    pub(crate) fn validate(&self) -> IndicatorResult<()> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(IndicatorError::InvalidParameter(format!(
                "alpha는 (0, 1] 범위여야 합니다: {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// EWM 평균을 계산합니다. 정의되지 않은 위치는 NaN입니다.
///
/// 호출 전에 `params.validate()`로 α를 검증해야 합니다.
/// 첫 유효값 이후의 NaN은 관측으로 세지 않지만 이전 가중치는 계속 감쇠합니다.
pub(crate) fn ewm_mean(values: &[f64], params: &EwmParams) -> Vec<f64> {
    let mut output = Vec::with_capacity(values.len());
    let Some((&first, rest)) = values.split_first() else {
        return output;
    };

    let min_periods = params.min_periods.max(1);
    let old_wt_factor = 1.0 - params.alpha;
    let new_wt = if params.adjust { 1.0 } else { params.alpha };

    let mut weighted = first;
    let mut nobs = usize::from(!first.is_nan());
    let mut old_wt = 1.0;
    output.push(if nobs >= min_periods { weighted } else { f64::NAN });

    for &cur in rest {
        let is_observation = !cur.is_nan();
        if is_observation {
            nobs += 1;
        }

        if !weighted.is_nan() {
            old_wt *= old_wt_factor;
            if is_observation {
                // 같은 값이면 가중 평균도 그대로라 연산을 건너뜀
                if weighted != cur {
                    weighted = (old_wt * weighted + new_wt * cur) / (old_wt + new_wt);
                }
                if params.adjust {
                    old_wt += new_wt;
                } else {
                    old_wt = 1.0;
                }
            }
        } else if is_observation {
            weighted = cur;
        }

        output.push(if nobs >= min_periods { weighted } else { f64::NAN });
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unadjusted_matches_recursive_ema() {
        let params = EwmParams::from_span(3).unwrap().with_adjust(false);
        let out = ewm_mean(&[100.0, 102.0, 101.0, 103.0, 105.0], &params);
        assert_eq!(out, vec![100.0, 101.0, 101.0, 102.0, 103.5]);
    }

    #[test]
    fn test_adjusted_weights_are_normalized() {
        // α = 0.5: y1 = (0.5*1 + 1*3) / 1.5
        let params = EwmParams::from_com(1.0).unwrap();
        let out = ewm_mean(&[1.0, 3.0], &params);
        assert_eq!(out[0], 1.0);
        assert!((out[1] - 3.5 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_interior_nan_still_decays_weight() {
        let params = EwmParams::from_com(1.0).unwrap();
        let out = ewm_mean(&[1.0, f64::NAN, 3.0], &params);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[1], 1.0);
        // 가중치 0.25 : 1
        assert!((out[2] - 2.6).abs() < 1e-12);
    }

    #[test]
    fn test_leading_nan_and_min_periods() {
        let params = EwmParams::from_com(1.0).unwrap().with_min_periods(2);
        let out = ewm_mean(&[f64::NAN, 2.0, 2.0, 4.0], &params);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_eq!(out[2], 2.0);
        assert!(out[3] > 2.0 && out[3] < 4.0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(EwmParams::from_span(0).is_err());
        assert!(EwmParams::from_com(-1.0).is_err());
        assert!(EwmParams::from_com(f64::NAN).is_err());
        let bad = EwmParams {
            alpha: 1.5,
            adjust: true,
            min_periods: 0,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_empty_input() {
        let params = EwmParams::from_span(20).unwrap();
        assert!(ewm_mean(&[], &params).is_empty());
    }
}
