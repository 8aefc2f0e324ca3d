//! # FX Chart Analytics
//!
//! 바 시리즈로부터 지표를 계산하고 차트 구성(`ChartSpec`)을 조립합니다.
//!
//! - [`indicators`]: RSI (bias-adjusted EWM), EMA 오버레이, 범용 EWM
//! - [`chart`]: 패널/시리즈/스타일로 이루어진 선언적 차트 모델과 빌더
//!
//! 이 크레이트는 그리기 코드를 포함하지 않습니다. 렌더링은 `fxchart-render`가 담당합니다.

pub mod chart;
pub mod indicators;

pub use chart::{
    ChartError, ChartResult, ChartSpec, ChartSpecBuilder, LineStyle, Palette, Panel, PlotSeries,
    Rgb, SeriesColor, SeriesData, SeriesKind, XDomain,
};
pub use indicators::{
    EmaParams, EwmParams, IndicatorEngine, IndicatorError, IndicatorResult, RsiParams,
};
