//! 가격 + RSI 2패널 차트 빌더.

use fxchart_core::{BarSeries, IndicatorSeries};
use tracing::debug;

use super::spec::{ChartSpec, Panel, PlotSeries, XDomain};
use super::style::{LineStyle, Palette};
use super::{ChartError, ChartResult};

/// 가격 패널 높이 비율.
pub const PRICE_PANEL_RATIO: f64 = 2.0;
/// 오실레이터 패널 높이 비율.
pub const OSCILLATOR_PANEL_RATIO: f64 = 1.0;
/// 기준선 불투명도.
pub const THRESHOLD_OPACITY: f64 = 0.3;

/// 바 시리즈와 지표로부터 `ChartSpec`을 조립합니다.
///
/// 결과는 항상 두 패널입니다:
/// - 패널 0 (가격, 비율 2): 캔들스틱 + 오버레이 라인
/// - 패널 1 (RSI, 비율 1): RSI 라인 + 과매수/과매도 점선 기준선, y 범위 0..100
#[derive(Debug, Clone)]
pub struct ChartSpecBuilder {
    palette: Palette,
    title: String,
    overbought: f64,
    oversold: f64,
    line_width: f64,
}

impl ChartSpecBuilder {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            title: String::new(),
            overbought: 70.0,
            oversold: 30.0,
            line_width: 0.8,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// 과매수/과매도 기준선 값.
    pub fn thresholds(mut self, overbought: f64, oversold: f64) -> Self {
        self.overbought = overbought;
        self.oversold = oversold;
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    /// 차트 명세를 생성합니다.
    ///
    /// 바가 없으면 `EmptySeries`, 지표가 바와 정렬되어 있지 않으면 `Misaligned`를 반환합니다.
    pub fn build(
        &self,
        bars: &BarSeries,
        overlays: &[IndicatorSeries],
        rsi: &IndicatorSeries,
    ) -> ChartResult<ChartSpec> {
        let x_domain = XDomain::from_bars(bars).ok_or(ChartError::EmptySeries)?;

        for series in overlays.iter().chain(std::iter::once(rsi)) {
            if !series.is_aligned_with(bars) {
                return Err(ChartError::Misaligned {
                    series: series.name().to_string(),
                    expected: bars.len(),
                    actual: series.len(),
                });
            }
        }

        let palette = &self.palette;

        let mut price = Panel::new("price", PRICE_PANEL_RATIO)
            .with_y_label("Price")
            .push(PlotSeries::candlestick(
                "OHLC",
                bars.clone(),
                palette.bullish,
                palette.bearish,
            ));
        for (index, overlay) in overlays.iter().enumerate() {
            price = price.push(
                PlotSeries::line(overlay.clone(), palette.overlay_color(index))
                    .with_width(self.line_width),
            );
        }

        let oscillator = Panel::new("rsi", OSCILLATOR_PANEL_RATIO)
            .with_y_label("RSI")
            .with_y_range(0.0, 100.0)
            .push(PlotSeries::line(rsi.clone(), palette.rsi).with_width(self.line_width))
            .push(
                PlotSeries::constant_line("overbought", self.overbought, palette.bearish)
                    .with_style(LineStyle::Dashed)
                    .with_opacity(THRESHOLD_OPACITY)
                    .with_width(self.line_width),
            )
            .push(
                PlotSeries::constant_line("oversold", self.oversold, palette.bullish)
                    .with_style(LineStyle::Dashed)
                    .with_opacity(THRESHOLD_OPACITY)
                    .with_width(self.line_width),
            );

        let spec = ChartSpec {
            title: self.title.clone(),
            x_domain,
            panels: vec![price, oscillator],
            palette: self.palette,
        };
        spec.validate()?;

        debug!(
            bars = bars.len(),
            overlays = overlays.len(),
            rsi_defined = rsi.defined_count(),
            "chart spec built"
        );
        Ok(spec)
    }
}
