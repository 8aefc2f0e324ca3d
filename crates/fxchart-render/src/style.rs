//! 팔레트 색상을 plotters 스타일로 변환.

use fxchart_analytics::{PlotSeries, Rgb};
use plotters::style::{Color, RGBColor, ShapeStyle};

use crate::layout::stroke_px;

/// 팔레트 색상 → plotters 색상.
pub fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// 라인 시리즈의 선 스타일 (색상, 불투명도, 두께).
pub fn line_style(series: &PlotSeries) -> ShapeStyle {
    ShapeStyle {
        color: rgb(series.color.primary()).mix(series.opacity),
        filled: false,
        stroke_width: stroke_px(series.width),
    }
}

/// 캔들 몸통 스타일. 꼬리와 테두리는 같은 색을 씁니다.
pub fn candle_style(color: Rgb, opacity: f64) -> ShapeStyle {
    ShapeStyle {
        color: rgb(color).mix(opacity),
        filled: true,
        stroke_width: 1,
    }
}

/// 격자 선 스타일.
pub fn grid_style(color: Rgb) -> ShapeStyle {
    ShapeStyle {
        color: rgb(color).mix(0.6),
        filled: false,
        stroke_width: 1,
    }
}
