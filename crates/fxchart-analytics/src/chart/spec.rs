//! 선언적 차트 구성 모델.
//!
//! `ChartSpec`은 렌더링에 필요한 모든 것을 담는 불변 값입니다. 렌더러는 이 값의 순수 함수여야 합니다.

use chrono::{DateTime, Utc};
use fxchart_core::{BarSeries, IndicatorSeries};
use serde::Serialize;

use super::style::{LineStyle, Palette, Rgb, SeriesColor};
use super::{ChartError, ChartResult};

/// 모든 패널이 공유하는 시간 축.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct XDomain {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// 축 위의 바 개수. 시리즈는 인덱스로 정렬됩니다.
    pub len: usize,
}

impl XDomain {
    /// 바 시리즈가 차지하는 구간. 빈 시리즈이면 `None`.
    pub fn from_bars(bars: &BarSeries) -> Option<Self> {
        bars.time_range().map(|(start, end)| Self {
            start,
            end,
            len: bars.len(),
        })
    }
}

/// 시리즈 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Candlestick,
    Line,
}

/// 시리즈 데이터.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesData {
    /// OHLC 바 (캔들스틱 전용)
    Bars(BarSeries),
    /// 바에 정렬된 지표 값
    Indicator(IndicatorSeries),
    /// 전체 시간 구간에 걸친 상수 라인
    Constant { value: f64 },
}

/// 패널에 그려지는 하나의 시리즈.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub label: String,
    pub kind: SeriesKind,
    pub data: SeriesData,
    pub color: SeriesColor,
    pub style: LineStyle,
    /// 0.0 ~ 1.0
    pub opacity: f64,
    /// 선 두께 (포인트)
    pub width: f64,
}

impl PlotSeries {
    /// 캔들스틱 시리즈. 꼬리와 테두리는 몸통 색을 따릅니다.
    pub fn candlestick(label: impl Into<String>, bars: BarSeries, up: Rgb, down: Rgb) -> Self {
        Self {
            label: label.into(),
            kind: SeriesKind::Candlestick,
            data: SeriesData::Bars(bars),
            color: SeriesColor::UpDown { up, down },
            style: LineStyle::Solid,
            opacity: 1.0,
            width: 1.0,
        }
    }

    /// 지표 라인 시리즈. 라벨은 지표 이름입니다.
    pub fn line(series: IndicatorSeries, color: Rgb) -> Self {
        Self {
            label: series.name().to_string(),
            kind: SeriesKind::Line,
            data: SeriesData::Indicator(series),
            color: SeriesColor::Solid(color),
            style: LineStyle::Solid,
            opacity: 1.0,
            width: 1.0,
        }
    }

    /// 상수 기준선.
    pub fn constant_line(label: impl Into<String>, value: f64, color: Rgb) -> Self {
        Self {
            label: label.into(),
            kind: SeriesKind::Line,
            data: SeriesData::Constant { value },
            color: SeriesColor::Solid(color),
            style: LineStyle::Solid,
            opacity: 1.0,
            width: 1.0,
        }
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// 정의된 값의 (최솟값, 최댓값).
    pub fn value_range(&self) -> Option<(f64, f64)> {
        match &self.data {
            SeriesData::Bars(bars) => bars.price_range(),
            SeriesData::Indicator(series) => series.value_range(),
            SeriesData::Constant { value } => Some((*value, *value)),
        }
    }
}

/// 시간 축을 공유하며 세로로 쌓이는 하위 플롯.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub name: String,
    /// 다른 패널과의 상대 높이
    pub height_ratio: f64,
    pub y_label: String,
    /// 고정 y 범위. `None`이면 데이터에 맞춤
    pub y_range: Option<(f64, f64)>,
    pub series: Vec<PlotSeries>,
}

impl Panel {
    pub fn new(name: impl Into<String>, height_ratio: f64) -> Self {
        Self {
            name: name.into(),
            height_ratio,
            y_label: String::new(),
            y_range: None,
            series: Vec::new(),
        }
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }

    pub fn push(mut self, series: PlotSeries) -> Self {
        self.series.push(series);
        self
    }

    /// 캔들스틱 시리즈 개수.
    pub fn candlestick_count(&self) -> usize {
        self.series
            .iter()
            .filter(|s| s.kind == SeriesKind::Candlestick)
            .count()
    }

    /// 라인 시리즈 개수.
    pub fn line_count(&self) -> usize {
        self.series.iter().filter(|s| s.kind == SeriesKind::Line).count()
    }

    /// 패널의 y 범위. 고정 범위가 없으면 모든 시리즈의 값 범위를 합칩니다.
    pub fn resolved_y_range(&self) -> Option<(f64, f64)> {
        self.y_range.or_else(|| {
            self.series
                .iter()
                .filter_map(PlotSeries::value_range)
                .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)))
        })
    }
}

/// 다중 패널 차트 명세.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_domain: XDomain,
    /// 위에서 아래 순서
    pub panels: Vec<Panel>,
    pub palette: Palette,
}

impl ChartSpec {
    /// 가격 패널 (인덱스 0).
    pub fn price_panel(&self) -> Option<&Panel> {
        self.panels.first()
    }

    /// 오실레이터 패널 (인덱스 1).
    pub fn oscillator_panel(&self) -> Option<&Panel> {
        self.panels.get(1)
    }

    /// 패널 높이 비율의 합.
    pub fn total_ratio(&self) -> f64 {
        self.panels.iter().map(|p| p.height_ratio).sum()
    }

    /// 가격 패널의 바 시리즈.
    pub fn bars(&self) -> Option<&BarSeries> {
        self.price_panel()?.series.iter().find_map(|s| match &s.data {
            SeriesData::Bars(bars) => Some(bars),
            _ => None,
        })
    }

    /// 구조 불변식을 검사합니다.
    ///
    /// - 패널이 하나 이상이고 높이 비율이 양의 유한수
    /// - 캔들스틱은 정확히 하나이며 패널 0에 있고 바 데이터를 가짐
    /// - 나머지는 모두 라인이며 지표 또는 상수 데이터를 가짐
    /// - 지표 시리즈는 x 축과 같은 길이
    /// - 불투명도는 [0, 1]
    pub fn validate(&self) -> ChartResult<()> {
        if self.panels.is_empty() {
            return Err(ChartError::InvalidLayout("패널이 없습니다".to_string()));
        }

        let mut candlesticks = 0usize;
        for (panel_index, panel) in self.panels.iter().enumerate() {
            if !(panel.height_ratio.is_finite() && panel.height_ratio > 0.0) {
                return Err(ChartError::InvalidLayout(format!(
                    "패널 '{}'의 높이 비율이 유효하지 않습니다: {}",
                    panel.name, panel.height_ratio
                )));
            }
            if let Some((min, max)) = panel.y_range {
                if !(min.is_finite() && max.is_finite() && min < max) {
                    return Err(ChartError::InvalidLayout(format!(
                        "패널 '{}'의 y 범위가 유효하지 않습니다: ({}, {})",
                        panel.name, min, max
                    )));
                }
            }

            for series in &panel.series {
                if !(0.0..=1.0).contains(&series.opacity) {
                    return Err(ChartError::InvalidLayout(format!(
                        "시리즈 '{}'의 불투명도가 범위를 벗어났습니다: {}",
                        series.label, series.opacity
                    )));
                }

                match (&series.kind, &series.data) {
                    (SeriesKind::Candlestick, SeriesData::Bars(bars)) => {
                        candlesticks += 1;
                        if panel_index != 0 {
                            return Err(ChartError::InvalidLayout(format!(
                                "캔들스틱 '{}'은 패널 0에 있어야 합니다 (현재 {})",
                                series.label, panel_index
                            )));
                        }
                        if bars.len() != self.x_domain.len {
                            return Err(ChartError::Misaligned {
                                series: series.label.clone(),
                                expected: self.x_domain.len,
                                actual: bars.len(),
                            });
                        }
                    }
                    (SeriesKind::Line, SeriesData::Indicator(indicator)) => {
                        if indicator.len() != self.x_domain.len {
                            return Err(ChartError::Misaligned {
                                series: series.label.clone(),
                                expected: self.x_domain.len,
                                actual: indicator.len(),
                            });
                        }
                    }
                    (SeriesKind::Line, SeriesData::Constant { value }) if value.is_finite() => {}
                    (kind, _) => {
                        return Err(ChartError::InvalidLayout(format!(
                            "시리즈 '{}'의 종류({:?})와 데이터가 맞지 않습니다",
                            series.label, kind
                        )));
                    }
                }
            }
        }

        if candlesticks != 1 {
            return Err(ChartError::InvalidLayout(format!(
                "캔들스틱 시리즈는 정확히 하나여야 합니다 (현재 {})",
                candlesticks
            )));
        }
        Ok(())
    }
}
