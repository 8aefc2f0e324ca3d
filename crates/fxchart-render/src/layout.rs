//! 차트 레이아웃 계산.
//!
//! 그리기 호출과 분리된 순수 함수들입니다.

use fxchart_analytics::{PlotSeries, SeriesData, XDomain};

/// 제목 영역 높이 (픽셀).
pub const TITLE_HEIGHT: u32 = 40;
/// 패널 바깥 여백 (픽셀).
pub const PANEL_MARGIN: u32 = 8;
/// 오른쪽 가격 축 라벨 영역 너비 (픽셀).
pub const Y_LABEL_AREA: u32 = 72;
/// 맨 아래 패널의 시간 축 라벨 영역 높이 (픽셀).
pub const X_LABEL_AREA: u32 = 32;
/// 포인트 → 픽셀 배율 (100 dpi).
pub const PX_PER_POINT: f64 = 100.0 / 72.0;

/// 높이 비율에 따라 전체 높이를 패널별로 나눕니다.
///
/// 반올림 오차는 마지막 패널이 흡수하므로 합은 항상 `total`입니다.
pub fn panel_heights(total: u32, ratios: &[f64]) -> Vec<u32> {
    let sum: f64 = ratios.iter().sum();
    if ratios.is_empty() || sum <= 0.0 {
        return Vec::new();
    }

    let mut heights: Vec<u32> = ratios
        .iter()
        .map(|r| ((total as f64) * r / sum).floor() as u32)
        .collect();
    let assigned: u32 = heights.iter().sum();
    if let Some(last) = heights.last_mut() {
        *last += total.saturating_sub(assigned);
    }
    heights
}

/// 공유 x 축 범위. 바 인덱스 `i`가 좌표 `i`에 놓입니다.
pub fn x_range(domain: &XDomain) -> std::ops::Range<f64> {
    -0.5..(domain.len as f64 - 0.5)
}

/// 데이터 범위에 여백을 더한 y 축 범위.
pub fn padded_y_range(min: f64, max: f64) -> std::ops::Range<f64> {
    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (min.abs() * 0.01).max(1e-6)
    };
    (min - pad)..(max + pad)
}

/// 캔들 몸통 너비 (픽셀). 바 간격의 70%, 최소 1.
pub fn candle_width(plot_width: u32, bars: usize) -> u32 {
    if bars == 0 {
        return 1;
    }
    ((plot_width as f64 / bars as f64) * 0.7).floor().max(1.0) as u32
}

/// 선 두께 (포인트 → 픽셀, 최소 1).
pub fn stroke_px(width_pt: f64) -> u32 {
    (width_pt * PX_PER_POINT).round().max(1.0) as u32
}

/// 라인 시리즈를 정의된 값의 연속 구간으로 나눕니다.
///
/// 정의되지 않은 값은 구간을 끊어 간격으로 그려지게 합니다.
/// 상수 라인은 x 축 전체에 걸친 한 구간입니다.
pub fn line_segments(series: &PlotSeries, domain: &XDomain) -> Vec<Vec<(f64, f64)>> {
    match &series.data {
        SeriesData::Indicator(indicator) => {
            let mut segments = Vec::new();
            let mut current = Vec::new();
            for (i, point) in indicator.points().iter().enumerate() {
                match point.value {
                    Some(v) => current.push((i as f64, v)),
                    None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                    None => {}
                }
            }
            if !current.is_empty() {
                segments.push(current);
            }
            segments
        }
        SeriesData::Constant { value } => {
            let range = x_range(domain);
            vec![vec![(range.start, *value), (range.end, *value)]]
        }
        SeriesData::Bars(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fxchart_analytics::Rgb;
    use fxchart_core::{BarSeries, IndicatorSeries, RawBar};

    fn bars(n: usize) -> BarSeries {
        let records: Vec<RawBar> = (0..n)
            .map(|i| RawBar::new(format!("2024-01-01T{:02}:00:00Z", i), 1.0, 1.0, 1.0, 1.0, 0.0))
            .collect();
        BarSeries::from_records(&records).unwrap()
    }

    #[test]
    fn test_panel_heights_follow_ratios() {
        assert_eq!(panel_heights(900, &[2.0, 1.0]), vec![600, 300]);
        let heights = panel_heights(1000, &[2.0, 1.0]);
        assert_eq!(heights, vec![666, 334]);
        assert_eq!(heights.iter().sum::<u32>(), 1000);
        assert!(panel_heights(100, &[]).is_empty());
    }

    #[test]
    fn test_padded_range() {
        let r = padded_y_range(0.0, 100.0);
        assert_eq!(r, -5.0..105.0);
        let flat = padded_y_range(1.1, 1.1);
        assert!(flat.start < 1.1 && flat.end > 1.1);
    }

    #[test]
    fn test_candle_and_stroke_sizes() {
        assert_eq!(candle_width(1000, 100), 7);
        assert_eq!(candle_width(10, 100), 1);
        assert_eq!(stroke_px(0.8), 1);
        assert_eq!(stroke_px(2.0), 3);
    }

    #[test]
    fn test_segments_split_on_gaps() {
        let bars = bars(6);
        let indicator = IndicatorSeries::from_values(
            "RSI",
            &bars,
            vec![None, Some(1.0), Some(2.0), None, Some(3.0), Some(4.0)],
        );
        let domain = XDomain {
            start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap(),
            len: 6,
        };
        let series = PlotSeries::line(indicator, Rgb(0, 0, 0));
        let segments = line_segments(&series, &domain);
        assert_eq!(
            segments,
            vec![vec![(1.0, 1.0), (2.0, 2.0)], vec![(4.0, 3.0), (5.0, 4.0)]]
        );

        let constant = PlotSeries::constant_line("overbought", 70.0, Rgb(0, 0, 0));
        assert_eq!(
            line_segments(&constant, &domain),
            vec![vec![(-0.5, 70.0), (5.5, 70.0)]]
        );
    }
}
