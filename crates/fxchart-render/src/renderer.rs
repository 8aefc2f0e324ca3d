//! plotters 기반 PNG 렌더러.

use fxchart_analytics::{ChartSpec, LineStyle, Panel, SeriesColor, SeriesData, SeriesKind};
use fxchart_core::ChartConfig;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::io::Cursor;
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::layout::{
    candle_width, line_segments, padded_y_range, panel_heights, x_range, PANEL_MARGIN,
    TITLE_HEIGHT, X_LABEL_AREA, Y_LABEL_AREA,
};
use crate::style::{candle_style, grid_style, line_style, rgb};

/// PNG 이미지의 MIME 타입.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// 최소 이미지 크기 (픽셀).
const MIN_DIMENSION: u32 = 100;

/// `ChartSpec`을 인코딩된 이미지로 변환하는 렌더러.
///
/// 같은 명세에 대해 항상 같은 바이트를 반환해야 합니다.
pub trait ChartRenderer: Send + Sync {
    /// 차트를 그려 인코딩된 이미지 바이트를 반환합니다.
    fn render(&self, spec: &ChartSpec) -> RenderResult<Vec<u8>>;

    /// 반환하는 이미지의 MIME 타입.
    fn content_type(&self) -> &'static str {
        PNG_CONTENT_TYPE
    }
}

/// 비트맵 버퍼에 그린 뒤 PNG로 인코딩하는 렌더러.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlottersRenderer {
    width: u32,
    height: u32,
}

impl PlottersRenderer {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// 설정 파일의 chart 섹션으로 생성.
    pub fn from_chart_config(config: &ChartConfig) -> RenderResult<Self> {
        Self::new(config.width, config.height)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        spec: &ChartSpec,
    ) -> RenderResult<()>
    where
        DB::ErrorType: 'static,
    {
        let palette = &spec.palette;
        root.fill(&rgb(palette.background))?;

        let body = if spec.title.is_empty() {
            root.clone()
        } else {
            let (title_area, body) = root.split_vertically(TITLE_HEIGHT as i32);
            title_area.draw_text(
                &spec.title,
                &("sans-serif", 20).into_font().color(&rgb(palette.text)),
                (PANEL_MARGIN as i32, (TITLE_HEIGHT / 4) as i32),
            )?;
            body
        };

        let ratios: Vec<f64> = spec.panels.iter().map(|p| p.height_ratio).collect();
        let heights = panel_heights(body.dim_in_pixel().1, &ratios);

        let mut remaining = body;
        let last = spec.panels.len().saturating_sub(1);
        for (index, (panel, height)) in spec.panels.iter().zip(heights).enumerate() {
            let area = if index == last {
                remaining.clone()
            } else {
                let (top, rest) = remaining.split_vertically(height as i32);
                remaining = rest;
                top
            };
            self.draw_panel(&area, spec, panel, index == last)?;
        }

        Ok(())
    }

    fn draw_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        spec: &ChartSpec,
        panel: &Panel,
        show_time_axis: bool,
    ) -> RenderResult<()>
    where
        DB::ErrorType: 'static,
    {
        let palette = &spec.palette;
        let y_range = match panel.y_range {
            Some((min, max)) => min..max,
            None => {
                let (min, max) = panel.resolved_y_range().unwrap_or((0.0, 1.0));
                padded_y_range(min, max)
            }
        };

        let mut chart = ChartBuilder::on(area)
            .margin(PANEL_MARGIN as i32)
            .set_label_area_size(LabelAreaPosition::Right, Y_LABEL_AREA as i32)
            .set_label_area_size(
                LabelAreaPosition::Bottom,
                if show_time_axis { X_LABEL_AREA as i32 } else { 0 },
            )
            .build_cartesian_2d(x_range(&spec.x_domain), y_range)?;

        let timestamps = spec.bars().map(|bars| bars.timestamps()).unwrap_or_default();
        let time_label = |x: &f64| {
            let index = x.round();
            if index < 0.0 {
                return String::new();
            }
            timestamps
                .get(index as usize)
                .map(|ts| ts.format("%m-%d %H:%M").to_string())
                .unwrap_or_default()
        };
        let price_label = |y: &f64| format!("{:.5}", y);
        let oscillator_label = |y: &f64| format!("{:.0}", y);

        let label_style = ("sans-serif", 12).into_font().color(&rgb(palette.text));
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(grid_style(palette.grid))
            .bold_line_style(grid_style(palette.grid))
            .axis_style(rgb(palette.border).stroke_width(1))
            .label_style(label_style)
            .x_labels(8)
            .y_labels(6)
            .x_label_formatter(&time_label)
            .y_desc(panel.y_label.as_str());
        if panel.y_range.is_some() {
            mesh.y_label_formatter(&oscillator_label);
        } else {
            mesh.y_label_formatter(&price_label);
        }
        mesh.draw()?;

        let plot_width = chart.plotting_area().dim_in_pixel().0;
        for series in &panel.series {
            match (series.kind, &series.data, series.color) {
                (SeriesKind::Candlestick, SeriesData::Bars(bars), SeriesColor::UpDown { up, down }) => {
                    let width = candle_width(plot_width, bars.len());
                    let up = candle_style(up, series.opacity);
                    let down = candle_style(down, series.opacity);
                    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
                        CandleStick::new(
                            i as f64, bar.open, bar.high, bar.low, bar.close, up, down, width,
                        )
                    }))?;
                }
                (SeriesKind::Line, _, _) => {
                    let style = line_style(series);
                    for segment in line_segments(series, &spec.x_domain) {
                        if segment.len() == 1 {
                            chart.draw_series(
                                segment
                                    .into_iter()
                                    .map(|point| Circle::new(point, 1, style.filled())),
                            )?;
                            continue;
                        }
                        match series.style {
                            LineStyle::Solid => {
                                chart.draw_series(LineSeries::new(segment, style))?;
                            }
                            LineStyle::Dashed => {
                                chart.draw_series(DashedLineSeries::new(segment, 6, 4, style))?;
                            }
                        }
                    }
                }
                // 검증된 명세에서는 도달하지 않음
                _ => {
                    return Err(RenderError::Drawing {
                        message: format!("unsupported series '{}'", series.label),
                    })
                }
            }
        }

        Ok(())
    }

    fn encode_png(&self, buffer: Vec<u8>) -> RenderResult<Vec<u8>> {
        let image = RgbImage::from_raw(self.width, self.height, buffer).ok_or_else(|| {
            RenderError::Encoding {
                message: "bitmap buffer size does not match image dimensions".to_string(),
            }
        })?;
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, spec: &ChartSpec) -> RenderResult<Vec<u8>> {
        spec.validate()?;

        let mut buffer = vec![0u8; (self.width as usize) * (self.height as usize) * 3];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (self.width, self.height)).into_drawing_area();
            self.draw(&root, spec)?;
            root.present()?;
        }

        let png = self.encode_png(buffer)?;
        debug!(
            width = self.width,
            height = self.height,
            panels = spec.panels.len(),
            bytes = png.len(),
            "chart rendered"
        );
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_tiny_canvas() {
        assert!(matches!(
            PlottersRenderer::new(10, 500),
            Err(RenderError::InvalidDimensions { width: 10, .. })
        ));
    }

    #[test]
    fn test_from_chart_config() {
        let renderer = PlottersRenderer::from_chart_config(&ChartConfig::default()).unwrap();
        assert_eq!(renderer.dimensions(), (1500, 1000));
        assert_eq!(renderer.content_type(), "image/png");
    }
}
