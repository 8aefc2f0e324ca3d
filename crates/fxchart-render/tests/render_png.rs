//! ChartSpec → PNG 렌더링 테스트.

use fxchart_analytics::indicators::{EmaParams, IndicatorEngine, RsiParams};
use fxchart_analytics::{ChartSpec, ChartSpecBuilder, Palette};
use fxchart_core::{BarSeries, RawBar};
use fxchart_render::{ChartRenderer, PlottersRenderer, RenderError};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn sample_spec(n: usize, palette: Palette) -> ChartSpec {
    titled_spec(n, palette, "EUR/USD (H1)")
}

fn titled_spec(n: usize, palette: Palette, title: &str) -> ChartSpec {
    let records: Vec<RawBar> = (0..n)
        .map(|i| {
            let base = 1.08 + (i as f64 * 0.25).sin() * 0.004;
            let close = base + if i % 3 == 0 { -0.0006 } else { 0.0005 };
            RawBar::new(
                format!("2024-05-{:02}T{:02}:00:00Z", 1 + i / 24, i % 24),
                base,
                base.max(close) + 0.0004,
                base.min(close) - 0.0004,
                close,
                1000.0 + i as f64,
            )
        })
        .collect();
    let bars = BarSeries::from_records(&records).unwrap();

    let engine = IndicatorEngine::new();
    let overlays = vec![
        engine.ema_series(&bars, EmaParams { span: 20 }).unwrap(),
        engine.ema_series(&bars, EmaParams { span: 50 }).unwrap(),
    ];
    let rsi = engine.rsi_series(&bars, RsiParams::default()).unwrap();

    ChartSpecBuilder::new(palette)
        .title(title)
        .build(&bars, &overlays, &rsi)
        .unwrap()
}

#[test]
fn renders_png_with_requested_dimensions() {
    let renderer = PlottersRenderer::new(600, 400).unwrap();
    let png = renderer
        .render(&sample_spec(100, Palette::tradingview_light()))
        .unwrap();

    assert_eq!(&png[..8], &PNG_MAGIC);
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (600, 400));

    // 좌상단 모서리는 배경색
    let corner = decoded.to_rgb8().get_pixel(0, 0).0;
    assert_eq!(corner, [0xFF, 0xFF, 0xFF]);
}

#[test]
fn rendering_is_deterministic() {
    let renderer = PlottersRenderer::new(400, 300).unwrap();
    let spec = sample_spec(40, Palette::classic());
    assert_eq!(renderer.render(&spec).unwrap(), renderer.render(&spec).unwrap());
}

#[test]
fn title_text_reaches_the_image() {
    // 제목만 다른 두 명세는 다른 픽셀을 만들어야 함
    let renderer = PlottersRenderer::new(400, 300).unwrap();
    let eur = renderer
        .render(&titled_spec(40, Palette::tradingview_light(), "EUR/USD (H1)"))
        .unwrap();
    let gbp = renderer
        .render(&titled_spec(40, Palette::tradingview_light(), "GBP/JPY (M15)"))
        .unwrap();

    let eur = image::load_from_memory(&eur).unwrap().to_rgb8();
    let gbp = image::load_from_memory(&gbp).unwrap().to_rgb8();
    assert_ne!(eur.as_raw(), gbp.as_raw());
}

#[test]
fn renders_short_series_with_rsi_gap_only() {
    // RSI가 전부 정의되지 않는 길이
    let renderer = PlottersRenderer::new(400, 300).unwrap();
    let spec = sample_spec(5, Palette::tradingview_light());
    assert_eq!(spec.oscillator_panel().unwrap().series[0].value_range(), None);

    let png = renderer.render(&spec).unwrap();
    assert_eq!(&png[..8], &PNG_MAGIC);
}

#[test]
fn renders_single_bar() {
    let renderer = PlottersRenderer::new(300, 200).unwrap();
    let png = renderer
        .render(&sample_spec(1, Palette::tradingview_light()))
        .unwrap();
    assert_eq!(&png[..8], &PNG_MAGIC);
}

#[test]
fn invalid_spec_is_rejected_before_drawing() {
    let mut spec = sample_spec(20, Palette::tradingview_light());
    spec.panels.swap(0, 1);

    let renderer = PlottersRenderer::new(300, 200).unwrap();
    assert!(matches!(
        renderer.render(&spec),
        Err(RenderError::InvalidSpec(_))
    ));
}
