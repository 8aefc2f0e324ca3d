//! 차트 생성 파이프라인.
//!
//! fetch → 지표 계산 → 차트 명세 → 렌더링 → base64 인코딩을 순서대로 실행합니다.
//! 요청마다 새 `BarSeries`/`IndicatorSeries`/`ChartSpec`을 만들며 요청 간 공유 상태는 없습니다.

use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use fxchart_analytics::{ChartSpec, ChartSpecBuilder, EmaParams, IndicatorEngine, Palette, RsiParams};
use fxchart_core::{chart_span, AppConfig, BarSeries, IndicatorSeries, Symbol, Timeframe};
use fxchart_feed::OhlcDataSource;
use fxchart_render::ChartRenderer;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn, Instrument};

use crate::error::{PipelineError, PipelineResult};

/// 파이프라인 설정.
#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub rsi: RsiParams,
    pub ema_fast: EmaParams,
    pub ema_slow: EmaParams,
    pub overbought: f64,
    pub oversold: f64,
    pub palette: Palette,
    /// 데이터 소스 응답 기한
    pub fetch_timeout: Duration,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            rsi: RsiParams::default(),
            ema_fast: EmaParams { span: 20 },
            ema_slow: EmaParams { span: 50 },
            overbought: 70.0,
            oversold: 30.0,
            palette: Palette::default(),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl ChartSettings {
    /// 애플리케이션 설정에서 생성합니다.
    pub fn from_config(config: &AppConfig) -> PipelineResult<Self> {
        let chart = &config.chart;
        let palette = chart.palette.parse::<Palette>().map_err(PipelineError::Config)?;

        Ok(Self {
            rsi: RsiParams {
                period: chart.rsi_period,
            },
            ema_fast: EmaParams {
                span: chart.ema_fast,
            },
            ema_slow: EmaParams {
                span: chart.ema_slow,
            },
            overbought: chart.overbought,
            oversold: chart.oversold,
            palette,
            fetch_timeout: Duration::from_secs(config.feed.timeout_secs),
        })
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

/// 바 시리즈와 계산된 지표.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub bars: BarSeries,
    /// EMA 오버레이 (단기, 장기 순)
    pub overlays: Vec<IndicatorSeries>,
    pub rsi: IndicatorSeries,
}

/// 렌더링된 차트.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    /// 인코딩된 이미지 바이트
    pub image: Vec<u8>,
    pub content_type: &'static str,
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    pub bars: usize,
    pub generated_at: DateTime<Utc>,
}

/// 성공 응답의 `data` 필드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPayload {
    /// base64 인코딩된 PNG
    pub image: String,
    /// 생성 시각 (ISO-8601)
    pub timestamp: DateTime<Utc>,
    /// 심볼 코드 (예: "EURUSD")
    pub symbol: String,
    /// 요청에 사용한 타임프레임 코드 (예: "H1")
    pub timeframe: String,
}

impl From<&RenderedChart> for ChartPayload {
    fn from(chart: &RenderedChart) -> Self {
        Self {
            image: STANDARD.encode(&chart.image),
            timestamp: chart.generated_at,
            symbol: chart.symbol.as_str().to_string(),
            timeframe: chart.timeframe.to_string(),
        }
    }
}

/// 차트 생성 서비스.
///
/// 데이터 소스와 렌더러는 생성 시점에 주입됩니다.
pub struct ChartService {
    source: Arc<dyn OhlcDataSource>,
    renderer: Arc<dyn ChartRenderer>,
    engine: IndicatorEngine,
    settings: ChartSettings,
}

impl ChartService {
    pub fn new(
        source: Arc<dyn OhlcDataSource>,
        renderer: Arc<dyn ChartRenderer>,
        settings: ChartSettings,
    ) -> Self {
        Self {
            source,
            renderer,
            engine: IndicatorEngine::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn symbol(&self) -> &Symbol {
        self.source.symbol()
    }

    pub fn timeframe(&self) -> Timeframe {
        self.source.timeframe()
    }

    /// 기한 안에 바 시리즈를 가져옵니다.
    pub async fn fetch(&self) -> PipelineResult<BarSeries> {
        let deadline = self.settings.fetch_timeout;
        match tokio::time::timeout(deadline, self.source.fetch_bars()).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!(
                    source = self.source.name(),
                    timeout_secs = deadline.as_secs_f64(),
                    "Data source deadline exceeded"
                );
                Err(PipelineError::Timeout(deadline))
            }
        }
    }

    /// 바 시리즈에서 RSI와 EMA 오버레이를 계산합니다.
    pub fn compute_indicators(&self, bars: BarSeries) -> PipelineResult<ChartData> {
        let rsi = self.engine.rsi_series(&bars, self.settings.rsi)?;
        let overlays = vec![
            self.engine.ema_series(&bars, self.settings.ema_fast)?,
            self.engine.ema_series(&bars, self.settings.ema_slow)?,
        ];

        debug!(
            bars = bars.len(),
            rsi_defined = rsi.defined_count(),
            "Indicators computed"
        );

        Ok(ChartData {
            bars,
            overlays,
            rsi,
        })
    }

    /// fetch 후 지표까지 계산합니다.
    pub async fn load(&self) -> PipelineResult<ChartData> {
        let bars = self.fetch().await?;
        self.compute_indicators(bars)
    }

    /// 2패널 차트 명세를 조립합니다.
    pub fn build_spec(&self, data: &ChartData) -> PipelineResult<ChartSpec> {
        let title = self.symbol().title_for(self.timeframe());
        let spec = ChartSpecBuilder::new(self.settings.palette)
            .title(title)
            .thresholds(self.settings.overbought, self.settings.oversold)
            .build(&data.bars, &data.overlays, &data.rsi)?;
        Ok(spec)
    }

    /// 전체 파이프라인을 실행해 이미지 바이트를 얻습니다.
    ///
    /// 렌더링은 CPU 작업이므로 blocking 스레드에서 실행합니다.
    pub async fn render(&self) -> PipelineResult<RenderedChart> {
        let span = chart_span!("chart_pipeline", self.symbol(), self.timeframe());
        self.run_pipeline().instrument(span).await
    }

    async fn run_pipeline(&self) -> PipelineResult<RenderedChart> {
        let started = Instant::now();
        let data = self.load().await?;
        let spec = self.build_spec(&data)?;
        let bars = data.bars.len();

        let renderer = Arc::clone(&self.renderer);
        let image = tokio::task::spawn_blocking(move || renderer.render(&spec))
            .await
            .map_err(|e| PipelineError::Join(e.to_string()))??;

        info!(
            symbol = %self.symbol(),
            timeframe = %self.timeframe(),
            bars,
            bytes = image.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Chart rendered"
        );

        Ok(RenderedChart {
            image,
            content_type: self.renderer.content_type(),
            symbol: self.symbol().clone(),
            timeframe: self.timeframe(),
            bars,
            generated_at: Utc::now(),
        })
    }

    /// 응답용 페이로드를 생성합니다.
    pub async fn generate(&self) -> PipelineResult<ChartPayload> {
        let chart = self.render().await?;
        Ok(ChartPayload::from(&chart))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fxchart_core::RawBar;
    use fxchart_feed::StaticOhlcSource;
    use fxchart_render::{RenderError, RenderResult};

    struct EchoRenderer;

    impl ChartRenderer for EchoRenderer {
        fn render(&self, spec: &ChartSpec) -> RenderResult<Vec<u8>> {
            Ok(spec.title.clone().into_bytes())
        }
    }

    struct FailingRenderer;

    impl ChartRenderer for FailingRenderer {
        fn render(&self, _spec: &ChartSpec) -> RenderResult<Vec<u8>> {
            Err(RenderError::Encoding {
                message: "disk full".to_string(),
            })
        }
    }

    fn records(n: usize) -> Vec<RawBar> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let close = 1.1 + (i as f64 * 0.7).sin() * 0.01;
                RawBar::new(
                    (start + chrono::Duration::hours(i as i64)).to_rfc3339(),
                    close,
                    close + 0.002,
                    close - 0.002,
                    close,
                    100.0,
                )
            })
            .collect()
    }

    fn service(renderer: Arc<dyn ChartRenderer>, records: Vec<RawBar>) -> ChartService {
        let source = StaticOhlcSource::new(Symbol::new("EURUSD"), Timeframe::H1, records);
        ChartService::new(Arc::new(source), renderer, ChartSettings::default())
    }

    #[tokio::test]
    async fn test_generate_uses_symbol_and_timeframe_consistently() {
        let service = service(Arc::new(EchoRenderer), records(24));
        let payload = service.generate().await.unwrap();

        assert_eq!(payload.symbol, "EURUSD");
        assert_eq!(payload.timeframe, "H1");
        let title = STANDARD.decode(&payload.image).unwrap();
        assert_eq!(String::from_utf8(title).unwrap(), "EUR/USD (H1)");
    }

    #[tokio::test]
    async fn test_indicators_are_aligned_with_bars() {
        let service = service(Arc::new(EchoRenderer), records(24));
        let data = service.load().await.unwrap();

        assert_eq!(data.bars.len(), 24);
        assert_eq!(data.overlays.len(), 2);
        assert_eq!(data.overlays[0].name(), "EMA20");
        assert_eq!(data.overlays[1].name(), "EMA50");
        assert!(data.overlays.iter().all(|s| s.is_aligned_with(&data.bars)));
        assert!(data.rsi.is_aligned_with(&data.bars));
        assert_eq!(data.rsi.defined_count(), 24 - 14);
    }

    #[tokio::test]
    async fn test_empty_feed_is_empty_series() {
        let service = service(Arc::new(EchoRenderer), Vec::new());
        let err = service.generate().await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Chart(fxchart_analytics::ChartError::EmptySeries)
        ));
    }

    #[tokio::test]
    async fn test_render_failure_propagates() {
        let service = service(Arc::new(FailingRenderer), records(24));
        let err = service.generate().await.unwrap_err();
        assert!(matches!(err, PipelineError::Render(_)));
        assert!(err.is_internal());
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = AppConfig::default();
        config.chart.palette = "classic".to_string();
        config.feed.timeout_secs = 3;

        let settings = ChartSettings::from_config(&config).unwrap();
        assert_eq!(settings.palette, Palette::classic());
        assert_eq!(settings.fetch_timeout, Duration::from_secs(3));
        assert_eq!(settings.ema_slow.span, 50);

        config.chart.palette = "neon".to_string();
        assert!(matches!(
            ChartSettings::from_config(&config),
            Err(PipelineError::Config(_))
        ));
    }
}
