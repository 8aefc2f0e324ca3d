//! CLI 명령어 구현 모듈.

pub mod indicators;
pub mod render;

use std::sync::Arc;

use anyhow::Context;
use fxchart_api::{ChartService, ChartSettings};
use fxchart_core::{AppConfig, Timeframe};
use fxchart_feed::HttpOhlcSource;
use fxchart_render::PlottersRenderer;

/// 명령줄에서 덮어쓰는 데이터 소스 설정.
#[derive(Debug, Clone, Default)]
pub struct FeedOverrides {
    pub symbol: Option<String>,
    pub timeframe: Option<Timeframe>,
    pub count: Option<usize>,
}

impl FeedOverrides {
    /// 지정된 값만 설정에 반영합니다.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(symbol) = &self.symbol {
            config.feed.symbol = symbol.clone();
        }
        if let Some(timeframe) = self.timeframe {
            config.feed.timeframe = timeframe;
        }
        if let Some(count) = self.count {
            config.feed.count = count;
        }
    }
}

/// 설정으로 HTTP 소스와 plotters 렌더러를 사용하는 파이프라인을 만듭니다.
pub fn build_service(config: &AppConfig) -> anyhow::Result<ChartService> {
    config
        .validate()
        .context("Invalid configuration after command-line overrides")?;

    let source =
        HttpOhlcSource::from_feed_config(&config.feed).context("Failed to create data source")?;
    let renderer =
        PlottersRenderer::from_chart_config(&config.chart).context("Invalid chart size")?;
    let settings = ChartSettings::from_config(config)?;

    Ok(ChartService::new(
        Arc::new(source),
        Arc::new(renderer),
        settings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_only_touch_given_fields() {
        let mut config = AppConfig::default();
        FeedOverrides {
            symbol: Some("gbpusd".to_string()),
            timeframe: None,
            count: Some(300),
        }
        .apply(&mut config);

        assert_eq!(config.feed.symbol, "gbpusd");
        assert_eq!(config.feed.timeframe, Timeframe::H1);
        assert_eq!(config.feed.count, 300);
    }

    #[test]
    fn test_build_service_rejects_zero_count() {
        let mut config = AppConfig::default();
        FeedOverrides {
            count: Some(0),
            ..Default::default()
        }
        .apply(&mut config);

        assert!(build_service(&config).is_err());
    }

    #[test]
    fn test_build_service_normalizes_symbol() {
        let mut config = AppConfig::default();
        config.feed.symbol = "eur/usd".to_string();

        let service = build_service(&config).unwrap();
        assert_eq!(service.symbol().as_str(), "EURUSD");
    }
}
