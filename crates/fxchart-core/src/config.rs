//! 설정 관리.
//!
//! 데이터 URL, 색상 팔레트 같은 값은 전역 상수가 아니라 생성 시점에 주입되는 설정입니다.
//! 로드 순서: 기본값 → TOML 파일(선택) → `FXCHART__` 접두사 환경 변수.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::logging::LogFormat;
use crate::types::Timeframe;

/// 설정 파일 경로를 지정하는 환경 변수.
pub const CONFIG_PATH_ENV: &str = "FXCHART_CONFIG";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터 소스 설정
    pub feed: FeedConfig,
    /// 차트 구성 설정
    pub chart: ChartConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// OHLC 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    /// OHLC API 기본 URL (심볼이 경로 끝에 붙음)
    pub base_url: String,
    /// 거래 심볼 (예: "EURUSD")
    pub symbol: String,
    /// 타임프레임
    pub timeframe: Timeframe,
    /// 요청할 바 개수
    pub count: usize,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://eximus.net/api/api/v1/ohlc".to_string(),
            symbol: "EURUSD".to_string(),
            timeframe: Timeframe::H1,
            count: 100,
            timeout_secs: 10,
        }
    }
}

/// 차트 구성 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    /// 이미지 너비 (픽셀)
    pub width: u32,
    /// 이미지 높이 (픽셀)
    pub height: u32,
    /// RSI 기간
    pub rsi_period: usize,
    /// 단기 EMA span
    pub ema_fast: usize,
    /// 장기 EMA span
    pub ema_slow: usize,
    /// 과매수 기준선
    pub overbought: f64,
    /// 과매도 기준선
    pub oversold: f64,
    /// 색상 팔레트 이름 ("tradingview_light" | "classic")
    pub palette: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1000,
            rsi_period: 14,
            ema_fast: 20,
            ema_slow: 50,
            overbought: 70.0,
            oversold: 30.0,
            palette: "tradingview_light".to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("FXCHART")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// `FXCHART_CONFIG` 또는 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// 설정 값의 범위를 검증합니다.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let chart = &self.chart;
        if chart.rsi_period == 0 || chart.ema_fast == 0 || chart.ema_slow == 0 {
            return Err(config::ConfigError::Message(
                "chart.rsi_period, chart.ema_fast, chart.ema_slow는 0보다 커야 합니다".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&chart.oversold)
            || !(0.0..=100.0).contains(&chart.overbought)
            || chart.oversold >= chart.overbought
        {
            return Err(config::ConfigError::Message(format!(
                "RSI 기준선이 유효하지 않습니다: oversold={}, overbought={}",
                chart.oversold, chart.overbought
            )));
        }
        if chart.width < 200 || chart.height < 200 {
            return Err(config::ConfigError::Message(format!(
                "차트 크기가 너무 작습니다: {}x{}",
                chart.width, chart.height
            )));
        }
        if self.feed.count == 0 {
            return Err(config::ConfigError::Message(
                "feed.count는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.feed.timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "feed.timeout_secs는 0보다 커야 합니다".to_string(),
            ));
        }
        self.logging
            .format
            .parse::<LogFormat>()
            .map_err(config::ConfigError::Message)?;
        Ok(())
    }
}
