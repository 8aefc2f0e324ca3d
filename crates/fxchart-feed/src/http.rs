//! reqwest 기반 OHLC HTTP 소스.
//!
//! `GET {base_url}/{symbol}?timeframe={tf}&count={count}` 요청으로
//! `[{time, open, high, low, close, volume}, ...]` 배열을 받습니다.

use async_trait::async_trait;
use fxchart_core::{BarSeries, FeedConfig, RawBar, Symbol, Timeframe};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::error::{FeedError, FeedResult};
use crate::source::OhlcDataSource;

/// 에러 메시지에 포함할 응답 본문 최대 길이.
const MAX_ERROR_BODY: usize = 512;

/// HTTP 소스 설정.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// API 기본 URL (심볼이 경로 끝에 붙음)
    pub base_url: String,
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    /// 요청할 바 개수
    pub count: usize,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl From<&FeedConfig> for HttpSourceConfig {
    fn from(config: &FeedConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            symbol: Symbol::new(&config.symbol),
            timeframe: config.timeframe,
            count: config.count,
            timeout_secs: config.timeout_secs,
        }
    }
}

impl HttpSourceConfig {
    /// 요청 URL을 구성합니다.
    pub fn request_url(&self) -> FeedResult<Url> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.symbol.as_str()
        );
        let mut url = Url::parse(&raw).map_err(|e| FeedError::InvalidUrl(format!("{}: {}", raw, e)))?;
        url.query_pairs_mut()
            .append_pair("timeframe", self.timeframe.feed_code())
            .append_pair("count", &self.count.to_string());
        Ok(url)
    }
}

/// 응답 본문. 배열 또는 `{"data": [...]}` 봉투를 허용합니다.
#[derive(Deserialize)]
#[serde(untagged)]
enum FeedBody {
    Records(Vec<RawBar>),
    Envelope { data: Vec<RawBar> },
}

impl FeedBody {
    fn into_records(self) -> Vec<RawBar> {
        match self {
            FeedBody::Records(records) | FeedBody::Envelope { data: records } => records,
        }
    }
}

/// HTTP OHLC 데이터 소스.
#[derive(Debug, Clone)]
pub struct HttpOhlcSource {
    config: HttpSourceConfig,
    client: Client,
}

impl HttpOhlcSource {
    /// 새 HTTP 소스 생성.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `FeedError::Network`를 반환합니다.
    pub fn new(config: HttpSourceConfig) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FeedError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { config, client })
    }

    /// 설정 파일의 feed 섹션으로 생성.
    pub fn from_feed_config(config: &FeedConfig) -> FeedResult<Self> {
        Self::new(HttpSourceConfig::from(config))
    }

    pub fn config(&self) -> &HttpSourceConfig {
        &self.config
    }

    /// 응답을 원시 레코드로 변환.
    async fn handle_response(&self, response: reqwest::Response) -> FeedResult<Vec<RawBar>> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<FeedBody>(&body)
                .map(FeedBody::into_records)
                .map_err(|e| {
                    error!(error = %e, body_len = body.len(), "Failed to parse OHLC response");
                    FeedError::Decode(e.to_string())
                })
        } else {
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            Err(FeedError::Status {
                code: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl OhlcDataSource for HttpOhlcSource {
    fn name(&self) -> &str {
        "http"
    }

    fn symbol(&self) -> &Symbol {
        &self.config.symbol
    }

    fn timeframe(&self) -> Timeframe {
        self.config.timeframe
    }

    async fn fetch_bars(&self) -> FeedResult<BarSeries> {
        let url = self.config.request_url()?;
        let started = Instant::now();
        debug!(url = %url, "Fetching OHLC data");

        let response = self.client.get(url).send().await?;
        let records = self.handle_response(response).await?;
        let series = BarSeries::from_records(&records)?;

        info!(
            symbol = %self.config.symbol.as_str(),
            timeframe = %self.config.timeframe,
            bars = series.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "OHLC data fetched"
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> HttpSourceConfig {
        HttpSourceConfig {
            base_url: base_url.to_string(),
            symbol: Symbol::new("EURUSD"),
            timeframe: Timeframe::H1,
            count: 100,
            timeout_secs: 10,
        }
    }

    #[test]
    fn test_request_url() {
        let url = config("https://eximus.net/api/api/v1/ohlc/").request_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://eximus.net/api/api/v1/ohlc/EURUSD?timeframe=H1&count=100"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            config("not a url").request_url(),
            Err(FeedError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_from_feed_config() {
        let feed = FeedConfig::default();
        let source = HttpOhlcSource::from_feed_config(&feed).unwrap();
        assert_eq!(source.symbol().as_str(), "EURUSD");
        assert_eq!(source.timeframe(), Timeframe::H1);
        assert_eq!(source.config().count, 100);
    }

    #[test]
    fn test_envelope_body() {
        let body = r#"{"data":[{"time":"2024-01-01","open":1,"high":1,"low":1,"close":1,"volume":0}]}"#;
        let records = serde_json::from_str::<FeedBody>(body).unwrap().into_records();
        assert_eq!(records.len(), 1);
    }
}
