//! 메모리 기반 데이터 소스.

use async_trait::async_trait;
use fxchart_core::{BarSeries, RawBar, Symbol, Timeframe};
use std::time::Duration;

use crate::error::{FeedError, FeedResult};
use crate::source::OhlcDataSource;

/// 미리 정해진 레코드(또는 에러)를 반환하는 데이터 소스.
///
/// 호출마다 레코드를 다시 검증하므로 HTTP 소스와 같은 에러를 냅니다.
#[derive(Debug, Clone)]
pub struct StaticOhlcSource {
    symbol: Symbol,
    timeframe: Timeframe,
    response: Result<Vec<RawBar>, FeedError>,
    delay: Option<Duration>,
}

impl StaticOhlcSource {
    pub fn new(symbol: Symbol, timeframe: Timeframe, records: Vec<RawBar>) -> Self {
        Self {
            symbol,
            timeframe,
            response: Ok(records),
            delay: None,
        }
    }

    /// 항상 주어진 에러를 반환하는 소스.
    pub fn failing(symbol: Symbol, timeframe: Timeframe, error: FeedError) -> Self {
        Self {
            symbol,
            timeframe,
            response: Err(error),
            delay: None,
        }
    }

    /// 응답 전에 대기할 시간.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl OhlcDataSource for StaticOhlcSource {
    fn name(&self) -> &str {
        "static"
    }

    fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    async fn fetch_bars(&self) -> FeedResult<BarSeries> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.response {
            Ok(records) => Ok(BarSeries::from_records(records)?),
            Err(err) => Err(err.clone()),
        }
    }
}
