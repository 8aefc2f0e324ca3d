//! 데이터 소스 인터페이스.

use async_trait::async_trait;
use fxchart_core::{BarSeries, Symbol, Timeframe};

use crate::error::FeedResult;

/// 시간 순서의 OHLC 바를 반환하는 데이터 소스.
///
/// 구현체는 요청마다 새 `BarSeries`를 반환하며 호출 간 상태를 공유하지 않습니다.
/// 재시도는 하지 않습니다.
#[async_trait]
pub trait OhlcDataSource: Send + Sync {
    /// 로그에 쓰이는 소스 이름.
    fn name(&self) -> &str;

    /// 요청하는 심볼.
    fn symbol(&self) -> &Symbol;

    /// 요청하는 타임프레임.
    fn timeframe(&self) -> Timeframe;

    /// 바를 가져와 검증된 시리즈로 반환합니다.
    async fn fetch_bars(&self) -> FeedResult<BarSeries>;
}
