//! # FX Chart Feed
//!
//! OHLC 바 데이터 소스.
//!
//! - [`OhlcDataSource`]: 파이프라인이 의존하는 데이터 소스 인터페이스
//! - [`HttpOhlcSource`]: reqwest 기반 HTTP 소스
//! - [`StaticOhlcSource`]: 테스트와 오프라인 실행용 메모리 소스

pub mod error;
pub mod http;
pub mod source;
pub mod static_source;

pub use error::{FeedError, FeedResult};
pub use http::{HttpOhlcSource, HttpSourceConfig};
pub use source::OhlcDataSource;
pub use static_source::StaticOhlcSource;
