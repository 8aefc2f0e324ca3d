//! 차트 구성 모델.
//!
//! 그리기 호출 대신 선언적인 [`ChartSpec`]을 만들어 렌더러에 넘깁니다.
//! 명세는 그리기 코드 없이 단위 테스트할 수 있습니다.

mod builder;
mod spec;
mod style;

use thiserror::Error;

pub use builder::{ChartSpecBuilder, OSCILLATOR_PANEL_RATIO, PRICE_PANEL_RATIO, THRESHOLD_OPACITY};
pub use spec::{ChartSpec, Panel, PlotSeries, SeriesData, SeriesKind, XDomain};
pub use style::{LineStyle, Palette, Rgb, SeriesColor};

/// 차트 구성 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// 차트로 그릴 바가 없음
    #[error("빈 바 시리즈는 차트로 그릴 수 없습니다")]
    EmptySeries,

    /// 지표 시리즈가 바 시리즈와 정렬되지 않음
    #[error("시리즈 '{series}' 정렬 불일치: 바 {expected}개, 값 {actual}개")]
    Misaligned {
        series: String,
        expected: usize,
        actual: usize,
    },

    /// 구조 불변식 위반
    #[error("잘못된 차트 구성: {0}")]
    InvalidLayout(String),
}

/// 차트 구성 결과 타입.
pub type ChartResult<T> = Result<T, ChartError>;
