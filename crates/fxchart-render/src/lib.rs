//! # FX Chart Render
//!
//! [`ChartSpec`](fxchart_analytics::ChartSpec)을 PNG 이미지로 그립니다.
//!
//! - `renderer`: [`ChartRenderer`] 인터페이스와 plotters 기반 [`PlottersRenderer`]
//! - `layout`: 패널 높이 분배, 축 범위, 결측 구간 분할
//! - `style`: 팔레트 색상을 plotters 스타일로 변환
//! - `error`: 렌더링 에러 타입

pub mod error;
pub mod layout;
pub mod renderer;
pub mod style;

pub use error::{RenderError, RenderResult};
pub use renderer::{ChartRenderer, PlottersRenderer, PNG_CONTENT_TYPE};
