//! 렌더링 에러 타입.

use fxchart_analytics::ChartError;
use thiserror::Error;

/// 렌더링 결과 타입.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// 렌더링 중 발생할 수 있는 에러.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid chart spec: {0}")]
    InvalidSpec(#[from] ChartError),

    #[error("Chart rendering failed: {message}")]
    Drawing { message: String },

    #[error("Image encoding failed: {message}")]
    Encoding { message: String },
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Encoding {
            message: err.to_string(),
        }
    }
}

impl<T: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<T>>
    for RenderError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        RenderError::Drawing {
            message: format!("Drawing area error: {}", err),
        }
    }
}
