//! 차트 파이프라인 CLI 도구.
//!
//! - `render`: 차트를 한 번 생성해 PNG/base64 파일로 저장하고 선택적으로 업로드
//! - `indicators`: 최근 바와 EMA/RSI 값을 표로 출력

pub mod commands;
