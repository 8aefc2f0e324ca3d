//! 서버와 CLI 공용 로깅 초기화.
//!
//! `[logging]` 설정 섹션의 레벨과 형식으로 tracing subscriber를 구성합니다.
//! `RUST_LOG`가 있으면 설정 파일의 레벨보다 우선합니다.

use tracing_subscriber::{
    filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

use crate::config::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 여러 줄, 색상 포함 (개발용)
    #[default]
    Pretty,
    /// 줄 단위 JSON (로그 수집용)
    Json,
    /// 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    fn layer(self) -> Box<dyn Layer<Registry> + Send + Sync> {
        match self {
            Self::Pretty => fmt::layer().pretty().boxed(),
            Self::Json => fmt::layer().json().boxed(),
            Self::Compact => fmt::layer().compact().boxed(),
        }
    }
}

/// 레벨 지시문(예: `"info"`, `"fxchart_api=debug,info"`)으로 필터를 만듭니다.
pub fn build_filter(level: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(level)
}

/// 전역 subscriber를 설치합니다.
///
/// 알 수 없는 형식, 잘못된 레벨 지시문, 이미 설치된 subscriber는 오류입니다.
///
/// ```no_run
/// use fxchart_core::{init_logging, LoggingConfig};
///
/// let config = LoggingConfig {
///     level: "fxchart_api=debug,info".to_string(),
///     format: "json".to_string(),
/// };
/// init_logging(&config).unwrap();
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let format: LogFormat = config.format.parse()?;
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.level)?,
    };

    tracing_subscriber::registry()
        .with(format.layer())
        .with(filter)
        .try_init()?;

    tracing::info!(format = ?format, level = %config.level, "Logging initialized");
    Ok(())
}

/// 심볼/타임프레임 필드를 가진 요청 span.
#[macro_export]
macro_rules! chart_span {
    ($name:expr, $symbol:expr, $timeframe:expr) => {
        tracing::info_span!($name, symbol = %$symbol, timeframe = %$timeframe)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("COMPACT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_build_filter() {
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("fxchart_api=debug,info").is_ok());
        assert!(build_filter("fxchart_api=loud").is_err());
    }

    #[test]
    fn test_unknown_format_fails_before_install() {
        let config = LoggingConfig {
            level: "info".to_string(),
            format: "xml".to_string(),
        };
        assert!(init_logging(&config).is_err());
    }
}
