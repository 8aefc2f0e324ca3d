//! 통화쌍 심볼 정의.
//!
//! 피드는 `EURUSD`처럼 구분자 없는 코드를 사용하고, 차트 제목은 `EUR/USD`로 표시합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Timeframe;

/// 피드에서 사용하는 거래 심볼.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol {
    code: String,
}

impl Symbol {
    /// 새 심볼을 생성합니다. 코드는 대문자로 정규화되며 `/` 구분자는 제거됩니다.
    pub fn new(code: impl Into<String>) -> Self {
        let code: String = code.into();
        Self {
            code: code.trim().replace('/', "").to_uppercase(),
        }
    }

    /// 피드 요청에 쓰이는 코드 (예: "EURUSD").
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// 6자리 알파벳 통화쌍이면 (기준 통화, 호가 통화)로 분리합니다.
    pub fn currency_pair(&self) -> Option<(&str, &str)> {
        if self.code.len() == 6 && self.code.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(self.code.split_at(3))
        } else {
            None
        }
    }

    /// 기준 통화.
    pub fn base(&self) -> Option<&str> {
        self.currency_pair().map(|(base, _)| base)
    }

    /// 호가 통화.
    pub fn quote(&self) -> Option<&str> {
        self.currency_pair().map(|(_, quote)| quote)
    }

    /// 차트 제목 (예: "EUR/USD (H1)").
    pub fn title_for(&self, timeframe: Timeframe) -> String {
        format!("{} ({})", self, timeframe)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency_pair() {
            Some((base, quote)) => write!(f, "{}/{}", base, quote),
            None => f.write_str(&self.code),
        }
    }
}

impl std::str::FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = Self::new(s);
        if symbol.code.is_empty() {
            Err("Empty symbol".to_string())
        } else {
            Ok(symbol)
        }
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
