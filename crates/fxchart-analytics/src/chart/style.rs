//! 차트 색상 및 선 스타일.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 24비트 RGB 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#RRGGBB` 또는 `RRGGBB` 형식에서 파싱합니다.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// 배경색과 알파 블렌딩한 색상.
    pub fn blend(self, background: Rgb, opacity: f64) -> Rgb {
        let opacity = opacity.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| {
            (fg as f64 * opacity + bg as f64 * (1.0 - opacity)).round() as u8
        };
        Rgb(
            mix(self.0, background.0),
            mix(self.1, background.1),
            mix(self.2, background.2),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// 선 스타일.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// 시리즈 색상. 캔들스틱은 상승/하락 색을 따로 가집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesColor {
    Solid(Rgb),
    UpDown { up: Rgb, down: Rgb },
}

impl SeriesColor {
    /// 단색이면 그 색, 상승/하락 색이면 상승 색.
    pub fn primary(&self) -> Rgb {
        match *self {
            SeriesColor::Solid(color) => color,
            SeriesColor::UpDown { up, .. } => up,
        }
    }
}

/// 차트 색상 팔레트.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// 팔레트 이름
    pub name: &'static str,
    pub background: Rgb,
    pub text: Rgb,
    pub grid: Rgb,
    pub border: Rgb,
    /// 상승 캔들, 과매도 기준선
    pub bullish: Rgb,
    /// 하락 캔들, 과매수 기준선
    pub bearish: Rgb,
    /// 첫 번째 오버레이 (단기 EMA)
    pub ema_fast: Rgb,
    /// 두 번째 오버레이 (장기 EMA)
    pub ema_slow: Rgb,
    /// RSI 라인
    pub rsi: Rgb,
}

impl Palette {
    /// TradingView 라이트 테마.
    pub fn tradingview_light() -> Self {
        Self {
            name: "tradingview_light",
            background: Rgb(0xFF, 0xFF, 0xFF),
            text: Rgb(0x13, 0x17, 0x22),
            grid: Rgb(0xE0, 0xE3, 0xEB),
            border: Rgb(0xB2, 0xB5, 0xBE),
            bullish: Rgb(0x08, 0x99, 0x81),
            bearish: Rgb(0xF2, 0x36, 0x45),
            ema_fast: Rgb(0x29, 0x62, 0xFF),
            ema_slow: Rgb(0xFF, 0x6B, 0x00),
            rsi: Rgb(0x78, 0x7B, 0x86),
        }
    }

    /// 전통적인 녹색/빨간색 테마.
    pub fn classic() -> Self {
        Self {
            name: "classic",
            background: Rgb(0xFF, 0xFF, 0xFF),
            text: Rgb(0x00, 0x00, 0x00),
            grid: Rgb(0xC0, 0xC0, 0xC0),
            border: Rgb(0x69, 0x69, 0x69),
            bullish: Rgb(0x00, 0x80, 0x00),
            bearish: Rgb(0xFF, 0x00, 0x00),
            ema_fast: Rgb(0x00, 0x00, 0xFF),
            ema_slow: Rgb(0xFF, 0xA5, 0x00),
            rsi: Rgb(0x00, 0x00, 0xFF),
        }
    }

    /// 이름으로 팔레트를 찾습니다 (대소문자 무시, `-`와 `_` 동일 취급).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "tradingview_light" | "tradingview" => Some(Self::tradingview_light()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }

    /// `index`번째 가격 오버레이 색상.
    pub fn overlay_color(&self, index: usize) -> Rgb {
        if index % 2 == 0 {
            self.ema_fast
        } else {
            self.ema_slow
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::tradingview_light()
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::by_name(s).ok_or_else(|| format!("Unknown palette: {}", s))
    }
}
