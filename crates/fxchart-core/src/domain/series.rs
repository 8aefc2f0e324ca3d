//! 바 시리즈와 지표 시리즈.
//!
//! `BarSeries`는 요청마다 한 번 생성되고 이후 변경되지 않습니다.
//! 파생 지표는 바 시리즈를 수정하지 않고 `IndicatorSeries`로 따로 계산됩니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::bar::{Bar, RawBar};
use super::time::parse_timestamp;
use crate::error::{SeriesError, SeriesResult};

/// 타임스탬프가 엄격히 증가하는 바 시리즈.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// 원시 레코드에서 시리즈를 생성합니다.
    ///
    /// 타임스탬프 해석 실패, 시간 순서 위반, OHLC 불변식 위반 중 첫 번째 에러에서 중단합니다.
    /// 레코드는 정렬하거나 보정하지 않습니다.
    pub fn from_records(records: &[RawBar]) -> SeriesResult<Self> {
        let mut bars: Vec<Bar> = Vec::with_capacity(records.len());

        for (index, raw) in records.iter().enumerate() {
            let timestamp = parse_timestamp(&raw.time)
                .map_err(|reason| SeriesError::MalformedBar { index, reason })?;

            if let Some(prev) = bars.last() {
                if timestamp <= prev.timestamp {
                    return Err(SeriesError::OutOfOrder {
                        index,
                        previous: prev.timestamp,
                        current: timestamp,
                    });
                }
            }

            bars.push(Bar::new(
                index, timestamp, raw.open, raw.high, raw.low, raw.close, raw.volume,
            )?);
        }

        Ok(Self { bars })
    }

    /// 이미 구성된 바 목록을 검증하여 시리즈로 만듭니다.
    pub fn try_from_bars(bars: Vec<Bar>) -> SeriesResult<Self> {
        for (index, bar) in bars.iter().enumerate() {
            bar.validate(index)?;
            if index > 0 {
                let previous = bars[index - 1].timestamp;
                if bar.timestamp <= previous {
                    return Err(SeriesError::OutOfOrder {
                        index,
                        previous,
                        current: bar.timestamp,
                    });
                }
            }
        }
        Ok(Self { bars })
    }

    /// 바 개수.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 시리즈가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 전체 바 슬라이스.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// 종가 시퀀스.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// 타임스탬프 시퀀스.
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// 첫 번째와 마지막 타임스탬프.
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }

    /// 전체 바의 (최저가, 최고가).
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.bars.iter().fold(None, |acc, bar| match acc {
            None => Some((bar.low, bar.high)),
            Some((lo, hi)) => Some((lo.min(bar.low), hi.max(bar.high))),
        })
    }
}

impl Index<usize> for BarSeries {
    type Output = Bar;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bars[index]
    }
}

impl<'a> IntoIterator for &'a BarSeries {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

/// 지표 시리즈의 한 점. `value`가 `None`이면 워밍업 구간 등 정의되지 않은 값입니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub timestamp: DateTime<Utc>,
    pub value: Option<f64>,
}

/// 바 시리즈에 1:1로 정렬된 이름 있는 지표 시리즈.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    name: String,
    points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// 바 시리즈의 타임스탬프에 값을 정렬하여 지표 시리즈를 만듭니다.
    ///
    /// 유한하지 않은 값(NaN, ±inf)은 `None`으로 저장됩니다.
    /// 값이 바보다 적으면 남는 타임스탬프는 `None`이 됩니다.
    pub fn from_values(
        name: impl Into<String>,
        bars: &BarSeries,
        values: impl IntoIterator<Item = Option<f64>>,
    ) -> Self {
        let mut values = values.into_iter();
        let points = bars
            .iter()
            .map(|bar| IndicatorPoint {
                timestamp: bar.timestamp,
                value: values.next().flatten().filter(|v| v.is_finite()),
            })
            .collect();

        Self {
            name: name.into(),
            points,
        }
    }

    /// 점 목록에서 직접 생성합니다.
    pub fn from_points(name: impl Into<String>, points: Vec<IndicatorPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// 시리즈 전체 구간에 걸친 상수 라인.
    pub fn constant(name: impl Into<String>, bars: &BarSeries, value: f64) -> Self {
        Self::from_values(name, bars, std::iter::repeat(Some(value)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[IndicatorPoint] {
        &self.points
    }

    /// 인덱스별 값.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|p| p.value)
    }

    /// 마지막으로 정의된 점.
    pub fn last_defined(&self) -> Option<&IndicatorPoint> {
        self.points.iter().rev().find(|p| p.value.is_some())
    }

    /// 정의된 값의 개수.
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    /// 정의된 값의 (최솟값, 최댓값).
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.value)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// 바 시리즈와 길이 및 타임스탬프가 모두 일치하는지 확인합니다.
    pub fn is_aligned_with(&self, bars: &BarSeries) -> bool {
        self.points.len() == bars.len()
            && self
                .points
                .iter()
                .zip(bars.iter())
                .all(|(p, b)| p.timestamp == b.timestamp)
    }
}
