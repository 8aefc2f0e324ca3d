//! 지표 진단 명령.

use fxchart_api::{ChartData, ChartService};

/// 기본 출력 행 수.
pub const DEFAULT_ROWS: usize = 20;

/// 바를 가져와 지표를 계산한 뒤 최근 `rows`개를 표로 만듭니다.
pub async fn run_indicators(service: &ChartService, rows: usize) -> anyhow::Result<String> {
    let data = service.load().await?;
    Ok(format_table(&data, rows))
}

fn cell(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

/// 테이블 형식 출력.
///
/// 정의되지 않은 지표 값(워밍업 구간, 0/0 RSI)은 `-`로 표시합니다.
pub fn format_table(data: &ChartData, rows: usize) -> String {
    let mut output = String::new();

    let mut header = format!(
        "{:<20} {:>10} {:>10} {:>10} {:>10}",
        "TIME", "OPEN", "HIGH", "LOW", "CLOSE"
    );
    for overlay in &data.overlays {
        header.push_str(&format!(" {:>10}", overlay.name()));
    }
    header.push_str(&format!(" {:>8}", data.rsi.name()));

    output.push_str(&header);
    output.push('\n');
    output.push_str(&"-".repeat(header.len()));
    output.push('\n');

    let start = data.bars.len().saturating_sub(rows);
    for (index, bar) in data.bars.iter().enumerate().skip(start) {
        output.push_str(&format!(
            "{:<20} {:>10.5} {:>10.5} {:>10.5} {:>10.5}",
            bar.timestamp.format("%Y-%m-%d %H:%M"),
            bar.open,
            bar.high,
            bar.low,
            bar.close
        ));
        for overlay in &data.overlays {
            output.push_str(&format!(" {:>10}", cell(overlay.value_at(index), 5)));
        }
        output.push_str(&format!(" {:>8}", cell(data.rsi.value_at(index), 2)));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format!(
        "Total: {} bars, RSI defined: {}",
        data.bars.len(),
        data.rsi.defined_count()
    ));
    if let Some(point) = data.rsi.last_defined() {
        output.push_str(&format!(
            "\nLast RSI: {} @ {}",
            cell(point.value, 2),
            point.timestamp.format("%Y-%m-%d %H:%M")
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fxchart_api::ChartSettings;
    use fxchart_core::{RawBar, Symbol, Timeframe};
    use fxchart_feed::StaticOhlcSource;
    use fxchart_render::PlottersRenderer;
    use std::sync::Arc;

    fn service(closes: &[f64]) -> ChartService {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let records = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                RawBar::new(
                    (start + chrono::Duration::hours(i as i64)).to_rfc3339(),
                    close,
                    close + 0.5,
                    close - 0.5,
                    close,
                    10.0,
                )
            })
            .collect();
        let source = StaticOhlcSource::new(Symbol::new("EURUSD"), Timeframe::H1, records);
        ChartService::new(
            Arc::new(source),
            Arc::new(PlottersRenderer::new(300, 200).unwrap()),
            ChartSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_table_shows_warmup_gaps() {
        let closes = [
            100.0, 102.0, 101.0, 103.0, 105.0, 104.0, 106.0, 108.0, 107.0, 109.0, 110.0, 109.0,
            111.0, 112.0, 113.0,
        ];
        let table = run_indicators(&service(&closes), 15).await.unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].contains("EMA20"));
        assert!(lines[0].contains("EMA50"));
        assert!(lines[0].contains("RSI"));
        assert!(lines[2].starts_with("2024-01-01 00:00"));
        assert!(lines[2].trim_end().ends_with('-'));
        assert!(lines[16].contains("81.86"));
        assert!(table.contains("Total: 15 bars, RSI defined: 1"));
        assert!(table.contains("Last RSI: 81.86 @ 2024-01-01 14:00"));
    }

    #[tokio::test]
    async fn test_table_limits_rows() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let table = run_indicators(&service(&closes), 5).await.unwrap();

        let data_rows = table.lines().filter(|l| l.starts_with("2024-")).count();
        assert_eq!(data_rows, 5);
        assert!(table.contains("2024-01-02 15:00"));
        assert!(!table.contains("2024-01-02 10:00"));
        assert!(table.contains("100.00"));
    }
}
