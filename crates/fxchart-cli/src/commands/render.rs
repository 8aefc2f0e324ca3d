//! 차트 생성 명령.
//!
//! 파이프라인을 한 번 실행한 뒤 PNG와 base64 텍스트 파일을 저장하고,
//! 업로드 URL이 주어지면 `{image, timestamp, symbol, timeframe}` JSON을 POST합니다.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use fxchart_api::{ChartPayload, ChartService};
use tracing::{info, warn};

/// 업로드 요청 타임아웃.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// render 명령 옵션.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// PNG 저장 경로
    pub output: Option<PathBuf>,
    /// base64 텍스트 저장 경로
    pub base64_out: Option<PathBuf>,
    /// 결과를 POST할 URL
    pub upload_url: Option<String>,
}

/// 업로드 응답.
#[derive(Debug, Clone)]
pub struct UploadResponse {
    pub status: u16,
    pub body: String,
}

/// render 실행 결과.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub payload: ChartPayload,
    pub bars: usize,
    pub png_bytes: usize,
    pub upload: Option<UploadResponse>,
}

/// 차트를 생성하고 옵션에 따라 저장/업로드합니다.
pub async fn run_render(
    service: &ChartService,
    options: &RenderOptions,
) -> anyhow::Result<RenderSummary> {
    let chart = service.render().await.context("Chart generation failed")?;
    let payload = ChartPayload::from(&chart);

    if let Some(path) = &options.output {
        tokio::fs::write(path, &chart.image)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), bytes = chart.image.len(), "PNG saved");
    }

    if let Some(path) = &options.base64_out {
        tokio::fs::write(path, payload.image.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), bytes = payload.image.len(), "Base64 saved");
    }

    let upload = match &options.upload_url {
        Some(url) => Some(upload_chart(url, &payload).await?),
        None => None,
    };

    Ok(RenderSummary {
        bars: chart.bars,
        png_bytes: chart.image.len(),
        payload,
        upload,
    })
}

/// 차트 페이로드를 JSON으로 POST합니다.
///
/// 2xx가 아닌 응답도 에러 없이 그대로 반환합니다.
pub async fn upload_chart(url: &str, payload: &ChartPayload) -> anyhow::Result<UploadResponse> {
    let client = reqwest::Client::builder()
        .timeout(UPLOAD_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .post(url)
        .json(payload)
        .send()
        .await
        .with_context(|| format!("Upload to {} failed", url))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .context("Failed to read upload response body")?;

    if (200..300).contains(&status) {
        info!(url, status, "Chart uploaded");
    } else {
        warn!(url, status, "Upload rejected");
    }

    Ok(UploadResponse { status, body })
}
