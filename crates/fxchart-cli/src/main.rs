//! 차트 파이프라인 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # EURUSD H1 차트를 chart.png와 chart_base64.txt로 저장
//! fxchart render --base64-out chart_base64.txt
//!
//! # 생성한 차트를 업로드
//! fxchart render -s GBPUSD -t M15 --upload-url https://example.com/charts
//!
//! # 최근 바의 EMA/RSI 확인
//! fxchart indicators -s EURUSD -t H4 --rows 30
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use fxchart_cli::commands::indicators::{run_indicators, DEFAULT_ROWS};
use fxchart_cli::commands::render::{run_render, RenderOptions};
use fxchart_cli::commands::{build_service, FeedOverrides};
use fxchart_core::{init_logging, AppConfig, Timeframe};
use tracing::error;

#[derive(Parser)]
#[command(name = "fxchart")]
#[command(about = "FX chart CLI - OHLC 데이터로 RSI/EMA 차트 생성", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (기본: FXCHART_CONFIG 또는 config/default.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// 데이터 소스 공통 옵션.
#[derive(Args, Debug, Clone)]
struct FeedArgs {
    /// 심볼 (예: EURUSD)
    #[arg(short, long)]
    symbol: Option<String>,

    /// 타임프레임 (M1, M5, M15, M30, H1, H4, D1, W1, MN1 또는 1h 형식)
    #[arg(short, long)]
    timeframe: Option<Timeframe>,

    /// 요청할 바 개수
    #[arg(short = 'n', long)]
    count: Option<usize>,
}

impl From<FeedArgs> for FeedOverrides {
    fn from(args: FeedArgs) -> Self {
        Self {
            symbol: args.symbol,
            timeframe: args.timeframe,
            count: args.count,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// 차트를 생성해 PNG/base64 파일로 저장
    Render {
        #[command(flatten)]
        feed: FeedArgs,

        /// PNG 출력 경로
        #[arg(short, long, default_value = "chart.png")]
        output: PathBuf,

        /// base64 텍스트 출력 경로
        #[arg(long)]
        base64_out: Option<PathBuf>,

        /// 결과 JSON을 POST할 URL
        #[arg(long)]
        upload_url: Option<String>,
    },

    /// 최근 바와 EMA/RSI 값을 표로 출력
    Indicators {
        #[command(flatten)]
        feed: FeedArgs,

        /// 출력할 행 수
        #[arg(short, long, default_value_t = DEFAULT_ROWS)]
        rows: usize,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load(path),
        None => AppConfig::load_default(),
    };
    config.context("Failed to load configuration")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;
    init_logging(&config.logging).map_err(|e| anyhow::anyhow!(e))?;

    match cli.command {
        Commands::Render {
            feed,
            output,
            base64_out,
            upload_url,
        } => {
            FeedOverrides::from(feed).apply(&mut config);
            let service = build_service(&config)?;
            let options = RenderOptions {
                output: Some(output.clone()),
                base64_out: base64_out.clone(),
                upload_url,
            };

            let summary = match run_render(&service, &options).await {
                Ok(summary) => summary,
                Err(e) => {
                    error!(error = %e, "Render failed");
                    return Err(e);
                }
            };

            println!(
                "\n차트 생성 완료: {} {} ({} 바, {} bytes)",
                summary.payload.symbol, summary.payload.timeframe, summary.bars, summary.png_bytes
            );
            println!("PNG 저장 위치: {}", output.display());
            if let Some(path) = base64_out {
                println!("Base64 저장 위치: {}", path.display());
            }
            if let Some(upload) = summary.upload {
                println!("업로드 응답: HTTP {}", upload.status);
                println!("{}", upload.body);
            }
        }

        Commands::Indicators { feed, rows } => {
            FeedOverrides::from(feed).apply(&mut config);
            let service = build_service(&config)?;
            let table = run_indicators(&service, rows).await?;
            println!("{}", service.symbol().title_for(service.timeframe()));
            println!("{}", table);
        }
    }

    Ok(())
}
