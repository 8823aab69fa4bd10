use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use krs_generator::{logger, App, Config, DocumentKind, StatusPeserta};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// 参与者 KRS / 合同文档生成工具
#[derive(Parser, Debug)]
#[command(name = "krs-generator", version, about)]
struct Cli {
    /// TOML 配置文件（未指定时只读取环境变量）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 输出目录（覆盖配置）
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 为单个参与者生成文档
    Generate {
        /// 参与者ID
        id: String,

        /// 文档种类：krs / kontrak
        #[arg(short, long, default_value = "krs")]
        kind: DocumentKind,
    },
    /// 批量生成并打包为 zip
    Batch {
        /// 参与者ID（为空时处理全部参与者）
        ids: Vec<String>,

        /// 按参与者状态筛选：baru / aktif / lulus / ditolak
        #[arg(short, long)]
        status: Option<StatusPeserta>,

        /// 文档种类：krs / kontrak
        #[arg(short, long, default_value = "krs")]
        kind: DocumentKind,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("无法加载配置文件: {}", path.display()))?,
        None => Config::from_env().context("无法读取环境变量配置")?,
    };
    if let Some(output) = &cli.output {
        config.output_dir = output.display().to_string();
    }

    // 初始化日志
    logger::init(cli.verbose || config.verbose_logging);

    // 初始化应用
    let app = App::initialize(config)?;

    match cli.command {
        Command::Generate { id, kind } => {
            app.generate(&id, kind).await?;
        }
        Command::Batch { ids, status, kind } => {
            let cancel = CancellationToken::new();
            let ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("⚠️ 收到 Ctrl-C，正在停止批处理...");
                    ctrl_c.cancel();
                }
            });

            app.run_batch(ids, status, kind, &cancel).await?;
        }
    }

    Ok(())
}
