//! # 拼版打印工具 — 命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与配置合并。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use collage_sheets::collage::{CollageConfig, CollageHandler, OutputFormat, SamplingPolicy};
use collage_sheets::error::AppError;
use collage_sheets::settings;

/// 将文件夹中的照片批量拼成固定尺寸的打印画布。
#[derive(Parser, Debug)]
#[command(name = "collage-sheets", version, about)]
struct Args {
    /// 输出格式：png / pdf / svg / ai（默认 png）
    #[arg(short, long)]
    format: Option<String>,

    /// 输入图片目录
    #[arg(short, long, default_value = "images")]
    input: PathBuf,

    /// 输出目录（不存在时自动创建）
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// JSON 配置文件，字段覆盖默认配置
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 背景取样策略：mode / average / dominant
    #[arg(long)]
    sampling: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("❌ 拼版失败: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // 参数中的枚举值先于任何文件 I/O 校验
    let format = args.format.as_deref().map(OutputFormat::from_str).transpose()?;
    let sampling = args.sampling.as_deref().map(SamplingPolicy::from_str).transpose()?;

    let mut config = CollageConfig::default();
    if let Some(path) = &args.config {
        settings::load_overrides(path)?.apply(&mut config)?;
        log::info!("⚙️ 已加载配置文件: {}", path.display());
    }
    if let Some(format) = format {
        config.output_format = format;
    }
    if let Some(sampling) = sampling {
        config.sampling = sampling;
    }

    let handler = CollageHandler::new(config)?;
    let report = handler.run(&args.input, &args.output)?;

    for output in &report.outputs {
        log::info!(
            "📄 {} - {} 张图片",
            output.path.display(),
            output.placed
        );
    }

    Ok(())
}
