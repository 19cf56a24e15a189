// apps/mw_cli/src/commands/validate.rs

//! 验证配置命令

use anyhow::{Context, Result};
use clap::Args;
use mw_config::SimulationConfig;
use std::path::PathBuf;
use tracing::info;

/// 验证配置参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径（JSON）
    #[arg(short, long)]
    pub config: PathBuf,
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    let config = SimulationConfig::from_file(&args.config)
        .with_context(|| format!("读取配置文件失败: {}", args.config.display()))?;

    config.validate().context("配置校验失败")?;

    info!(
        path = %args.config.display(),
        dimension = if config.domain.y.is_some() { 2 } else { 1 },
        order = config.numerics.order,
        "配置有效"
    );
    println!("配置有效: {}", args.config.display());
    Ok(())
}
