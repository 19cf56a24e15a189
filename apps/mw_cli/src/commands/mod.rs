// apps/mw_cli/src/commands/mod.rs

//! CLI 子命令

pub mod info;
pub mod run;
pub mod validate;

use anyhow::Context;
use mw_config::SimulationConfig;
use std::path::Path;

/// 按 `--config` / `--preset` 解析配置
pub(crate) fn load_config(
    config_path: Option<&Path>,
    preset: &str,
) -> anyhow::Result<SimulationConfig> {
    let config = match config_path {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?,
        None => SimulationConfig::preset(preset)?,
    };
    config.validate().context("配置校验失败")?;
    Ok(config)
}
