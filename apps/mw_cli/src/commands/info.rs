// apps/mw_cli/src/commands/info.rs

//! 显示信息命令
//!
//! 对给定配置打印网格、各算子形状/非零元数与推导出的
//! 时间步长，便于在运行前核对离散规模。

use anyhow::Result;
use clap::Args;
use mw_config::SimulationConfig;
use mw_physics::{
    cfl_time_step, face_space_len, interpolation_2d, laplacian_1d, laplacian_2d, robin_bc_1d,
    robin_bc_2d, step_count, InterpolKind,
};
use std::path::PathBuf;

/// 显示信息参数
#[derive(Args)]
pub struct InfoArgs {
    /// 配置文件路径（JSON）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 内置预设名（无配置文件时生效）
    #[arg(short, long, default_value = "pulse-1d")]
    pub preset: String,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref(), &args.preset)?;

    let order = config.numerics.order;
    let (mx, dx) = (config.domain.x.cells, config.domain.x.spacing());

    println!("计算域:");
    println!(
        "  x: [{}, {}], {} 单元, Δx = {:.6}",
        config.domain.x.lower, config.domain.x.upper, mx, dx
    );

    let laplacian = match &config.domain.y {
        None => laplacian_1d(order, mx, dx)?,
        Some(y_cfg) => {
            let (my, dy) = (y_cfg.cells, y_cfg.spacing());
            println!(
                "  y: [{}, {}], {} 单元, Δy = {:.6}",
                y_cfg.lower, y_cfg.upper, my, dy
            );
            laplacian_2d(order, mx, dx, my, dy)?
        }
    };

    println!("算子 (阶数 {order}):");
    println!(
        "  Laplacian: {}x{}, nnz = {}",
        laplacian.shape().0,
        laplacian.shape().1,
        laplacian.nnz()
    );

    if let Some(robin) = &config.numerics.robin {
        let bc = match &config.domain.y {
            None => robin_bc_1d(order, mx, dx, robin.alpha, robin.beta)?,
            Some(y_cfg) => robin_bc_2d(
                order,
                mx,
                dx,
                y_cfg.cells,
                y_cfg.spacing(),
                robin.alpha,
                robin.beta,
            )?,
        };
        println!(
            "  RobinBC(α={}, β={}): {}x{}, nnz = {}",
            robin.alpha,
            robin.beta,
            bc.shape().0,
            bc.shape().1,
            bc.nnz()
        );
    }

    if let Some(interp) = &config.numerics.interpolation {
        if let Some(y_cfg) = &config.domain.y {
            let my = y_cfg.cells;
            let i = interpolation_2d(
                InterpolKind::CentersToFaces,
                mx,
                my,
                interp.weight_a,
                interp.weight_b,
            )?;
            println!(
                "  Interpol({}): {}x{}, 面空间维数 = {}",
                InterpolKind::CentersToFaces,
                i.shape().0,
                i.shape().1,
                face_space_len(mx, my)
            );
        }
    }

    let dt = match config.numerics.dt {
        Some(dt) => dt,
        None => {
            let mut spacing = dx;
            if let Some(y_cfg) = &config.domain.y {
                spacing = spacing.min(y_cfg.spacing());
            }
            cfl_time_step(spacing, config.physics.wave_speed)?
        }
    };
    let steps = step_count(config.physics.total_time, dt)?;

    println!("时间推进:");
    println!("  波速 = {}, dt = {:.3e}, 总步数 = {}", config.physics.wave_speed, dt, steps);
    println!("  积分器: {:?}", config.numerics.integrator);

    Ok(())
}
