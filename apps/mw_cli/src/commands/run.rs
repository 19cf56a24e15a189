// apps/mw_cli/src/commands/run.rs

//! 运行模拟命令
//!
//! 装配配置 → 求解器，把快照写成逐步的 `.dat` 文件，
//! 供外部绘图器消费（一维每行 `x u`，二维每行 `x y u`，
//! 二维按行分块，空行分隔）。文件写出属于应用层的外部
//! 协作者角色，核心 crate 不含任何文件 IO。

use anyhow::{Context, Result};
use clap::Args;
use mw_config::{IntegratorChoice, SimulationConfig};
use mw_io::error::{IoError, IoResult};
use mw_io::snapshot::{FieldSnapshot, GridSnapshot, MemorySink, SnapshotSink};
use mw_physics::{Grid, GridAxis, IntegratorKind, WaveProblem, WaveSolver};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// 运行模拟参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径（JSON）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 内置预设名（无配置文件时生效）
    #[arg(short, long, default_value = "pulse-1d")]
    pub preset: String,

    /// 输出目录（覆盖配置中的 output.directory）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 只在内存中保留历史，不写文件
    #[arg(long)]
    pub no_files: bool,
}

/// 把快照写成 `.dat` 文件的接收器
struct DatFileSink {
    directory: PathBuf,
    stride: usize,
    grid: GridSnapshot,
    written: usize,
}

impl DatFileSink {
    fn new(directory: PathBuf, stride: usize, grid: GridSnapshot) -> IoResult<Self> {
        std::fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            stride,
            grid,
            written: 0,
        })
    }
}

impl SnapshotSink for DatFileSink {
    fn record(&mut self, snapshot: FieldSnapshot) -> IoResult<()> {
        if snapshot.step % self.stride != 0 {
            return Ok(());
        }

        let path = self.directory.join(format!("solution_{}.dat", snapshot.step));
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);

        let write = |writer: &mut BufWriter<File>| -> std::io::Result<()> {
            match &self.grid.coords_y {
                None => {
                    for (col, &x) in self.grid.coords_x.iter().enumerate() {
                        writeln!(writer, "{} {}", x, snapshot.at(0, col))?;
                    }
                }
                Some(ys) => {
                    for (row, &y) in ys.iter().enumerate() {
                        for (col, &x) in self.grid.coords_x.iter().enumerate() {
                            writeln!(writer, "{} {} {}", x, y, snapshot.at(row, col))?;
                        }
                        writeln!(writer)?;
                    }
                }
            }
            Ok(())
        };

        write(&mut writer).map_err(IoError::Io)?;
        self.written += 1;
        Ok(())
    }
}

/// 由配置装配求解问题
pub(crate) fn build_problem(config: &SimulationConfig) -> Result<WaveProblem> {
    let x = GridAxis::new(
        config.domain.x.lower,
        config.domain.x.upper,
        config.domain.x.cells,
    )?;
    let grid = match &config.domain.y {
        Some(y_cfg) => Grid::plane(x, GridAxis::new(y_cfg.lower, y_cfg.upper, y_cfg.cells)?),
        None => Grid::line(x),
    };

    Ok(WaveProblem {
        grid,
        order: config.numerics.order,
        wave_speed: config.physics.wave_speed,
        total_time: config.physics.total_time,
        dt_override: config.numerics.dt,
        integrator: match config.numerics.integrator {
            IntegratorChoice::PositionVerlet => IntegratorKind::PositionVerlet,
            IntegratorChoice::ForestRuth => IntegratorKind::ForestRuth,
        },
        robin: config.numerics.robin.as_ref().map(|r| (r.alpha, r.beta)),
        interpolation: config
            .numerics
            .interpolation
            .as_ref()
            .map(|i| (i.weight_a, i.weight_b)),
    })
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== MimWave 模拟启动 ===");

    let config = super::load_config(args.config.as_deref(), &args.preset)?;
    let two_dimensional = config.domain.y.is_some();
    let initial = config.initial.clone();

    let problem = build_problem(&config)?;
    let mut solver = WaveSolver::new(problem, move |x, y| {
        initial.evaluate(x, y, two_dimensional)
    })
    .context("构建求解器失败")?;

    info!(
        dt = solver.dt(),
        steps = solver.total_steps(),
        "参数就绪"
    );

    let started = Instant::now();
    let summary = if args.no_files {
        let mut sink = MemorySink::new();
        let summary = solver.run(&mut sink, None)?;
        info!(frames = sink.len(), "历史帧保留在内存中");
        summary
    } else {
        let directory = args.output.unwrap_or_else(|| config.output.directory.clone());
        let mut sink = DatFileSink::new(
            directory.clone(),
            config.output.stride,
            solver.grid_snapshot(),
        )
        .context("创建输出目录失败")?;
        let summary = solver.run(&mut sink, None)?;
        info!(
            directory = %directory.display(),
            files = sink.written,
            "快照文件写出完成"
        );
        summary
    };

    info!(
        steps = summary.steps_completed,
        final_time = summary.final_time,
        elapsed_ms = started.elapsed().as_millis() as u64,
        u_norm_inf = solver.state().u_norm_inf(),
        "=== 模拟结束 ==="
    );
    Ok(())
}
