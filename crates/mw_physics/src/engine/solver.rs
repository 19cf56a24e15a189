// crates/mw_physics/src/engine/solver.rs

//! 波动方程求解循环
//!
//! 持有模拟参数（网格、波速、CFL 推导的步长、总步数）、
//! 组合算子与 `(u, v)` 状态对，反复驱动积分器并向快照接收器
//! 发出只读副本。
//!
//! # 循环形状
//!
//! 每次迭代先发出当前状态的快照再推进一步，共 `steps + 1` 次
//! 迭代（含初始帧）。协作取消：每完成一步检查一次停止标志，
//! 命中即干净退出，不留半步状态。

use crate::engine::cfl::{cfl_time_step, step_count};
use crate::engine::integrator::{create_integrator, IntegratorKind, SymplecticIntegrator};
use crate::engine::step_ops::StepOperators;
use crate::grid::Grid;
use crate::operators::{
    combine, interpolation_1d, interpolation_2d, laplacian_1d, laplacian_2d, robin_bc_1d,
    robin_bc_2d, InterpolKind,
};
use crate::state::WaveState;
use mw_foundation::error::{MwError, MwResult};
use mw_io::snapshot::{FieldSnapshot, GridSnapshot, SnapshotSink};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// 求解问题描述
///
/// 由配置层装配；`dt_override` 为 None 时按 CFL 界推导步长。
#[derive(Debug, Clone)]
pub struct WaveProblem {
    /// 计算网格
    pub grid: Grid,
    /// 精度阶数（偶数，须在系数表内）
    pub order: usize,
    /// 波速
    pub wave_speed: f64,
    /// 总模拟时长
    pub total_time: f64,
    /// 显式步长覆盖（不做 CFL 校验，稳定性责任在调用方）
    pub dt_override: Option<f64>,
    /// 积分器选择
    pub integrator: IntegratorKind,
    /// Robin 边界系数 (α, β)；None 表示只用拉普拉斯
    pub robin: Option<(f64, f64)>,
    /// 插值权重 (wA, wB)；Some 时速度场置于交错面空间
    pub interpolation: Option<(f64, f64)>,
}

/// 运行结果摘要
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// 完成的推进步数
    pub steps_completed: usize,
    /// 结束时的物理时间
    pub final_time: f64,
    /// 是否因停止标志提前退出
    pub cancelled: bool,
}

/// 波动方程求解器
///
/// 运行期间独占 `(u, v)`；网格与算子构造后只读。
pub struct WaveSolver {
    grid: Grid,
    ops: StepOperators,
    integrator: Box<dyn SymplecticIntegrator>,
    state: WaveState,
    dt: f64,
    total_steps: usize,
    step_index: usize,
    time: f64,
}

impl WaveSolver {
    /// 构建求解器
    ///
    /// `initial` 给出初始位移 `u₀(x, y)`（一维时 y = 0）；
    /// 初速度为零。所有算子构造错误原样上抛。
    pub fn new(problem: WaveProblem, initial: impl Fn(f64, f64) -> f64) -> MwResult<Self> {
        let grid = problem.grid;
        let dt = match problem.dt_override {
            Some(dt) => dt,
            None => cfl_time_step(grid.min_spacing(), problem.wave_speed)?,
        };
        let total_steps = step_count(problem.total_time, dt.abs())?;

        // 空间算子: Laplacian (+ RobinBC)
        let laplacian = match grid.y() {
            None => laplacian_1d(problem.order, grid.x().cells(), grid.x().spacing())?,
            Some(y) => laplacian_2d(
                problem.order,
                grid.x().cells(),
                grid.x().spacing(),
                y.cells(),
                y.spacing(),
            )?,
        };
        let combined = match problem.robin {
            Some((alpha, beta)) => {
                let bc = match grid.y() {
                    None => robin_bc_1d(
                        problem.order,
                        grid.x().cells(),
                        grid.x().spacing(),
                        alpha,
                        beta,
                    )?,
                    Some(y) => robin_bc_2d(
                        problem.order,
                        grid.x().cells(),
                        grid.x().spacing(),
                        y.cells(),
                        y.spacing(),
                        alpha,
                        beta,
                    )?,
                };
                combine(&laplacian, &bc)?
            }
            None => laplacian,
        };

        // 更新算子包（可选插值对）
        let ops = match problem.interpolation {
            None => StepOperators::new(combined, problem.wave_speed, dt)?,
            Some((wa, wb)) => {
                let (i, i2) = match grid.y() {
                    None => (
                        interpolation_1d(InterpolKind::CentersToFaces, grid.x().cells(), wa, wb)?,
                        interpolation_1d(InterpolKind::FacesToCenters, grid.x().cells(), wa, wb)?,
                    ),
                    Some(y) => (
                        interpolation_2d(
                            InterpolKind::CentersToFaces,
                            grid.x().cells(),
                            y.cells(),
                            wa,
                            wb,
                        )?,
                        interpolation_2d(
                            InterpolKind::FacesToCenters,
                            grid.x().cells(),
                            y.cells(),
                            wa,
                            wb,
                        )?,
                    ),
                };
                StepOperators::with_interpolation(combined, problem.wave_speed, dt, &i, &i2)?
            }
        };

        // 初始条件：闭式初始位移 + 零初速度
        let mut u = vec![0.0; ops.displacement_len()];
        grid.for_each_node(|idx, x, y| {
            u[idx] = initial(x, y);
        });
        let state = WaveState::new(u, vec![0.0; ops.velocity_len()]);
        ops.check_state(&state)?;

        let integrator = create_integrator(problem.integrator, &ops);

        info!(
            dimension = grid.dimension(),
            nodes = grid.node_count(),
            order = problem.order,
            dt,
            total_steps,
            integrator = integrator.name(),
            "求解器就绪"
        );

        Ok(Self {
            grid,
            ops,
            integrator,
            state,
            dt,
            total_steps,
            step_index: 0,
            time: 0.0,
        })
    }

    /// 推进一个时间步
    pub fn step(&mut self) -> MwResult<()> {
        self.integrator.advance(&mut self.state, &self.ops)?;
        self.step_index += 1;
        self.time += self.dt;
        Ok(())
    }

    /// 运行完整模拟
    ///
    /// 每次迭代发出快照后推进一步；停止标志每完成一步检查一次。
    pub fn run(
        &mut self,
        sink: &mut dyn SnapshotSink,
        stop: Option<&AtomicBool>,
    ) -> MwResult<RunSummary> {
        info!(steps = self.total_steps, dt = self.dt, "开始时间积分");

        for s in 0..=self.total_steps {
            sink.record(self.field_snapshot())
                .map_err(|e| MwError::internal(format!("快照输出失败: {e}")))?;

            self.step()?;

            if s % 100 == 0 {
                debug!(
                    step = self.step_index,
                    time = self.time,
                    u_norm = self.state.u_norm2(),
                    "推进中"
                );
            }

            if let Some(flag) = stop {
                if flag.load(Ordering::Relaxed) {
                    info!(step = self.step_index, "收到停止请求，干净退出");
                    return Ok(RunSummary {
                        steps_completed: self.step_index,
                        final_time: self.time,
                        cancelled: true,
                    });
                }
            }
        }

        info!(
            steps = self.step_index,
            final_time = self.time,
            "时间积分完成"
        );
        Ok(RunSummary {
            steps_completed: self.step_index,
            final_time: self.time,
            cancelled: false,
        })
    }

    /// 网格快照（所有帧共享的坐标描述）
    pub fn grid_snapshot(&self) -> GridSnapshot {
        let (rows, cols) = self.grid.shape();
        GridSnapshot {
            dimension: self.grid.dimension(),
            coords_x: self.grid.x().coords(),
            coords_y: self.grid.y().map(|axis| axis.coords()),
            rows,
            cols,
        }
    }

    /// 当前状态的场快照（完整物化副本）
    pub fn field_snapshot(&self) -> FieldSnapshot {
        let (rows, cols) = self.grid.shape();
        FieldSnapshot {
            step: self.step_index,
            time: self.time,
            values: self.state.u.clone(),
            rows,
            cols,
        }
    }

    /// 网格引用
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// 状态引用
    pub fn state(&self) -> &WaveState {
        &self.state
    }

    /// 状态可变引用（场长度不得改变）
    pub fn state_mut(&mut self) -> &mut WaveState {
        &mut self.state
    }

    /// 时间步长
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// 总步数
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// 已推进步数
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// 当前物理时间
    pub fn time(&self) -> f64 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridAxis;
    use mw_io::snapshot::MemorySink;
    use std::f64::consts::PI;
    use std::sync::atomic::AtomicBool;

    fn pulse_1d() -> WaveProblem {
        WaveProblem {
            grid: Grid::line(GridAxis::new(1.0, 4.0, 101).unwrap()),
            order: 4,
            wave_speed: 100.0,
            total_time: 0.06,
            dt_override: None,
            integrator: IntegratorKind::PositionVerlet,
            robin: None,
            interpolation: None,
        }
    }

    fn pulse_init(x: f64, _y: f64) -> f64 {
        if x > 2.0 && x < 3.0 {
            (PI * x).sin()
        } else {
            0.0
        }
    }

    #[test]
    fn test_solver_setup_derives_cfl_dt() {
        let solver = WaveSolver::new(pulse_1d(), pulse_init).unwrap();
        let dx = 3.0 / 101.0;
        assert!((solver.dt() - dx / 200.0).abs() < 1e-15);
        assert_eq!(solver.state().u_len(), 103);
        assert_eq!(solver.state().v_len(), 103);
    }

    #[test]
    fn test_run_emits_steps_plus_one_snapshots() {
        let mut problem = pulse_1d();
        problem.total_time = 0.003; // 约 20 步
        let mut solver = WaveSolver::new(problem, pulse_init).unwrap();
        let expected_steps = solver.total_steps();

        let mut sink = MemorySink::new();
        let summary = solver.run(&mut sink, None).unwrap();

        assert!(!summary.cancelled);
        assert_eq!(summary.steps_completed, expected_steps + 1);
        assert_eq!(sink.len(), expected_steps + 1);
        assert_eq!(sink.frames[0].step, 0);
        assert_eq!(sink.last().unwrap().step, expected_steps);
    }

    #[test]
    fn test_stop_flag_cancels_cleanly() {
        let mut problem = pulse_1d();
        problem.total_time = 0.06;
        let mut solver = WaveSolver::new(problem, pulse_init).unwrap();

        // 标志事先置位：第一步完成后即退出
        let stop = AtomicBool::new(true);
        let mut sink = MemorySink::new();
        let summary = solver.run(&mut sink, Some(&stop)).unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.steps_completed, 1);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_2d_interpolated_setup() {
        let problem = WaveProblem {
            grid: Grid::plane(
                GridAxis::new(0.0, 1.0, 8).unwrap(),
                GridAxis::new(0.0, 1.0, 8).unwrap(),
            ),
            order: 2,
            wave_speed: 1.0,
            total_time: 0.1,
            dt_override: None,
            integrator: IntegratorKind::PositionVerlet,
            robin: Some((1.0, 0.0)),
            interpolation: Some((0.5, 0.5)),
        };
        let solver =
            WaveSolver::new(problem, |x, y| (PI * x).sin() * (PI * y).sin()).unwrap();

        assert_eq!(solver.state().u_len(), 100);
        assert_eq!(solver.state().v_len(), 2 * 64 + 16);

        let snap = solver.grid_snapshot();
        assert_eq!(snap.dimension, 2);
        assert_eq!((snap.rows, snap.cols), (10, 10));
    }

    #[test]
    fn test_invalid_order_propagates() {
        let mut problem = pulse_1d();
        problem.order = 3;
        assert!(WaveSolver::new(problem, pulse_init).is_err());
    }
}
