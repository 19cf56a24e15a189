// crates/mw_physics/src/engine/mod.rs

//! 引擎核心
//!
//! - [`step_ops`]: 单步更新所需的算子包（组合算子 + 缩放插值对）
//! - [`integrator`]: 显式辛积分器（Position Verlet / Forest-Ruth）
//! - [`cfl`]: CFL 稳定步长推导
//! - [`solver`]: 求解循环（快照发出、协作取消）

pub mod cfl;
pub mod integrator;
pub mod solver;
pub mod step_ops;

pub use cfl::{cfl_time_step, step_count};
pub use integrator::{
    create_integrator, ForestRuth, IntegratorKind, PositionVerlet, SymplecticIntegrator,
};
pub use solver::{RunSummary, WaveProblem, WaveSolver};
pub use step_ops::StepOperators;
