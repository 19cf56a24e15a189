// crates/mw_physics/src/lib.rs

//! 波动方程数值引擎
//!
//! 在均匀交错网格上构造高阶拟态（mimetic）差分算子，
//! 并用显式辛积分器推进二阶波动方程的半离散系统。包括：
//!
//! - 网格描述 (grid)
//! - 稀疏矩阵与数值核 (numerics)
//! - 算子构造与组合 (operators) - 拉普拉斯、Robin 边界修正、交错插值
//! - 引擎核心 (engine) - 辛积分器、CFL 步长推导、求解循环
//! - 场状态管理 (state)
//!
//! # 数据流
//!
//! 网格 → 算子构造 → 算子组合 → 积分器 ← 求解循环，
//! 求解循环同时向外部消费者发出只读快照。

pub mod engine;
pub mod grid;
pub mod numerics;
pub mod operators;
pub mod state;

// 重导出常用类型
pub use engine::{
    cfl_time_step, create_integrator, step_count, ForestRuth, IntegratorKind, PositionVerlet,
    RunSummary, StepOperators, SymplecticIntegrator, WaveProblem, WaveSolver,
};
pub use grid::{Grid, GridAxis};
pub use numerics::csr::{CsrBuilder, CsrMatrix};
pub use operators::{
    combine, divergence, face_space_len, gradient, interpolation_1d, interpolation_2d,
    laplacian_1d, laplacian_2d, robin_bc_1d, robin_bc_2d, scale, InterpolKind,
};
pub use state::WaveState;
