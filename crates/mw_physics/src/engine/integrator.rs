// crates/mw_physics/src/engine/integrator.rs

//! 显式辛时间积分器
//!
//! 实现两种显式、时间可逆、保辛的格式，用于推进
//! `(u, v)` 位移/速度场对：
//!
//! ## Position Verlet（二阶）
//!
//! ```text
//! u ← u + (dt/2)·v        （插值模式: u ← u + I2s·v）
//! v ← v + dt·F(u)         （插值模式: v ← v + Is·F(u)）
//! u ← u + (dt/2)·v
//! ```
//!
//! ## Forest-Ruth（四阶）
//!
//! 取 θ = 1/(2 − 2^{1/3})，位移子步系数 θ/2, (1−θ)/2, (1−θ)/2, θ/2，
//! 速度子步系数 θ, 1−2θ, θ（均乘 dt）。每个速度子步都从刚更新过的
//! 位移重新计算力，不做缓存：格式的精度依赖于始终以当前位置施力。
//!
//! 其中 `F(u) = c² · combined · u`。两种格式均保持相空间体积，
//! 除 `(u, v)` 外不携带任何跨步状态。
//!
//! ## 参考文献
//!
//! 1. Forest, E., & Ruth, R. D. (1990). Fourth-order symplectic
//!    integration. Physica D, 43(1), 105-117.
//! 2. Young, P. (2014). The leapfrog method and other "symplectic"
//!    algorithms for integrating Newton's laws of motion (lecture notes).

use crate::engine::step_ops::StepOperators;
use crate::numerics::vector_ops;
use crate::state::WaveState;
use mw_foundation::error::MwResult;
use std::fmt;

/// 辛积分器 trait
///
/// 一次 `advance` 调用恰好推进一个时间步。
pub trait SymplecticIntegrator: Send {
    /// 积分器名称
    fn name(&self) -> &'static str;

    /// 时间精度阶数
    fn order(&self) -> u8;

    /// 推进一个时间步（原地修改 state）
    fn advance(&mut self, state: &mut WaveState, ops: &StepOperators) -> MwResult<()>;
}

/// Forest-Ruth 系数 θ = 1/(2 − 2^{1/3})
#[inline]
fn forest_ruth_theta() -> f64 {
    1.0 / (2.0 - 2.0_f64.cbrt())
}

/// 位移子步：`u += frac·(dt/2)·v`（插值模式: `u += frac·I2s·v`）
///
/// `frac` 以半步为单位，Verlet 取 1。
fn displace(ops: &StepOperators, state: &mut WaveState, frac: f64, stage: &mut [f64]) {
    match ops.interp() {
        None => vector_ops::axpy(frac * 0.5 * ops.dt(), &state.v, &mut state.u),
        Some(p) => {
            let stage = &mut stage[..state.u.len()];
            p.i2_half.mul_vec(&state.v, stage);
            vector_ops::axpy(frac, stage, &mut state.u);
        }
    }
}

/// 速度子步：`v += frac·dt·F(u)`（插值模式: `v += frac·Is·F(u)`）
///
/// 力始终从当前 `u` 重新计算。
fn kick(
    ops: &StepOperators,
    state: &mut WaveState,
    frac: f64,
    force: &mut [f64],
    stage: &mut [f64],
) {
    ops.force(&state.u, force);
    match ops.interp() {
        None => vector_ops::axpy(frac * ops.dt(), force, &mut state.v),
        Some(p) => {
            let stage = &mut stage[..state.v.len()];
            p.i_dt.mul_vec(force, stage);
            vector_ops::axpy(frac, stage, &mut state.v);
        }
    }
}

// ============================================================
// Position Verlet
// ============================================================

/// Position Verlet 积分器（二阶）
pub struct PositionVerlet {
    force_buf: Vec<f64>,
    stage_buf: Vec<f64>,
}

impl PositionVerlet {
    /// 按算子包尺寸预分配工作缓冲区
    pub fn for_operators(ops: &StepOperators) -> Self {
        let n = ops.displacement_len();
        let f = ops.velocity_len();
        Self {
            force_buf: vec![0.0; n],
            stage_buf: vec![0.0; n.max(f)],
        }
    }
}

impl SymplecticIntegrator for PositionVerlet {
    fn name(&self) -> &'static str {
        "PositionVerlet"
    }

    fn order(&self) -> u8 {
        2
    }

    fn advance(&mut self, state: &mut WaveState, ops: &StepOperators) -> MwResult<()> {
        ops.check_state(state)?;

        displace(ops, state, 1.0, &mut self.stage_buf);
        kick(ops, state, 1.0, &mut self.force_buf, &mut self.stage_buf);
        displace(ops, state, 1.0, &mut self.stage_buf);

        Ok(())
    }
}

// ============================================================
// Forest-Ruth
// ============================================================

/// Forest-Ruth 积分器（四阶）
pub struct ForestRuth {
    force_buf: Vec<f64>,
    stage_buf: Vec<f64>,
}

impl ForestRuth {
    /// 按算子包尺寸预分配工作缓冲区
    pub fn for_operators(ops: &StepOperators) -> Self {
        let n = ops.displacement_len();
        let f = ops.velocity_len();
        Self {
            force_buf: vec![0.0; n],
            stage_buf: vec![0.0; n.max(f)],
        }
    }
}

impl SymplecticIntegrator for ForestRuth {
    fn name(&self) -> &'static str {
        "ForestRuth"
    }

    fn order(&self) -> u8 {
        4
    }

    fn advance(&mut self, state: &mut WaveState, ops: &StepOperators) -> MwResult<()> {
        ops.check_state(state)?;
        let theta = forest_ruth_theta();

        displace(ops, state, theta, &mut self.stage_buf);
        kick(ops, state, theta, &mut self.force_buf, &mut self.stage_buf);

        displace(ops, state, 1.0 - theta, &mut self.stage_buf);
        kick(
            ops,
            state,
            1.0 - 2.0 * theta,
            &mut self.force_buf,
            &mut self.stage_buf,
        );

        displace(ops, state, 1.0 - theta, &mut self.stage_buf);
        kick(ops, state, theta, &mut self.force_buf, &mut self.stage_buf);

        displace(ops, state, theta, &mut self.stage_buf);

        Ok(())
    }
}

// ============================================================
// 类型选择
// ============================================================

/// 积分器类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorKind {
    /// 二阶 Position Verlet（默认）
    #[default]
    PositionVerlet,
    /// 四阶 Forest-Ruth
    ForestRuth,
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionVerlet => write!(f, "PositionVerlet"),
            Self::ForestRuth => write!(f, "ForestRuth"),
        }
    }
}

/// 创建积分器，工作缓冲区按算子包尺寸分配
pub fn create_integrator(
    kind: IntegratorKind,
    ops: &StepOperators,
) -> Box<dyn SymplecticIntegrator> {
    match kind {
        IntegratorKind::PositionVerlet => Box::new(PositionVerlet::for_operators(ops)),
        IntegratorKind::ForestRuth => Box::new(ForestRuth::for_operators(ops)),
    }
}
