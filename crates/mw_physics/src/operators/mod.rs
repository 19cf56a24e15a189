// crates/mw_physics/src/operators/mod.rs

//! 稀疏差分算子构造与组合
//!
//! 所有构造函数为纯函数，返回不可变 CSR 矩阵；
//! 参数非法（阶数超表、单元数/步长非正）一律在构造期报
//! `InvalidParameter`，绝不返回残缺算子。
//!
//! - [`gradient`] / [`divergence`]: 一维交错拟态一阶算子
//! - [`laplacian_1d`] / [`laplacian_2d`]: 拉普拉斯算子（二维为 Kronecker 和）
//! - [`robin_bc_1d`] / [`robin_bc_2d`]: Robin 边界条件修正算子
//! - [`interpolation_1d`] / [`interpolation_2d`]: 交错表示间的插值算子
//! - [`combine`] / [`scale`]: 算子组合（逐元素求和、数乘）

mod combine;
mod divergence;
mod gradient;
mod interpol;
mod laplacian;
mod robin;

pub use combine::{combine, scale};
pub use divergence::divergence;
pub use gradient::gradient;
pub use interpol::{face_space_len, interpolation_1d, interpolation_2d, InterpolKind};
pub use laplacian::{laplacian_1d, laplacian_2d};
pub use robin::{robin_bc_1d, robin_bc_2d};

use mw_foundation::error::{MwError, MwResult};

/// 算子构造公共参数检查
pub(crate) fn check_axis(order: usize, cells: usize, spacing: f64) -> MwResult<()> {
    crate::numerics::stencil::validate_order(order)?;
    if cells < 2 * order {
        return Err(MwError::invalid_parameter(
            "cells",
            format!("阶数 {order} 的算子至少需要 {} 个单元，实际 {cells}", 2 * order),
        ));
    }
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(MwError::invalid_parameter(
            "spacing",
            format!("步长必须为正有限值，实际 {spacing}"),
        ));
    }
    Ok(())
}
