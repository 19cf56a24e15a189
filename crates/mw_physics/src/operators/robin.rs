// crates/mw_physics/src/operators/robin.rs

//! Robin 边界条件修正算子
//!
//! 构造与拉普拉斯同形的稀疏算子 `BC = A + B·G`，加到拉普拉斯上后，
//! 组合模板在边界行与齐次 Robin 条件 `α·u + β·∂u/∂n = 0` 一致。
//! `A` 在两个边界对角元处取 α；`B` 将法向导数（由拟态梯度 `G` 的
//! 边界面行给出）以 ∓β 写入边界行。`α=1, β=0` 退化为 Dirichlet。
//!
//! 非齐次数据 `g ≠ 0` 属于加性源向量扩展，此处不涉及。

use crate::numerics::csr::{CsrBuilder, CsrMatrix};
use crate::operators::gradient;
use mw_foundation::error::{MwError, MwResult};

fn check_coeffs(alpha: f64, beta: f64) -> MwResult<()> {
    if !alpha.is_finite() || !beta.is_finite() {
        return Err(MwError::invalid_parameter(
            "robin",
            format!("Robin 系数必须为有限值，实际 ({alpha}, {beta})"),
        ));
    }
    Ok(())
}

/// 一维 Robin 边界修正算子，形状 `(cells+2) x (cells+2)`
pub fn robin_bc_1d(
    order: usize,
    cells: usize,
    spacing: f64,
    alpha: f64,
    beta: f64,
) -> MwResult<CsrMatrix> {
    check_coeffs(alpha, beta)?;
    let g = gradient(order, cells, spacing)?;

    let m = cells;
    let mut a = CsrBuilder::new_square(m + 2);
    a.set(0, 0, alpha);
    a.set(m + 1, m + 1, alpha);

    // 外法向：左端为 -∂/∂x，右端为 +∂/∂x
    let mut b = CsrBuilder::new(m + 2, m + 1);
    b.set(0, 0, -beta);
    b.set(m + 1, m, beta);

    a.build().add(&b.build().matmul(&g)?)
}

/// 二维 Robin 边界修正算子，形状 `N x N`，
/// `N = (cells_x+2)·(cells_y+2)`
///
/// 角点行只接受 y 方向条件：x 方向的 Kronecker 因子使用
/// 去掉两端对角元的单位阵，避免角点条件叠加。
pub fn robin_bc_2d(
    order: usize,
    cells_x: usize,
    spacing_x: f64,
    cells_y: usize,
    spacing_y: f64,
    alpha: f64,
    beta: f64,
) -> MwResult<CsrMatrix> {
    let bx = robin_bc_1d(order, cells_x, spacing_x, alpha, beta)?;
    let by = robin_bc_1d(order, cells_y, spacing_y, alpha, beta)?;
    let ix = CsrMatrix::identity(cells_x + 2);

    let mut iy_hat = CsrBuilder::new_square(cells_y + 2);
    for i in 1..=cells_y {
        iy_hat.set(i, i, 1.0);
    }

    iy_hat.build().kron(&bx).add(&by.kron(&ix))
}
