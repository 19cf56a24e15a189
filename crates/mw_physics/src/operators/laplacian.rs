// crates/mw_physics/src/operators/laplacian.rs

//! 高阶拟态拉普拉斯算子
//!
//! 一维算子由散度与梯度复合而成 `L = D · G`，继承两者的
//! 单侧边界闭合；首末两行（鬼点行）为零，因此离散拉普拉斯
//! 天然湮灭常数场。二维算子按 Kronecker 和
//! `I_y ⊗ Lx + Ly ⊗ I_x` 组装（行主序展平，x 索引最快），
//! 离散地保持连续算子的可分性。

use crate::numerics::csr::CsrMatrix;
use crate::operators::{divergence, gradient};
use mw_foundation::error::MwResult;

/// 一维拉普拉斯算子，形状 `(cells+2) x (cells+2)`
pub fn laplacian_1d(order: usize, cells: usize, spacing: f64) -> MwResult<CsrMatrix> {
    let d = divergence(order, cells, spacing)?;
    let g = gradient(order, cells, spacing)?;
    d.matmul(&g)
}

/// 二维拉普拉斯算子（Kronecker 和），形状 `N x N`，
/// 其中 `N = (cells_x+2)·(cells_y+2)`
pub fn laplacian_2d(
    order: usize,
    cells_x: usize,
    spacing_x: f64,
    cells_y: usize,
    spacing_y: f64,
) -> MwResult<CsrMatrix> {
    let lx = laplacian_1d(order, cells_x, spacing_x)?;
    let ly = laplacian_1d(order, cells_y, spacing_y)?;
    let ix = CsrMatrix::identity(cells_x + 2);
    let iy = CsrMatrix::identity(cells_y + 2);

    iy.kron(&lx).add(&ly.kron(&ix))
}
