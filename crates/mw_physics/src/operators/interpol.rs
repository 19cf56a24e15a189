// crates/mw_physics/src/operators/interpol.rs

//! 交错表示间的插值算子
//!
//! 两种显式命名的变体（取代布尔标志）：
//!
//! - [`InterpolKind::CentersToFaces`]: 节点表示（边界 + 单元中心，
//!   `cells+2` 维）→ 面表示（`cells+1` 维；二维为
//!   `2·mx·my + mx + my` 维的交错面空间）
//! - [`InterpolKind::FacesToCenters`]: 反向映射；二维时带 1/2 因子，
//!   对 x、y 两个面族取平均
//!
//! 内部自由度用凸组合权重 `(wA, wB)` 做两点平均，边界自由度直接
//! 取对应边界值。两个变体的形状互相转置兼容，保证与
//! `Laplacian + RobinBC` 的复合在维度上一致；构造期显式校验，
//! 不一致时以 `DimensionMismatch` 报告涉及的两个形状。

use crate::numerics::csr::{hstack, vstack, CsrBuilder, CsrMatrix};
use mw_foundation::error::{MwError, MwResult};
use std::fmt;

/// 插值变体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolKind {
    /// 节点表示 → 面表示
    CentersToFaces,
    /// 面表示 → 节点表示
    FacesToCenters,
}

impl fmt::Display for InterpolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CentersToFaces => write!(f, "centers-to-faces"),
            Self::FacesToCenters => write!(f, "faces-to-centers"),
        }
    }
}

/// 二维交错面空间维数: x 面族 `(mx+1)·my` + y 面族 `mx·(my+1)`
#[inline]
pub fn face_space_len(cells_x: usize, cells_y: usize) -> usize {
    2 * cells_x * cells_y + cells_x + cells_y
}

fn check_params(cells: usize, weight_a: f64, weight_b: f64) -> MwResult<()> {
    if cells == 0 {
        return Err(MwError::invalid_parameter("cells", "单元数必须至少为 1"));
    }
    if !weight_a.is_finite() || !weight_b.is_finite() {
        return Err(MwError::invalid_parameter(
            "weights",
            format!("插值权重必须为有限值，实际 ({weight_a}, {weight_b})"),
        ));
    }
    Ok(())
}

/// 一维节点 → 面，形状 `(m+1) x (m+2)`
fn centers_to_faces_1d(m: usize, wa: f64, wb: f64) -> CsrMatrix {
    let mut builder = CsrBuilder::new(m + 1, m + 2);
    builder.set(0, 0, 1.0);
    builder.set(m, m + 1, 1.0);
    for j in 1..m {
        builder.set(j, j, wa);
        builder.set(j, j + 1, wb);
    }
    builder.build()
}

/// 一维面 → 节点，形状 `(m+2) x (m+1)`
fn faces_to_centers_1d(m: usize, wa: f64, wb: f64) -> CsrMatrix {
    let mut builder = CsrBuilder::new(m + 2, m + 1);
    builder.set(0, 0, 1.0);
    builder.set(m + 1, m, 1.0);
    for i in 1..=m {
        builder.set(i, i - 1, wa);
        builder.set(i, i, wb);
    }
    builder.build()
}

/// 去掉首末两行的单位阵，形状 `m x (m+2)`（选出单元中心行）
fn interior_row_selector(m: usize) -> CsrMatrix {
    let mut builder = CsrBuilder::new(m, m + 2);
    for i in 0..m {
        builder.set(i, i + 1, 1.0);
    }
    builder.build()
}

/// 去掉首末两列的单位阵，形状 `(m+2) x m`（注入单元中心行）
fn interior_col_injector(m: usize) -> CsrMatrix {
    let mut builder = CsrBuilder::new(m + 2, m);
    for i in 0..m {
        builder.set(i + 1, i, 1.0);
    }
    builder.build()
}

/// 一维插值算子
pub fn interpolation_1d(
    kind: InterpolKind,
    cells: usize,
    weight_a: f64,
    weight_b: f64,
) -> MwResult<CsrMatrix> {
    check_params(cells, weight_a, weight_b)?;
    Ok(match kind {
        InterpolKind::CentersToFaces => centers_to_faces_1d(cells, weight_a, weight_b),
        InterpolKind::FacesToCenters => faces_to_centers_1d(cells, weight_a, weight_b),
    })
}

/// 二维插值算子
///
/// `CentersToFaces`: `(2·mx·my+mx+my) x N`；
/// `FacesToCenters`: `N x (2·mx·my+mx+my)`，其中 `N = (mx+2)·(my+2)`。
pub fn interpolation_2d(
    kind: InterpolKind,
    cells_x: usize,
    cells_y: usize,
    weight_a: f64,
    weight_b: f64,
) -> MwResult<CsrMatrix> {
    check_params(cells_x, weight_a, weight_b)?;
    check_params(cells_y, weight_a, weight_b)?;

    let (mx, my) = (cells_x, cells_y);
    let nodes = (mx + 2) * (my + 2);
    let faces = face_space_len(mx, my);

    let built = match kind {
        InterpolKind::CentersToFaces => {
            let ix = centers_to_faces_1d(mx, weight_a, weight_b);
            let iy = centers_to_faces_1d(my, weight_a, weight_b);
            let sel_y = interior_row_selector(my);
            let sel_x = interior_row_selector(mx);

            // x 面族：对每个内部 y 行沿 x 插值；y 面族对称
            let sx = sel_y.kron(&ix);
            let sy = iy.kron(&sel_x);
            vstack(&[&sx, &sy])?
        }
        InterpolKind::FacesToCenters => {
            let ix = faces_to_centers_1d(mx, weight_a, weight_b);
            let iy = faces_to_centers_1d(my, weight_a, weight_b);
            let inj_y = interior_col_injector(my);
            let inj_x = interior_col_injector(mx);

            let sx = inj_y.kron(&ix);
            let sy = iy.kron(&inj_x);
            let mut joined = hstack(&[&sx, &sy])?;
            // 两个面族取平均
            joined.scale(0.5);
            joined
        }
    };

    // 构造期形状校验：两个变体必须与节点/面空间维数互相兼容
    let expected = match kind {
        InterpolKind::CentersToFaces => (faces, nodes),
        InterpolKind::FacesToCenters => (nodes, faces),
    };
    if built.shape() != expected {
        return Err(MwError::dimension_mismatch(
            "二维插值算子组装",
            built.shape(),
            expected,
        ));
    }

    Ok(built)
}
