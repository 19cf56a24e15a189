// crates/mw_physics/src/operators/gradient.rs

//! 一维交错拟态梯度算子
//!
//! 将 `cells + 2` 维的节点表示（边界 + 单元中心）映射到
//! `cells + 1` 维的面表示。内部面使用指定阶数的交错中心差分；
//! 两端各 `order/2` 个面使用构造期推导的单侧闭合。

use crate::numerics::csr::{CsrBuilder, CsrMatrix};
use crate::numerics::stencil;
use mw_foundation::error::MwResult;

/// 样本点坐标（单位 Δ）：列 0 为左边界，列 1..=m 为单元中心，列 m+1 为右边界
#[inline]
fn sample_coord(col: usize, cells: usize) -> f64 {
    if col == 0 {
        0.0
    } else if col == cells + 1 {
        cells as f64
    } else {
        col as f64 - 0.5
    }
}

/// 构造一维拟态梯度算子，形状 `(cells+1) x (cells+2)`
pub fn gradient(order: usize, cells: usize, spacing: f64) -> MwResult<CsrMatrix> {
    super::check_axis(order, cells, spacing)?;

    let m = cells;
    let half = order / 2;
    let interior = stencil::interior_coeffs(order)?;
    let mut builder = CsrBuilder::new(m + 1, m + 2);

    // 左闭合面 j = 0..half，采样最左 order+1 个点
    for j in 0..half {
        let face = j as f64;
        let offsets: Vec<f64> = (0..=order).map(|c| sample_coord(c, m) - face).collect();
        let weights = stencil::derivative_weights(&offsets)?;
        for (c, &w) in weights.iter().enumerate() {
            builder.set(j, c, w / spacing);
        }
    }

    // 内部面 j = half..=m-half，面 j 两侧各 order/2 个单元中心
    for j in half..=m - half {
        for (t, &w) in interior.iter().enumerate() {
            builder.set(j, j - half + 1 + t, w / spacing);
        }
    }

    // 右闭合面 j = m-half+1..=m，采样最右 order+1 个点
    for j in m - half + 1..=m {
        let face = j as f64;
        let first_col = m + 1 - order;
        let offsets: Vec<f64> = (first_col..=m + 1)
            .map(|c| sample_coord(c, m) - face)
            .collect();
        let weights = stencil::derivative_weights(&offsets)?;
        for (t, &w) in weights.iter().enumerate() {
            builder.set(j, first_col + t, w / spacing);
        }
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_boundary_row_order2() {
        let g = gradient(2, 5, 1.0).unwrap();
        assert_eq!(g.shape(), (6, 7));

        // 已发表的二阶闭合 [-8/3, 3, -1/3]
        assert!((g.get(0, 0) + 8.0 / 3.0).abs() < 1e-12);
        assert!((g.get(0, 1) - 3.0).abs() < 1e-12);
        assert!((g.get(0, 2) + 1.0 / 3.0).abs() < 1e-12);

        // 内部面 [-1, 1]
        assert!((g.get(2, 2) + 1.0).abs() < 1e-12);
        assert!((g.get(2, 3) - 1.0).abs() < 1e-12);

        // 右端镜像 [1/3, -3, 8/3]
        assert!((g.get(5, 4) - 1.0 / 3.0).abs() < 1e-12);
        assert!((g.get(5, 5) + 3.0).abs() < 1e-12);
        assert!((g.get(5, 6) - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_on_linear_field() {
        // u(x) = 3x + 1 在任意阶数下梯度处处为 3
        for &order in stencil::SUPPORTED_ORDERS {
            let m = 2 * order + 3;
            let dx = 0.25;
            let g = gradient(order, m, dx).unwrap();

            let u: Vec<f64> = (0..m + 2)
                .map(|c| 3.0 * (sample_coord(c, m) * dx) + 1.0)
                .collect();
            let mut du = vec![0.0; m + 1];
            g.mul_vec(&u, &mut du);

            for (j, &d) in du.iter().enumerate() {
                assert!(
                    (d - 3.0).abs() < 1e-8,
                    "阶数 {order} 面 {j}: 期望 3, 实际 {d}"
                );
            }
        }
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(gradient(3, 20, 1.0).is_err());
        assert!(gradient(2, 3, 1.0).is_err());
        assert!(gradient(2, 20, 0.0).is_err());
        assert!(gradient(2, 20, -1.0).is_err());
    }
}
