// crates/mw_physics/src/operators/divergence.rs

//! 一维交错拟态散度算子
//!
//! 将 `cells + 1` 维的面表示映射到 `cells + 2` 维的节点表示。
//! 首末两行（鬼点行）恒为零；内部单元中心使用交错中心差分，
//! 靠近边界的单元使用构造期推导的单侧闭合。

use crate::numerics::csr::{CsrBuilder, CsrMatrix};
use crate::numerics::stencil;
use mw_foundation::error::MwResult;

/// 构造一维拟态散度算子，形状 `(cells+2) x (cells+1)`
pub fn divergence(order: usize, cells: usize, spacing: f64) -> MwResult<CsrMatrix> {
    super::check_axis(order, cells, spacing)?;

    let m = cells;
    let half = order / 2;
    let interior = stencil::interior_coeffs(order)?;
    let mut builder = CsrBuilder::new(m + 2, m + 1);

    // 行 0 与行 m+1 保持为零（鬼点行）
    for i in 1..=m {
        let center = i as f64 - 0.5;
        if i >= half && i <= m + 1 - half {
            // 内部单元：面 i-half ..= i+half-1
            for (t, &w) in interior.iter().enumerate() {
                builder.set(i, i - half + t, w / spacing);
            }
        } else if i < half {
            // 左闭合：最左 order+1 个面
            let offsets: Vec<f64> = (0..=order).map(|f| f as f64 - center).collect();
            let weights = stencil::derivative_weights(&offsets)?;
            for (t, &w) in weights.iter().enumerate() {
                builder.set(i, t, w / spacing);
            }
        } else {
            // 右闭合：最右 order+1 个面
            let first_face = m - order;
            let offsets: Vec<f64> = (first_face..=m).map(|f| f as f64 - center).collect();
            let weights = stencil::derivative_weights(&offsets)?;
            for (t, &w) in weights.iter().enumerate() {
                builder.set(i, first_face + t, w / spacing);
            }
        }
    }

    Ok(builder.build())
}
