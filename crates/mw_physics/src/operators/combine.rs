// crates/mw_physics/src/operators/combine.rs

//! 算子组合
//!
//! 求解循环用这里的两个函数把构造好的算子装配成可直接应用的
//! 更新矩阵：`combine` 形成有效空间算子 `Laplacian + RobinBC`，
//! `scale` 把插值算子乘上时间步长。两个操作都保持稀疏模式
//! （求和取模式并集），绝不稠密化。

use crate::numerics::csr::CsrMatrix;
use mw_foundation::error::{MwError, MwResult};

/// 逐元素稀疏求和 `combined = a + b`
///
/// 两算子形状必须一致，否则 `DimensionMismatch`。
pub fn combine(a: &CsrMatrix, b: &CsrMatrix) -> MwResult<CsrMatrix> {
    if a.shape() != b.shape() {
        return Err(MwError::dimension_mismatch("算子组合", a.shape(), b.shape()));
    }
    a.add(b)
}

/// 数乘 `factor · a`（形状与稀疏模式保持不变）
pub fn scale(a: &CsrMatrix, factor: f64) -> CsrMatrix {
    let mut out = a.clone();
    out.scale(factor);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::csr::CsrBuilder;

    #[test]
    fn test_combine_shape_check() {
        let a = CsrMatrix::identity(4);
        let b = CsrMatrix::identity(5);
        let err = combine(&a, &b).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("4x4"));
        assert!(msg.contains("5x5"));
    }

    #[test]
    fn test_combine_commutative() {
        let mut a = CsrBuilder::new_square(3);
        a.set(0, 1, 2.0);
        a.set(2, 2, -1.0);
        let a = a.build();

        let mut b = CsrBuilder::new_square(3);
        b.set(0, 1, 0.5);
        b.set(1, 0, 3.0);
        let b = b.build();

        let ab = combine(&a, &b).unwrap();
        let ba = combine(&b, &a).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                assert!((ab.get(row, col) - ba.get(row, col)).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_scale_preserves_shape_and_pattern() {
        let mut a = CsrBuilder::new(2, 3);
        a.set(0, 0, 1.0);
        a.set(1, 2, -2.0);
        let a = a.build();

        let s = scale(&a, 0.5);
        assert_eq!(s.shape(), a.shape());
        assert_eq!(s.nnz(), a.nnz());
        assert!((s.get(0, 0) - 0.5).abs() < 1e-14);
        assert!((s.get(1, 2) + 1.0).abs() < 1e-14);
    }
}
