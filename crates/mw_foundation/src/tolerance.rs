// crates/mw_foundation/src/tolerance.rs

//! 数值容差配置
//!
//! 包含数值比较中使用的容差阈值，以及浮点比较辅助函数。
//! 容差通过参数注入传递，不使用全局状态。

use serde::{Deserialize, Serialize};

/// 数值容差配置
///
/// 所有字段均为绝对容差。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tolerance {
    /// 矩阵元素比较容差
    pub matrix_eq: f64,
    /// 权重求和容差（凸组合权重 wA+wB=1 的检查）
    pub weight_sum: f64,
    /// 空间坐标容差
    pub spatial: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            matrix_eq: 1e-10,
            weight_sum: 1e-12,
            spatial: 1e-14,
        }
    }
}

/// 绝对容差浮点比较
#[inline]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// 两个切片的最大逐元素绝对差
///
/// 长度不同则返回 `f64::INFINITY`。
#[inline]
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y).abs())
        .fold(0.0, f64::max)
}
