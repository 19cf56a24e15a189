// crates/mw_physics/src/numerics/stencil.rs

//! 交错网格差分系数
//!
//! 提供拟态算子构造所需的两类一阶导数系数：
//!
//! 1. **内部系数表**: 交错中心差分权重（单位 1/Δ），按精度阶数查表。
//!    仅表中存在的阶数有效，其余阶数在构造期报 `InvalidParameter`。
//! 2. **边界闭合推导**: 靠近边界处中心模板放不下，改用单侧闭合。
//!    闭合权重在构造期通过求解小型 Vandermonde 精确性方程组得到：
//!    对 n 个采样点要求对次数 ≤ n-1 的多项式精确求导，
//!    得到唯一的 n 点单侧公式，截断误差阶与采样点数匹配。
//!    阶数 2 时该推导精确复现已发表的拟态闭合 `[-8/3, 3, -1/3]/Δ`。

use mw_foundation::error::{MwError, MwResult};

/// 已定义系数表的精度阶数
pub const SUPPORTED_ORDERS: &[usize] = &[2, 4, 6];

/// 交错中心差分内部权重（单位 1/Δ）
///
/// 采样点位于目标点两侧 ±Δ/2, ±3Δ/2, ... 处。
const INTERIOR_ORDER2: [f64; 2] = [-1.0, 1.0];
const INTERIOR_ORDER4: [f64; 4] = [1.0 / 24.0, -9.0 / 8.0, 9.0 / 8.0, -1.0 / 24.0];
const INTERIOR_ORDER6: [f64; 6] = [
    -3.0 / 640.0,
    25.0 / 384.0,
    -75.0 / 64.0,
    75.0 / 64.0,
    -25.0 / 384.0,
    3.0 / 640.0,
];

/// 校验精度阶数
///
/// 只接受系数表中定义的偶数阶，其余一律 `InvalidParameter`。
pub fn validate_order(order: usize) -> MwResult<()> {
    if SUPPORTED_ORDERS.contains(&order) {
        Ok(())
    } else {
        Err(MwError::invalid_parameter(
            "order",
            format!("{order} 不在支持的阶数表 {SUPPORTED_ORDERS:?} 中"),
        ))
    }
}

/// 获取指定阶数的交错中心差分内部权重
pub fn interior_coeffs(order: usize) -> MwResult<&'static [f64]> {
    validate_order(order)?;
    Ok(match order {
        2 => &INTERIOR_ORDER2,
        4 => &INTERIOR_ORDER4,
        6 => &INTERIOR_ORDER6,
        _ => unreachable!("validate_order 已拒绝表外阶数"),
    })
}

/// 推导单侧一阶导数闭合权重
///
/// `offsets[i]` 为第 i 个采样点相对目标点的偏移（单位 Δ）。
/// 返回权重 w（单位 1/Δ），满足对次数 ≤ n-1 的多项式
/// Σᵢ wᵢ·p(ξᵢ) = p'(0) 精确成立。
///
/// # 失败
///
/// 采样点重复导致 Vandermonde 矩阵奇异时返回 `Internal`。
pub fn derivative_weights(offsets: &[f64]) -> MwResult<Vec<f64>> {
    let n = offsets.len();
    if n < 2 {
        return Err(MwError::invalid_parameter(
            "offsets",
            "闭合模板至少需要两个采样点",
        ));
    }

    // 条件: Σᵢ wᵢ·ξᵢᵖ = δ_{p,1}, p = 0..n-1
    let mut matrix = vec![vec![0.0f64; n]; n];
    let mut rhs = vec![0.0f64; n];
    for (p, row) in matrix.iter_mut().enumerate() {
        for (i, &xi) in offsets.iter().enumerate() {
            row[i] = xi.powi(p as i32);
        }
        rhs[p] = if p == 1 { 1.0 } else { 0.0 };
    }

    solve_linear(matrix, rhs)
}

/// 列主元 Gauss 消去求解稠密线性方程组
///
/// 仅用于构造期的小规模（阶数+1 维）闭合权重方程组。
fn solve_linear(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> MwResult<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        // 选列主元
        let mut pivot_row = col;
        let mut pivot_val = a[col][col].abs();
        for (row, a_row) in a.iter().enumerate().skip(col + 1) {
            if a_row[col].abs() > pivot_val {
                pivot_val = a_row[col].abs();
                pivot_row = row;
            }
        }
        if pivot_val < 1e-14 {
            return Err(MwError::internal("闭合权重方程组奇异：采样点退化"));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        // 消去下方行（先拷出主元行，避免别名借用）
        let pivot = a[col].clone();
        let b_pivot = b[col];
        for row in col + 1..n {
            let factor = a[row][col] / pivot[col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * pivot[k];
            }
            b[row] -= factor * b_pivot;
        }
    }

    // 回代
    let mut x = vec![0.0f64; n];
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in row + 1..n {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }
    Ok(x)
}
