// crates/mw_physics/tests/operator_tests.rs

//! 算子构造与组合的数学性质测试
//!
//! 覆盖：常数湮灭、组合形状/交换律/结合律、
//! Kronecker 和与直接二维模板组装的一致性。

use mw_physics::{
    combine, laplacian_1d, laplacian_2d, robin_bc_1d, scale, CsrBuilder, CsrMatrix,
};

/// 对所有有效 (order, cells, spacing)，拉普拉斯湮灭常数场
#[test]
fn laplacian_annihilates_constant_fields() {
    let cases = [
        (2usize, 8usize, 0.1f64),
        (2, 16, 0.5),
        (4, 16, 0.25),
        (4, 101, 3.0 / 101.0),
        (6, 24, 0.125),
    ];
    for (order, cells, spacing) in cases {
        let l = laplacian_1d(order, cells, spacing).unwrap();
        let u = vec![3.25; cells + 2];
        let mut lu = vec![0.0; cells + 2];
        l.mul_vec(&u, &mut lu);
        for (i, &v) in lu.iter().enumerate() {
            assert!(
                v.abs() < 1e-7,
                "order={order} cells={cells} 行 {i}: {v}"
            );
        }
    }
}

/// combined = Laplacian + RobinBC 与 Laplacian 同形
#[test]
fn combined_operator_keeps_laplacian_shape() {
    let l = laplacian_1d(4, 20, 0.1).unwrap();
    let bc = robin_bc_1d(4, 20, 0.1, 1.0, 0.0).unwrap();
    let combined = combine(&l, &bc).unwrap();
    assert_eq!(combined.shape(), l.shape());
}

/// 组合在浮点容差内交换、结合
#[test]
fn combine_commutative_and_associative() {
    let l = laplacian_1d(2, 10, 0.3).unwrap();
    let bc = robin_bc_1d(2, 10, 0.3, 2.0, 0.5).unwrap();
    let third = scale(&l, 0.25);

    let ab = combine(&l, &bc).unwrap();
    let ba = combine(&bc, &l).unwrap();
    let ab_c = combine(&ab, &third).unwrap();
    let a_bc = combine(&l, &combine(&bc, &third).unwrap()).unwrap();

    let n = l.shape().0;
    for row in 0..n {
        for col in 0..n {
            assert!((ab.get(row, col) - ba.get(row, col)).abs() < 1e-12);
            assert!((ab_c.get(row, col) - a_bc.get(row, col)).abs() < 1e-12);
        }
    }
}

/// 形状不一致的组合以 DimensionMismatch 报错并点名两个形状
#[test]
fn combine_rejects_mismatched_shapes() {
    let a = laplacian_1d(2, 10, 0.1).unwrap();
    let b = laplacian_1d(2, 12, 0.1).unwrap();
    let err = combine(&a, &b).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("12x12"));
    assert!(msg.contains("14x14"));
}

/// 一维二阶拉普拉斯的参考行（m = 5）
fn reference_rows_1d(spacing: f64) -> Vec<Vec<f64>> {
    let s = spacing * spacing;
    let m = 5;
    let mut rows = vec![vec![0.0; m + 2]; m + 2];
    rows[1][0] = 8.0 / 3.0 / s;
    rows[1][1] = -4.0 / s;
    rows[1][2] = 4.0 / 3.0 / s;
    for i in 2..=m - 1 {
        rows[i][i - 1] = 1.0 / s;
        rows[i][i] = -2.0 / s;
        rows[i][i + 1] = 1.0 / s;
    }
    rows[m][m - 1] = 4.0 / 3.0 / s;
    rows[m][m] = -4.0 / s;
    rows[m][m + 1] = 8.0 / 3.0 / s;
    rows
}

/// 一维算子逐行等于参考模板
#[test]
fn laplacian_1d_matches_reference_stencil() {
    let dx = 0.2;
    let l = laplacian_1d(2, 5, dx).unwrap();
    let reference = reference_rows_1d(dx);
    for (row, ref_row) in reference.iter().enumerate() {
        for (col, &expected) in ref_row.iter().enumerate() {
            assert!(
                (l.get(row, col) - expected).abs() < 1e-10,
                "({row},{col}): {} vs {expected}",
                l.get(row, col)
            );
        }
    }
}

/// Kronecker 和组装与直接二维模板组装一致（5×5 单元、2 阶、1e-10）
#[test]
fn laplacian_2d_kron_matches_direct_assembly() {
    let (dx, dy) = (0.2, 0.25);
    let m = 5;
    let nx = m + 2;
    let l2 = laplacian_2d(2, m, dx, m, dy).unwrap();

    // 直接组装：节点 (iy, ix) 行 = x 方向参考行铺在第 iy 行
    //           + y 方向参考行铺在第 ix 列
    let rows_x = reference_rows_1d(dx);
    let rows_y = reference_rows_1d(dy);
    let n = nx * nx;
    let mut direct = CsrBuilder::new(n, n);
    for iy in 0..nx {
        for ix in 0..nx {
            let row = iy * nx + ix;
            for (jx, &w) in rows_x[ix].iter().enumerate() {
                if w != 0.0 {
                    direct.add(row, iy * nx + jx, w);
                }
            }
            for (jy, &w) in rows_y[iy].iter().enumerate() {
                if w != 0.0 {
                    direct.add(row, jy * nx + ix, w);
                }
            }
        }
    }
    let direct: CsrMatrix = direct.build();

    for row in 0..n {
        for col in 0..n {
            assert!(
                (l2.get(row, col) - direct.get(row, col)).abs() < 1e-10,
                "({row},{col}): kron={} direct={}",
                l2.get(row, col),
                direct.get(row, col)
            );
        }
    }
}

/// 二维拉普拉斯也湮灭常数
#[test]
fn laplacian_2d_annihilates_constants() {
    let l = laplacian_2d(4, 16, 0.1, 16, 0.15).unwrap();
    let n = 18 * 18;
    let u = vec![-2.0; n];
    let mut lu = vec![0.0; n];
    l.mul_vec(&u, &mut lu);
    for &v in &lu {
        assert!(v.abs() < 1e-7, "{v}");
    }
}
