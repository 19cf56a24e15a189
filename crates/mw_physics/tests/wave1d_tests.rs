// crates/mw_physics/tests/wave1d_tests.rs

//! 一维端到端场景测试
//!
//! 标准算例：区间 [1,4]、101 单元、4 阶、波速 100、CFL 步长、
//! 初始位移 sin(πx)·1_{(2,3)}、零初速度。

use mw_io::snapshot::MemorySink;
use mw_physics::numerics::vector_ops;
use mw_physics::{Grid, GridAxis, IntegratorKind, WaveProblem, WaveSolver};
use std::f64::consts::PI;

fn reference_problem() -> WaveProblem {
    WaveProblem {
        grid: Grid::line(GridAxis::new(1.0, 4.0, 101).unwrap()),
        order: 4,
        wave_speed: 100.0,
        total_time: 0.06,
        dt_override: None,
        integrator: IntegratorKind::PositionVerlet,
        robin: None,
        interpolation: None,
    }
}

fn windowed_sine(x: f64, _y: f64) -> f64 {
    if x > 2.0 && x < 3.0 {
        (PI * x).sin()
    } else {
        0.0
    }
}

/// 单步扰动很小，且边界节点被精确保持
#[test]
fn single_step_perturbation_and_boundary_preservation() {
    let mut solver = WaveSolver::new(reference_problem(), windowed_sine).unwrap();
    let u0 = solver.state().u.clone();
    assert_eq!(u0.len(), 103);
    assert_eq!(u0[0], 0.0);
    assert_eq!(u0[102], 0.0);

    solver.step().unwrap();
    let u1 = &solver.state().u;

    // 单步扰动 ~ (dt²/2)·c²·‖L·u₀‖∞，量级受窗口边缘导数折点支配
    let mut diff = vec![0.0; u0.len()];
    for (i, d) in diff.iter_mut().enumerate() {
        *d = u1[i] - u0[i];
    }
    let max_change = vector_ops::norm_inf(&diff);
    assert!(max_change > 0.0, "单步后场必须有变化");
    assert!(max_change < 2e-2, "单步扰动过大: {max_change}");

    // 拉普拉斯鬼点行为零 → 边界节点的速度与位移精确不动
    assert_eq!(u1[0], 0.0);
    assert_eq!(u1[102], 0.0);
    assert_eq!(solver.state().v[0], 0.0);
    assert_eq!(solver.state().v[102], 0.0);
}

/// 完整运行保持边界不动且解有界
#[test]
fn full_run_stays_bounded() {
    let mut solver = WaveSolver::new(reference_problem(), windowed_sine).unwrap();
    let initial_norm = solver.state().u_norm2();

    let mut sink = MemorySink::new();
    let summary = solver.run(&mut sink, None).unwrap();

    assert!(!summary.cancelled);
    assert_eq!(sink.len(), solver.total_steps() + 1);

    // CFL 步长下解保持有界（辛格式无长期能量漂移）
    let final_norm = solver.state().u_norm2();
    assert!(final_norm.is_finite());
    assert!(final_norm < 10.0 * initial_norm, "{final_norm} vs {initial_norm}");
    assert_eq!(solver.state().u[0], 0.0);
    assert_eq!(solver.state().u[102], 0.0);
}

/// Position Verlet 对全波动算子时间可逆
#[test]
fn verlet_reversible_on_wave_operator() {
    let dt = {
        let solver = WaveSolver::new(reference_problem(), windowed_sine).unwrap();
        solver.dt()
    };

    let mut forward_problem = reference_problem();
    forward_problem.dt_override = Some(dt);
    let mut solver = WaveSolver::new(forward_problem, windowed_sine).unwrap();
    let u0 = solver.state().u.clone();
    let v0 = solver.state().v.clone();

    for _ in 0..20 {
        solver.step().unwrap();
    }

    // 以 -dt 回退同样步数
    let mut backward_problem = reference_problem();
    backward_problem.dt_override = Some(-dt);
    let mut back = WaveSolver::new(backward_problem, |_, _| 0.0).unwrap();
    // 接管前向终态
    let mid_u = solver.state().u.clone();
    let mid_v = solver.state().v.clone();
    back.state_mut().u.copy_from_slice(&mid_u);
    back.state_mut().v.copy_from_slice(&mid_v);

    for _ in 0..20 {
        back.step().unwrap();
    }

    let du = mw_foundation::tolerance::max_abs_diff(&back.state().u, &u0);
    let dv = mw_foundation::tolerance::max_abs_diff(&back.state().v, &v0);
    assert!(du < 1e-8, "位移回退误差 {du}");
    assert!(dv < 1e-6, "速度回退误差 {dv}");
}

/// 违反 CFL 界的步长静默发散，回归检验引擎确实不做拦截
#[test]
fn cfl_violation_diverges_without_guard() {
    let cfl_dt = {
        let solver = WaveSolver::new(reference_problem(), windowed_sine).unwrap();
        solver.dt()
    };

    let mut problem = reference_problem();
    problem.dt_override = Some(50.0 * cfl_dt);
    // 构造照常成功：引擎不校验稳定性界
    let mut solver = WaveSolver::new(problem, windowed_sine).unwrap();
    let initial_norm = solver.state().u_norm2();

    let mut blew_up = false;
    for _ in 0..50 {
        solver.step().unwrap();
        let norm = solver.state().u_norm2();
        if !norm.is_finite() || norm > 1e6 * initial_norm {
            blew_up = true;
            break;
        }
    }
    assert!(blew_up, "50 倍 CFL 步长未发散，引擎不应有隐藏的稳定性保护");
}
