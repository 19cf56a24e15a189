// crates/mw_physics/src/engine/cfl.rs

//! CFL 稳定步长推导
//!
//! 显式格式的时间步长需满足 CFL 型界 `dt ≤ Δ / (2·c)`，
//! 其中 Δ 为最小单元步长、c 为波速。本模块只负责**推导**
//! 该步长；引擎不会在运行期校验调用方给定的 dt 是否满足界。
//! 这是刻意保留的行为：违反稳定性界的 dt 会使解静默发散，
//! 责任在调用方（相应的回归测试验证引擎确实不做拦截）。

use mw_foundation::error::{MwError, MwResult};

/// 由 CFL 界推导时间步长: `dt = spacing / (2·wave_speed)`
pub fn cfl_time_step(spacing: f64, wave_speed: f64) -> MwResult<f64> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(MwError::invalid_parameter(
            "spacing",
            format!("步长必须为正有限值，实际 {spacing}"),
        ));
    }
    if !(wave_speed.is_finite() && wave_speed > 0.0) {
        return Err(MwError::invalid_parameter(
            "wave_speed",
            format!("波速必须为正有限值，实际 {wave_speed}"),
        ));
    }
    Ok(spacing / (2.0 * wave_speed))
}

/// 总步数: `round(total_time / dt)`
pub fn step_count(total_time: f64, dt: f64) -> MwResult<usize> {
    if !(total_time.is_finite() && total_time > 0.0) {
        return Err(MwError::invalid_parameter(
            "total_time",
            format!("总时长必须为正有限值，实际 {total_time}"),
        ));
    }
    if !(dt.is_finite() && dt > 0.0) {
        return Err(MwError::invalid_parameter(
            "dt",
            format!("时间步长必须为正有限值，实际 {dt}"),
        ));
    }
    Ok((total_time / dt).round() as usize)
}
