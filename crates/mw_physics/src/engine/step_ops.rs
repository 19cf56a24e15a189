// crates/mw_physics/src/engine/step_ops.rs

//! 单步更新算子包
//!
//! 把求解一步所需的只读算子装配在一起：
//!
//! - `combined = Laplacian + RobinBC`（或裸 Laplacian），力项
//!   `F(u) = c² · combined · u`
//! - 可选的插值对：`I·dt`（节点→面，施加力）与 `I2·dt/2`
//!   （面→节点，施加位移半步），由 [`crate::operators::scale`]
//!   预先乘好时间步长，积分器直接套用
//!
//! 所有复合维度在构造期显式校验，不一致即 `DimensionMismatch`
//! 并报告涉及的两个形状。时间步长本身不做 CFL 校验：满足稳定性
//! 界是调用方的责任，违反时解会静默发散（见 cfl 模块文档）。

use crate::numerics::csr::CsrMatrix;
use crate::numerics::vector_ops;
use crate::operators::scale;
use crate::state::WaveState;
use mw_foundation::error::{MwError, MwResult};

/// 并行 SpMV 的默认行数阈值
const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// 缩放后的插值算子对
#[derive(Debug)]
pub(crate) struct InterpPair {
    /// `I · dt`，节点空间 → 面空间
    pub i_dt: CsrMatrix,
    /// `I2 · dt/2`，面空间 → 节点空间
    pub i2_half: CsrMatrix,
}

/// 单步更新算子包（构造后只读）
#[derive(Debug)]
pub struct StepOperators {
    combined: CsrMatrix,
    c_squared: f64,
    dt: f64,
    interp: Option<InterpPair>,
    parallel_threshold: usize,
}

impl StepOperators {
    /// 直接模式：力与位移都在节点空间
    pub fn new(combined: CsrMatrix, wave_speed: f64, dt: f64) -> MwResult<Self> {
        Self::validate_common(&combined, wave_speed, dt)?;
        Ok(Self {
            combined,
            c_squared: wave_speed * wave_speed,
            dt,
            interp: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// 插值模式：速度场位于交错面空间
    ///
    /// `interp_faces`: 节点 → 面（未缩放）；
    /// `interp_centers`: 面 → 节点（未缩放）。
    /// 构造时按时间步长缩放为可直接应用的更新矩阵。
    pub fn with_interpolation(
        combined: CsrMatrix,
        wave_speed: f64,
        dt: f64,
        interp_faces: &CsrMatrix,
        interp_centers: &CsrMatrix,
    ) -> MwResult<Self> {
        Self::validate_common(&combined, wave_speed, dt)?;

        // I 的列数必须等于组合算子的行数（I 作用于力向量）
        if interp_faces.n_cols() != combined.n_rows() {
            return Err(MwError::dimension_mismatch(
                "插值算子 × 力向量",
                interp_faces.shape(),
                combined.shape(),
            ));
        }
        // I2 的行数必须等于组合算子的列数（I2 更新位移场）
        if interp_centers.n_rows() != combined.n_cols() {
            return Err(MwError::dimension_mismatch(
                "插值算子 × 位移场",
                interp_centers.shape(),
                combined.shape(),
            ));
        }
        // 两个变体必须互相转置兼容（面空间维数一致）
        if interp_centers.n_cols() != interp_faces.n_rows() {
            return Err(MwError::dimension_mismatch(
                "插值算子对",
                interp_centers.shape(),
                interp_faces.shape(),
            ));
        }

        let interp = InterpPair {
            i_dt: scale(interp_faces, dt),
            i2_half: scale(interp_centers, 0.5 * dt),
        };

        Ok(Self {
            combined,
            c_squared: wave_speed * wave_speed,
            dt,
            interp: Some(interp),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    fn validate_common(combined: &CsrMatrix, wave_speed: f64, dt: f64) -> MwResult<()> {
        if combined.n_rows() != combined.n_cols() {
            return Err(MwError::dimension_mismatch(
                "组合算子必须为方阵",
                combined.shape(),
                (combined.n_cols(), combined.n_cols()),
            ));
        }
        if !(wave_speed.is_finite() && wave_speed > 0.0) {
            return Err(MwError::invalid_parameter(
                "wave_speed",
                format!("波速必须为正有限值，实际 {wave_speed}"),
            ));
        }
        if !dt.is_finite() || dt == 0.0 {
            return Err(MwError::invalid_parameter(
                "dt",
                format!("时间步长必须为非零有限值，实际 {dt}"),
            ));
        }
        Ok(())
    }

    /// 设置并行 SpMV 行数阈值
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// 位移场长度（节点数）
    #[inline]
    pub fn displacement_len(&self) -> usize {
        self.combined.n_cols()
    }

    /// 速度场长度（插值模式下为面空间维数）
    #[inline]
    pub fn velocity_len(&self) -> usize {
        match &self.interp {
            Some(p) => p.i_dt.n_rows(),
            None => self.combined.n_cols(),
        }
    }

    /// 时间步长
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// 组合算子引用
    #[inline]
    pub fn combined(&self) -> &CsrMatrix {
        &self.combined
    }

    #[inline]
    pub(crate) fn interp(&self) -> Option<&InterpPair> {
        self.interp.as_ref()
    }

    /// 校验场长度与算子形状一致
    pub fn check_state(&self, state: &WaveState) -> MwResult<()> {
        if state.u_len() != self.displacement_len() {
            return Err(MwError::SizeMismatch {
                name: "位移场",
                expected: self.displacement_len(),
                actual: state.u_len(),
            });
        }
        if state.v_len() != self.velocity_len() {
            return Err(MwError::SizeMismatch {
                name: "速度场",
                expected: self.velocity_len(),
                actual: state.v_len(),
            });
        }
        Ok(())
    }

    /// 力项 `out = c² · combined · u`
    ///
    /// 行数超过阈值时使用按行并行的 SpMV。
    pub fn force(&self, u: &[f64], out: &mut [f64]) {
        #[cfg(feature = "parallel")]
        {
            if self.combined.n_rows() >= self.parallel_threshold {
                self.combined.mul_vec_parallel(u, out);
            } else {
                self.combined.mul_vec(u, out);
            }
        }
        #[cfg(not(feature = "parallel"))]
        self.combined.mul_vec(u, out);

        vector_ops::scale(self.c_squared, out);
    }
}
