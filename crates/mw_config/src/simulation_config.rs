// crates/mw_config/src/simulation_config.rs

//! SimulationConfig - 模拟配置（全 f64）
//!
//! 定义波动方程模拟的所有配置参数，使用纯 f64 类型存储以便
//! JSON 序列化；字段缺省由 `default_*` 函数补齐。内置三个预设
//! 复现标准演示算例（一维脉冲、二维驻波薄膜、二维窗口脉冲）。

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use mw_foundation::tolerance::Tolerance;

/// 模拟配置（全 f64）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 计算域
    pub domain: DomainConfig,

    /// 物理参数
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// 数值参数
    #[serde(default)]
    pub numerics: NumericsConfig,

    /// 初始条件
    #[serde(default)]
    pub initial: InitialConditionConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 单轴计算域
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisConfig {
    /// 下界
    pub lower: f64,
    /// 上界
    pub upper: f64,
    /// 单元数
    pub cells: usize,
}

impl AxisConfig {
    /// 单元步长
    pub fn spacing(&self) -> f64 {
        (self.upper - self.lower) / self.cells as f64
    }
}

/// 计算域配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    /// x 轴
    pub x: AxisConfig,
    /// y 轴（一维模拟省略）
    #[serde(default)]
    pub y: Option<AxisConfig>,
}

/// 物理参数配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// 波速
    #[serde(default = "default_wave_speed")]
    pub wave_speed: f64,

    /// 总模拟时长
    #[serde(default = "default_total_time")]
    pub total_time: f64,
}

fn default_wave_speed() -> f64 {
    1.0
}
fn default_total_time() -> f64 {
    1.0
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            wave_speed: default_wave_speed(),
            total_time: default_total_time(),
        }
    }
}

/// 积分器选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorChoice {
    /// 二阶 Position Verlet（默认）
    #[default]
    PositionVerlet,
    /// 四阶 Forest-Ruth
    ForestRuth,
}

/// Robin 边界系数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobinConfig {
    /// α（场值系数）
    #[serde(default = "default_robin_alpha")]
    pub alpha: f64,
    /// β（法向导数系数）
    #[serde(default)]
    pub beta: f64,
}

fn default_robin_alpha() -> f64 {
    1.0
}

impl Default for RobinConfig {
    fn default() -> Self {
        Self {
            alpha: default_robin_alpha(),
            beta: 0.0,
        }
    }
}

/// 插值权重
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpolationConfig {
    /// 左/下邻权重
    #[serde(default = "default_half")]
    pub weight_a: f64,
    /// 右/上邻权重
    #[serde(default = "default_half")]
    pub weight_b: f64,
}

fn default_half() -> f64 {
    0.5
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            weight_a: default_half(),
            weight_b: default_half(),
        }
    }
}

/// 数值参数配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericsConfig {
    /// 精度阶数（偶数）
    #[serde(default = "default_order")]
    pub order: usize,

    /// 积分器
    #[serde(default)]
    pub integrator: IntegratorChoice,

    /// Robin 边界条件；None 表示只用拉普拉斯
    #[serde(default)]
    pub robin: Option<RobinConfig>,

    /// 交错插值；None 表示直接格式
    #[serde(default)]
    pub interpolation: Option<InterpolationConfig>,

    /// 显式步长覆盖；None 时按 CFL 界推导。
    /// 引擎不校验该值是否满足稳定性界。
    #[serde(default)]
    pub dt: Option<f64>,
}

fn default_order() -> usize {
    2
}

impl Default for NumericsConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
            integrator: IntegratorChoice::default(),
            robin: None,
            interpolation: None,
            dt: None,
        }
    }
}

/// 初始条件配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InitialConditionConfig {
    /// 正弦乘积 sin(πx)·sin(πy)（一维退化为 sin(πx)）
    #[default]
    SineProduct,
    /// 窗口正弦：窗口内取正弦乘积，窗口外为零
    WindowedSine {
        /// x 窗口下界
        x_min: f64,
        /// x 窗口上界
        x_max: f64,
        /// y 窗口下界（一维省略）
        #[serde(default)]
        y_min: Option<f64>,
        /// y 窗口上界（一维省略）
        #[serde(default)]
        y_max: Option<f64>,
    },
}

impl InitialConditionConfig {
    /// 求初始位移 u₀(x, y)（一维时 y = 0）
    pub fn evaluate(&self, x: f64, y: f64, two_dimensional: bool) -> f64 {
        match self {
            Self::SineProduct => {
                if two_dimensional {
                    (PI * x).sin() * (PI * y).sin()
                } else {
                    (PI * x).sin()
                }
            }
            Self::WindowedSine {
                x_min,
                x_max,
                y_min,
                y_max,
            } => {
                let in_x = x > *x_min && x < *x_max;
                let in_y = match (y_min, y_max) {
                    (Some(lo), Some(hi)) => y > *lo && y < *hi,
                    _ => true,
                };
                if in_x && in_y {
                    if two_dimensional {
                        (PI * x).sin() * (PI * y).sin()
                    } else {
                        (PI * x).sin()
                    }
                } else {
                    0.0
                }
            }
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出目录
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// 快照步进间隔（每多少步写一帧）
    #[serde(default = "default_stride")]
    pub stride: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_stride() -> usize {
    1
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            stride: default_stride(),
        }
    }
}

impl SimulationConfig {
    /// 从 JSON 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 序列化为 JSON 字符串
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 校验配置
    ///
    /// 配置层先行拦截明显无效的参数；数值引擎在算子构造时
    /// 还会做同类检查。
    pub fn validate(&self) -> Result<(), ConfigError> {
        let axes: [(&str, &AxisConfig); 2] = [
            ("domain.x", &self.domain.x),
            ("domain.y", self.domain.y.as_ref().unwrap_or(&self.domain.x)),
        ];
        let axis_count = if self.domain.y.is_some() { 2 } else { 1 };
        for (key, axis) in axes.iter().take(axis_count) {
            if axis.cells == 0 {
                return Err(ConfigError::invalid(
                    &format!("{key}.cells"),
                    axis.cells,
                    "单元数必须至少为 1",
                ));
            }
            if !(axis.lower.is_finite() && axis.upper.is_finite()) || axis.upper <= axis.lower {
                return Err(ConfigError::invalid(
                    &format!("{key}.bounds"),
                    format!("[{}, {}]", axis.lower, axis.upper),
                    "上界必须大于下界且为有限值",
                ));
            }
        }

        if self.numerics.order < 2 || self.numerics.order % 2 != 0 {
            return Err(ConfigError::invalid(
                "numerics.order",
                self.numerics.order,
                "精度阶数必须为不小于 2 的偶数",
            ));
        }

        if !(self.physics.wave_speed.is_finite() && self.physics.wave_speed > 0.0) {
            return Err(ConfigError::invalid(
                "physics.wave_speed",
                self.physics.wave_speed,
                "波速必须为正",
            ));
        }
        if !(self.physics.total_time.is_finite() && self.physics.total_time > 0.0) {
            return Err(ConfigError::invalid(
                "physics.total_time",
                self.physics.total_time,
                "总时长必须为正",
            ));
        }

        if let Some(interp) = &self.numerics.interpolation {
            let tol = Tolerance::default();
            let sum = interp.weight_a + interp.weight_b;
            if (sum - 1.0).abs() > tol.weight_sum {
                return Err(ConfigError::invalid(
                    "numerics.interpolation",
                    format!("({}, {})", interp.weight_a, interp.weight_b),
                    "插值权重之和必须为 1",
                ));
            }
        }

        if let Some(dt) = self.numerics.dt {
            if !(dt.is_finite() && dt > 0.0) {
                return Err(ConfigError::invalid("numerics.dt", dt, "步长必须为正"));
            }
        }

        if self.output.stride == 0 {
            return Err(ConfigError::invalid(
                "output.stride",
                self.output.stride,
                "快照间隔必须至少为 1",
            ));
        }

        Ok(())
    }

    /// CFL 推导步长（未被 `numerics.dt` 覆盖时的取值）
    pub fn cfl_dt(&self) -> f64 {
        let mut spacing = self.domain.x.spacing();
        if let Some(y) = &self.domain.y {
            spacing = spacing.min(y.spacing());
        }
        spacing / (2.0 * self.physics.wave_speed)
    }

    /// 内置预设
    ///
    /// - `pulse-1d`: 一维窗口脉冲，区间 [1,4]、101 单元、4 阶、波速 100
    /// - `membrane-2d`: 二维驻波薄膜，[0,1]²、50×50、2 阶、Dirichlet + 插值
    /// - `pulse-2d`: 二维窗口脉冲，[-5,10]²、101×101、4 阶、Dirichlet + 插值
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "pulse-1d" => Ok(Self {
                domain: DomainConfig {
                    x: AxisConfig {
                        lower: 1.0,
                        upper: 4.0,
                        cells: 101,
                    },
                    y: None,
                },
                physics: PhysicsConfig {
                    wave_speed: 100.0,
                    total_time: 0.06,
                },
                numerics: NumericsConfig {
                    order: 4,
                    ..Default::default()
                },
                initial: InitialConditionConfig::WindowedSine {
                    x_min: 2.0,
                    x_max: 3.0,
                    y_min: None,
                    y_max: None,
                },
                output: OutputConfig::default(),
            }),
            "membrane-2d" => Ok(Self {
                domain: DomainConfig {
                    x: AxisConfig {
                        lower: 0.0,
                        upper: 1.0,
                        cells: 50,
                    },
                    y: Some(AxisConfig {
                        lower: 0.0,
                        upper: 1.0,
                        cells: 50,
                    }),
                },
                physics: PhysicsConfig {
                    wave_speed: 1.0,
                    total_time: 1.0,
                },
                numerics: NumericsConfig {
                    order: 2,
                    robin: Some(RobinConfig::default()),
                    interpolation: Some(InterpolationConfig::default()),
                    ..Default::default()
                },
                initial: InitialConditionConfig::SineProduct,
                output: OutputConfig::default(),
            }),
            "pulse-2d" => Ok(Self {
                domain: DomainConfig {
                    x: AxisConfig {
                        lower: -5.0,
                        upper: 10.0,
                        cells: 101,
                    },
                    y: Some(AxisConfig {
                        lower: -5.0,
                        upper: 10.0,
                        cells: 101,
                    }),
                },
                physics: PhysicsConfig {
                    wave_speed: 100.0,
                    total_time: 0.3,
                },
                numerics: NumericsConfig {
                    order: 4,
                    robin: Some(RobinConfig::default()),
                    interpolation: Some(InterpolationConfig::default()),
                    ..Default::default()
                },
                initial: InitialConditionConfig::WindowedSine {
                    x_min: 2.0,
                    x_max: 3.0,
                    y_min: Some(2.0),
                    y_max: Some(3.0),
                },
                output: OutputConfig::default(),
            }),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    /// 预设名列表
    pub fn preset_names() -> &'static [&'static str] {
        &["pulse-1d", "membrane-2d", "pulse-2d"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for name in SimulationConfig::preset_names() {
            let config = SimulationConfig::preset(name).unwrap();
            config.validate().unwrap_or_else(|e| panic!("{name}: {e}"));
        }
        assert!(SimulationConfig::preset("nope").is_err());
    }

    #[test]
    fn test_cfl_dt_matches_reference_case() {
        let config = SimulationConfig::preset("pulse-1d").unwrap();
        let dx = 3.0 / 101.0;
        assert!((config.cfl_dt() - dx / 200.0).abs() < 1e-15);
    }

    #[test]
    fn test_json_roundtrip_with_defaults() {
        let text = r#"{
            "domain": { "x": { "lower": 0.0, "upper": 1.0, "cells": 16 } }
        }"#;
        let config: SimulationConfig = serde_json::from_str(text).unwrap();
        assert_eq!(config.numerics.order, 2);
        assert_eq!(config.numerics.integrator, IntegratorChoice::PositionVerlet);
        assert!(config.numerics.robin.is_none());
        config.validate().unwrap();

        let json = config.to_json().unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        back.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SimulationConfig::preset("pulse-1d").unwrap();
        config.numerics.order = 3;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::preset("pulse-1d").unwrap();
        config.physics.wave_speed = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::preset("membrane-2d").unwrap();
        config.numerics.interpolation = Some(InterpolationConfig {
            weight_a: 0.7,
            weight_b: 0.5,
        });
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::preset("pulse-1d").unwrap();
        config.domain.x.cells = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_initial_condition_evaluation() {
        let ic = InitialConditionConfig::WindowedSine {
            x_min: 2.0,
            x_max: 3.0,
            y_min: None,
            y_max: None,
        };
        assert!((ic.evaluate(2.5, 0.0, false) - (PI * 2.5).sin()).abs() < 1e-15);
        assert_eq!(ic.evaluate(1.0, 0.0, false), 0.0);
        assert_eq!(ic.evaluate(3.5, 0.0, false), 0.0);

        let sp = InitialConditionConfig::SineProduct;
        let v = sp.evaluate(0.5, 0.5, true);
        assert!((v - 1.0).abs() < 1e-12);
    }
}
