// crates/mw_config/src/lib.rs

//! MimWave 配置层
//!
//! 全 f64 的 serde 配置结构，带字段级默认值与显式校验。
//! 配置层只描述模拟参数，不依赖数值引擎；装配成求解问题
//! 由应用层完成。

pub mod error;
pub mod simulation_config;

pub use error::ConfigError;
pub use simulation_config::{
    AxisConfig, DomainConfig, InitialConditionConfig, IntegratorChoice, InterpolationConfig,
    NumericsConfig, OutputConfig, PhysicsConfig, RobinConfig, SimulationConfig,
};
