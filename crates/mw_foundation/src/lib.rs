// crates/mw_foundation/src/lib.rs

//! MimWave Foundation Layer
//!
//! 基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`tolerance`]: 数值容差与浮点比较工具
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 serde 和 thiserror
//! 2. **快速失败**: 参数错误在构造期检测，绝不静默修正
//! 3. **可追溯**: 维度错误必须报告涉及的两个形状

pub mod error;
pub mod tolerance;

pub use error::{MwError, MwResult};
pub use tolerance::Tolerance;
