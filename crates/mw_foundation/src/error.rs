// crates/mw_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `MwError` 枚举和 `MwResult` 类型别名，用于整个项目的错误处理。
//!
//! # 设计原则
//!
//! 1. **构造期检测**: 无效参数在算子构造时报错，绝不返回残缺算子
//! 2. **形状可追溯**: 维度不匹配错误必须包含涉及的两个算子形状
//! 3. **层次化**: 基础层只定义核心错误，配置/IO 相关错误在各自 crate 中扩展
//!
//! # 示例
//!
//! ```
//! use mw_foundation::error::{MwError, MwResult};
//!
//! fn check_order(order: usize) -> MwResult<()> {
//!     if order % 2 != 0 {
//!         return Err(MwError::invalid_parameter(
//!             "order",
//!             format!("{order} 不是偶数"),
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// 统一结果类型
pub type MwResult<T> = Result<T, MwError>;

/// MimWave 错误类型
///
/// 核心错误类型，用于整个项目。配置层错误在 `mw_config` 中定义。
#[derive(Error, Debug)]
pub enum MwError {
    /// 无效参数（阶数超出系数表、非正单元数/步长、退化区间等）
    #[error("无效参数: {name}: {reason}")]
    InvalidParameter {
        /// 参数名
        name: &'static str,
        /// 无效原因说明
        reason: String,
    },

    /// 维度不匹配（组合或复合形状不兼容的算子/场）
    #[error("维度不匹配: {context}: 左 {left_rows}x{left_cols}, 右 {right_rows}x{right_cols}")]
    DimensionMismatch {
        /// 发生位置说明
        context: &'static str,
        /// 左算子行数
        left_rows: usize,
        /// 左算子列数
        left_cols: usize,
        /// 右算子行数
        right_rows: usize,
        /// 右算子列数
        right_cols: usize,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

impl MwError {
    /// 构造无效参数错误
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// 构造维度不匹配错误
    pub fn dimension_mismatch(
        context: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    ) -> Self {
        Self::DimensionMismatch {
            context,
            left_rows: left.0,
            left_cols: left.1,
            right_rows: right.0,
            right_cols: right.1,
        }
    }

    /// 构造配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 构造内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = MwError::invalid_parameter("cells", "必须大于 0".to_string());
        let msg = err.to_string();
        assert!(msg.contains("cells"));
        assert!(msg.contains("必须大于 0"));
    }

    #[test]
    fn test_dimension_mismatch_names_both_shapes() {
        let err = MwError::dimension_mismatch("算子求和", (10, 10), (10, 12));
        let msg = err.to_string();
        assert!(msg.contains("10x10"));
        assert!(msg.contains("10x12"));
    }

    #[test]
    fn test_size_mismatch_display() {
        let err = MwError::SizeMismatch {
            name: "位移场",
            expected: 103,
            actual: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("103"));
        assert!(msg.contains("100"));
    }
}
