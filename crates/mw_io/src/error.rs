// crates/mw_io/src/error.rs

//! IO 错误类型定义

use thiserror::Error;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 底层 IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 快照接收器拒绝数据
    #[error("快照接收失败: {reason}")]
    SinkRejected {
        /// 拒绝原因
        reason: String,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_rejected_display() {
        let err = IoError::SinkRejected {
            reason: "缓冲区已满".to_string(),
        };
        assert!(err.to_string().contains("缓冲区已满"));
    }
}
