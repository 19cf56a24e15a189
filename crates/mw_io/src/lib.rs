// crates/mw_io/src/lib.rs

//! MimWave IO 层
//!
//! 快照值类型与快照接收器抽象。求解循环每步向接收器发出
//! 场的只读物化副本；具体的序列化格式（文件写出、渲染器
//! 传输）由外部消费者负责，核心只保证副本完整且与网格
//! 逻辑形状一致。

pub mod error;
pub mod snapshot;

pub use error::{IoError, IoResult};
pub use snapshot::{FieldSnapshot, GridSnapshot, MemorySink, SnapshotSink};
