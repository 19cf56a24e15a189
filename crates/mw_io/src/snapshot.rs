// crates/mw_io/src/snapshot.rs

//! 网格与场快照
//!
//! 用于向外部消费者（文件写出器、渲染器）传输的轻量只读拷贝。
//!
//! # 设计说明
//!
//! 快照是完整物化的数据副本：
//! - 求解循环发出快照后继续推进，消费者绝不回写 `(u, v)`
//! - 场值按网格逻辑形状 (rows, cols) 行主序展平
//! - 历史保留与流式输出都通过 [`SnapshotSink`] 实现

use serde::{Deserialize, Serialize};

use crate::error::IoResult;

/// 网格快照（一次性发出，描述所有帧共享的坐标）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// 维度（1 或 2）
    pub dimension: usize,
    /// x 轴坐标序列
    pub coords_x: Vec<f64>,
    /// y 轴坐标序列（一维为 None）
    pub coords_y: Option<Vec<f64>>,
    /// 逻辑形状行数（对应 y）
    pub rows: usize,
    /// 逻辑形状列数（对应 x）
    pub cols: usize,
}

/// 单步场快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// 步编号
    pub step: usize,
    /// 已推进的物理时间
    pub time: f64,
    /// 位移场副本（行主序展平）
    pub values: Vec<f64>,
    /// 逻辑形状行数
    pub rows: usize,
    /// 逻辑形状列数
    pub cols: usize,
}

impl FieldSnapshot {
    /// 取 (row, col) 处的场值
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }
}

/// 快照接收器
///
/// 求解循环每步调用一次；实现方可以保留历史、写文件或转发。
/// 接收器只能读取快照，不得影响求解状态。
pub trait SnapshotSink {
    /// 记录一帧快照
    fn record(&mut self, snapshot: FieldSnapshot) -> IoResult<()>;
}

/// 内存接收器：按顺序保留全部历史帧
#[derive(Debug, Default)]
pub struct MemorySink {
    /// 历史帧
    pub frames: Vec<FieldSnapshot>,
}

impl MemorySink {
    /// 创建空接收器
    pub fn new() -> Self {
        Self::default()
    }

    /// 帧数
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// 最后一帧
    pub fn last(&self) -> Option<&FieldSnapshot> {
        self.frames.last()
    }
}

impl SnapshotSink for MemorySink {
    fn record(&mut self, snapshot: FieldSnapshot) -> IoResult<()> {
        self.frames.push(snapshot);
        Ok(())
    }
}
