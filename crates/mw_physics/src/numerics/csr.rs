// crates/mw_physics/src/numerics/csr.rs

//! 压缩稀疏行（CSR）矩阵格式
//!
//! CSR 是最常用的稀疏矩阵存储格式之一，特别适合：
//! - 高效的矩阵-向量乘法 (SpMV)
//! - 行遍历操作
//! - 差分算子的代数组合（求和、数乘、乘积、Kronecker 积）
//!
//! 算子一经构造即不可变；所有组合运算返回新矩阵，
//! 且保持稀疏模式（求和取模式并集，绝不稠密化）。
//!
//! # 特性开关
//!
//! - `parallel`: 启用基于 `rayon` 的按行并行矩阵-向量乘法
//!
//! # 格式说明
//!
//! CSR 使用三个数组存储：
//! - `row_ptr`: 行指针，长度 n_rows + 1，row_ptr[i] 是第 i 行第一个非零元的索引
//! - `col_idx`: 列索引，行内升序，与非零元一一对应
//! - `values`: 非零元值

use mw_foundation::error::{MwError, MwResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use std::collections::BTreeMap;

// =============================================================================
// CSR 矩阵主体
// =============================================================================

/// CSR 格式稀疏矩阵（f64）
#[derive(Debug, Clone)]
pub struct CsrMatrix {
    n_rows: usize,
    n_cols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// 创建单位矩阵
    pub fn identity(n: usize) -> Self {
        let mut builder = CsrBuilder::new_square(n);
        for i in 0..n {
            builder.set(i, i, 1.0);
        }
        builder.build()
    }

    /// 获取行数
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// 获取列数
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// 获取形状 (行数, 列数)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// 获取非零元数量
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// 获取 (row, col) 位置的值（如果不存在返回 0）
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];
        match self.col_idx[start..end].binary_search(&col) {
            Ok(local) => self.values[start + local],
            Err(_) => 0.0,
        }
    }

    /// 迭代第 row 行的 (列索引, 值) 对
    #[inline]
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];
        self.col_idx[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// 矩阵-向量乘法 y = A * x
    ///
    /// # Panics
    /// - `x.len() != self.n_cols()`
    /// - `y.len() != self.n_rows()`
    pub fn mul_vec(&self, x: &[f64], y: &mut [f64]) {
        assert_eq!(x.len(), self.n_cols, "x 长度必须等于矩阵列数");
        assert_eq!(y.len(), self.n_rows, "y 长度必须等于矩阵行数");

        for row in 0..self.n_rows {
            let start = self.row_ptr[row];
            let end = self.row_ptr[row + 1];

            let mut sum = 0.0;
            for idx in start..end {
                sum += self.values[idx] * x[self.col_idx[idx]];
            }
            y[row] = sum;
        }
    }

    /// 并行矩阵-向量乘法（需启用 `parallel` 特性）
    ///
    /// 基于 `rayon` 的按行并行迭代，行数较大时性能显著提升。
    #[cfg(feature = "parallel")]
    pub fn mul_vec_parallel(&self, x: &[f64], y: &mut [f64]) {
        assert_eq!(x.len(), self.n_cols, "x 长度必须等于矩阵列数");
        assert_eq!(y.len(), self.n_rows, "y 长度必须等于矩阵行数");

        y.par_iter_mut().enumerate().for_each(|(row, out)| {
            let start = self.row_ptr[row];
            let end = self.row_ptr[row + 1];

            let mut sum = 0.0;
            for idx in start..end {
                sum += self.values[idx] * x[self.col_idx[idx]];
            }
            *out = sum;
        });
    }

    /// 稀疏矩阵逐元素求和 C = A + B
    ///
    /// 两算子形状必须一致；结果取稀疏模式并集，不稠密化。
    pub fn add(&self, rhs: &CsrMatrix) -> MwResult<CsrMatrix> {
        if self.shape() != rhs.shape() {
            return Err(MwError::dimension_mismatch(
                "稀疏矩阵求和",
                self.shape(),
                rhs.shape(),
            ));
        }

        let mut row_ptr = Vec::with_capacity(self.n_rows + 1);
        let mut col_idx = Vec::with_capacity(self.nnz() + rhs.nnz());
        let mut values = Vec::with_capacity(self.nnz() + rhs.nnz());
        row_ptr.push(0);

        // 逐行归并两条升序列索引序列
        for row in 0..self.n_rows {
            let (mut i, ia_end) = (self.row_ptr[row], self.row_ptr[row + 1]);
            let (mut j, ib_end) = (rhs.row_ptr[row], rhs.row_ptr[row + 1]);

            while i < ia_end && j < ib_end {
                let ca = self.col_idx[i];
                let cb = rhs.col_idx[j];
                if ca < cb {
                    col_idx.push(ca);
                    values.push(self.values[i]);
                    i += 1;
                } else if cb < ca {
                    col_idx.push(cb);
                    values.push(rhs.values[j]);
                    j += 1;
                } else {
                    col_idx.push(ca);
                    values.push(self.values[i] + rhs.values[j]);
                    i += 1;
                    j += 1;
                }
            }
            while i < ia_end {
                col_idx.push(self.col_idx[i]);
                values.push(self.values[i]);
                i += 1;
            }
            while j < ib_end {
                col_idx.push(rhs.col_idx[j]);
                values.push(rhs.values[j]);
                j += 1;
            }
            row_ptr.push(col_idx.len());
        }

        Ok(CsrMatrix {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// 稀疏矩阵乘法 C = A * B
    ///
    /// 经典的逐行 gather 算法，使用稠密累加器工作区。
    pub fn matmul(&self, rhs: &CsrMatrix) -> MwResult<CsrMatrix> {
        if self.n_cols != rhs.n_rows {
            return Err(MwError::dimension_mismatch(
                "稀疏矩阵乘法",
                self.shape(),
                rhs.shape(),
            ));
        }

        let mut row_ptr = Vec::with_capacity(self.n_rows + 1);
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        row_ptr.push(0);

        let mut acc = vec![0.0f64; rhs.n_cols];
        let mut marker = vec![usize::MAX; rhs.n_cols];
        let mut touched: Vec<usize> = Vec::new();

        for row in 0..self.n_rows {
            touched.clear();
            for idx in self.row_ptr[row]..self.row_ptr[row + 1] {
                let k = self.col_idx[idx];
                let a = self.values[idx];
                for jdx in rhs.row_ptr[k]..rhs.row_ptr[k + 1] {
                    let col = rhs.col_idx[jdx];
                    if marker[col] != row {
                        marker[col] = row;
                        acc[col] = 0.0;
                        touched.push(col);
                    }
                    acc[col] += a * rhs.values[jdx];
                }
            }
            touched.sort_unstable();
            for &col in &touched {
                col_idx.push(col);
                values.push(acc[col]);
            }
            row_ptr.push(col_idx.len());
        }

        Ok(CsrMatrix {
            n_rows: self.n_rows,
            n_cols: rhs.n_cols,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Kronecker 积 C = A ⊗ B
    ///
    /// `C[i*p + k, j*q + l] = A[i,j] * B[k,l]`，其中 B 为 p×q。
    /// 用于从一维模板组装二维算子。
    pub fn kron(&self, rhs: &CsrMatrix) -> CsrMatrix {
        let n_rows = self.n_rows * rhs.n_rows;
        let n_cols = self.n_cols * rhs.n_cols;

        let mut row_ptr = Vec::with_capacity(n_rows + 1);
        let mut col_idx = Vec::with_capacity(self.nnz() * rhs.nnz());
        let mut values = Vec::with_capacity(self.nnz() * rhs.nnz());
        row_ptr.push(0);

        for i in 0..self.n_rows {
            for k in 0..rhs.n_rows {
                // 外层列索引升序、内层列索引升序，合成索引天然有序
                for idx in self.row_ptr[i]..self.row_ptr[i + 1] {
                    let a = self.values[idx];
                    let j = self.col_idx[idx];
                    for jdx in rhs.row_ptr[k]..rhs.row_ptr[k + 1] {
                        col_idx.push(j * rhs.n_cols + rhs.col_idx[jdx]);
                        values.push(a * rhs.values[jdx]);
                    }
                }
                row_ptr.push(col_idx.len());
            }
        }

        CsrMatrix {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// 缩放所有值 A *= factor（保持稀疏模式）
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.values {
            *v *= factor;
        }
    }

    /// 计算矩阵的无穷范数（最大行绝对值和）
    pub fn infinity_norm(&self) -> f64 {
        let mut max_row_sum = 0.0f64;
        for row in 0..self.n_rows {
            let start = self.row_ptr[row];
            let end = self.row_ptr[row + 1];
            let row_sum: f64 = self.values[start..end].iter().map(|v| v.abs()).sum();
            max_row_sum = max_row_sum.max(row_sum);
        }
        max_row_sum
    }
}

/// 纵向拼接 C = [A; B; ...]
///
/// 所有矩阵列数必须一致。
pub fn vstack(blocks: &[&CsrMatrix]) -> MwResult<CsrMatrix> {
    assert!(!blocks.is_empty(), "拼接块不能为空");
    let n_cols = blocks[0].n_cols;
    for b in blocks.iter().skip(1) {
        if b.n_cols != n_cols {
            return Err(MwError::dimension_mismatch(
                "纵向拼接",
                blocks[0].shape(),
                b.shape(),
            ));
        }
    }

    let n_rows = blocks.iter().map(|b| b.n_rows).sum();
    let nnz = blocks.iter().map(|b| b.nnz()).sum();
    let mut row_ptr = Vec::with_capacity(n_rows + 1);
    let mut col_idx = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);
    row_ptr.push(0);

    for b in blocks {
        for row in 0..b.n_rows {
            for idx in b.row_ptr[row]..b.row_ptr[row + 1] {
                col_idx.push(b.col_idx[idx]);
                values.push(b.values[idx]);
            }
            row_ptr.push(col_idx.len());
        }
    }

    Ok(CsrMatrix {
        n_rows,
        n_cols,
        row_ptr,
        col_idx,
        values,
    })
}

/// 横向拼接 C = [A, B, ...]
///
/// 所有矩阵行数必须一致；右侧块的列索引整体偏移。
pub fn hstack(blocks: &[&CsrMatrix]) -> MwResult<CsrMatrix> {
    assert!(!blocks.is_empty(), "拼接块不能为空");
    let n_rows = blocks[0].n_rows;
    for b in blocks.iter().skip(1) {
        if b.n_rows != n_rows {
            return Err(MwError::dimension_mismatch(
                "横向拼接",
                blocks[0].shape(),
                b.shape(),
            ));
        }
    }

    let n_cols = blocks.iter().map(|b| b.n_cols).sum();
    let nnz = blocks.iter().map(|b| b.nnz()).sum();
    let mut row_ptr = Vec::with_capacity(n_rows + 1);
    let mut col_idx = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);
    row_ptr.push(0);

    for row in 0..n_rows {
        let mut offset = 0;
        for b in blocks {
            for idx in b.row_ptr[row]..b.row_ptr[row + 1] {
                col_idx.push(offset + b.col_idx[idx]);
                values.push(b.values[idx]);
            }
            offset += b.n_cols;
        }
        row_ptr.push(col_idx.len());
    }

    Ok(CsrMatrix {
        n_rows,
        n_cols,
        row_ptr,
        col_idx,
        values,
    })
}

// =============================================================================
// 构建器
// =============================================================================

/// CSR 矩阵构建器
///
/// 使用 BTreeMap 临时存储，构建时转换为紧凑 CSR 格式。
/// 适合逐元素构建算子模板，不保证最高性能。
pub struct CsrBuilder {
    n_rows: usize,
    n_cols: usize,
    rows: Vec<BTreeMap<usize, f64>>,
}

impl CsrBuilder {
    /// 创建方阵构建器
    #[inline]
    pub fn new_square(n: usize) -> Self {
        Self::new(n, n)
    }

    /// 创建构建器
    ///
    /// # Panics
    /// - `n_rows == 0` 或 `n_cols == 0`（空矩阵无意义）
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        assert!(n_rows > 0, "行数必须大于 0");
        assert!(n_cols > 0, "列数必须大于 0");

        Self {
            n_rows,
            n_cols,
            rows: vec![BTreeMap::new(); n_rows],
        }
    }

    /// 设置 (row, col) 的值（覆盖）
    ///
    /// # Panics
    /// - `row >= n_rows` 或 `col >= n_cols`
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.n_rows, "行索引越界");
        assert!(col < self.n_cols, "列索引越界");
        self.rows[row].insert(col, value);
    }

    /// 累加到 (row, col)
    ///
    /// # Panics
    /// - `row >= n_rows` 或 `col >= n_cols`
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.n_rows, "行索引越界");
        assert!(col < self.n_cols, "列索引越界");
        *self.rows[row].entry(col).or_insert(0.0) += value;
    }

    /// 获取当前非零元总数
    #[inline]
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(|r| r.len()).sum()
    }

    /// 构建 CSR 矩阵（消耗构建器）
    ///
    /// BTreeMap 已按列有序，转换复杂度 O(nnz)。
    pub fn build(self) -> CsrMatrix {
        let nnz = self.nnz();
        let mut row_ptr = Vec::with_capacity(self.n_rows + 1);
        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        row_ptr.push(0);
        for row_map in self.rows {
            for (col, val) in row_map {
                col_idx.push(col);
                values.push(val);
            }
            row_ptr.push(col_idx.len());
        }

        CsrMatrix {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }
}
