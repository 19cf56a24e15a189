// crates/mw_physics/src/grid.rs

//! 均匀交错网格
//!
//! 描述一维/二维均匀交错计算域。每个坐标轴产生 `cells + 2` 个
//! 严格递增的坐标：两端各一个边界节点，中间是 `cells` 个单元中心
//! （位于 `lower + (i - 1/2)·spacing`）。二维网格由两轴坐标序列
//! 外积展开，场向量按行主序展平（x 索引变化最快）。
//!
//! 不变量：`spacing = (upper - lower) / cells`；坐标序列严格递增。

use mw_foundation::error::{MwError, MwResult};

/// 单一坐标轴
#[derive(Debug, Clone)]
pub struct GridAxis {
    lower: f64,
    upper: f64,
    cells: usize,
    spacing: f64,
}

impl GridAxis {
    /// 创建坐标轴
    ///
    /// # 失败
    ///
    /// - `cells == 0` → `InvalidParameter`
    /// - `upper <= lower` 或边界非有限 → `InvalidParameter`
    pub fn new(lower: f64, upper: f64, cells: usize) -> MwResult<Self> {
        if cells == 0 {
            return Err(MwError::invalid_parameter("cells", "单元数必须至少为 1"));
        }
        if !lower.is_finite() || !upper.is_finite() {
            return Err(MwError::invalid_parameter("bounds", "边界必须为有限值"));
        }
        if upper <= lower {
            return Err(MwError::invalid_parameter(
                "bounds",
                format!("上界 {upper} 必须大于下界 {lower}"),
            ));
        }
        Ok(Self {
            lower,
            upper,
            cells,
            spacing: (upper - lower) / cells as f64,
        })
    }

    /// 下界
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// 上界
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// 单元数
    #[inline]
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// 单元步长
    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// 节点数（边界 + 单元中心 + 边界）
    #[inline]
    pub fn node_count(&self) -> usize {
        self.cells + 2
    }

    /// 面数（含两端边界面）
    #[inline]
    pub fn face_count(&self) -> usize {
        self.cells + 1
    }

    /// 交错坐标序列: [lower, lower + Δ/2, lower + 3Δ/2, ..., upper - Δ/2, upper]
    pub fn coords(&self) -> Vec<f64> {
        let mut coords = Vec::with_capacity(self.node_count());
        coords.push(self.lower);
        for i in 0..self.cells {
            coords.push(self.lower + (i as f64 + 0.5) * self.spacing);
        }
        coords.push(self.upper);
        coords
    }
}

/// 一维或二维交错网格
#[derive(Debug, Clone)]
pub struct Grid {
    x: GridAxis,
    y: Option<GridAxis>,
}

impl Grid {
    /// 一维网格
    pub fn line(x: GridAxis) -> Self {
        Self { x, y: None }
    }

    /// 二维网格
    pub fn plane(x: GridAxis, y: GridAxis) -> Self {
        Self { x, y: Some(y) }
    }

    /// 维度（1 或 2）
    #[inline]
    pub fn dimension(&self) -> usize {
        if self.y.is_some() {
            2
        } else {
            1
        }
    }

    /// x 轴
    #[inline]
    pub fn x(&self) -> &GridAxis {
        &self.x
    }

    /// y 轴（一维网格为 None）
    #[inline]
    pub fn y(&self) -> Option<&GridAxis> {
        self.y.as_ref()
    }

    /// 总节点数
    pub fn node_count(&self) -> usize {
        match &self.y {
            Some(y) => self.x.node_count() * y.node_count(),
            None => self.x.node_count(),
        }
    }

    /// 逻辑形状 (行数, 列数)，行对应 y，列对应 x
    pub fn shape(&self) -> (usize, usize) {
        match &self.y {
            Some(y) => (y.node_count(), self.x.node_count()),
            None => (1, self.x.node_count()),
        }
    }

    /// 最小单元步长（二维取两轴较小者）
    pub fn min_spacing(&self) -> f64 {
        match &self.y {
            Some(y) => self.x.spacing().min(y.spacing()),
            None => self.x.spacing(),
        }
    }

    /// 对每个节点调用 `f(index, x, y)`，行主序（x 最快），一维时 y = 0
    pub fn for_each_node(&self, mut f: impl FnMut(usize, f64, f64)) {
        let xs = self.x.coords();
        match &self.y {
            Some(y_axis) => {
                let ys = y_axis.coords();
                let nx = xs.len();
                for (iy, &yv) in ys.iter().enumerate() {
                    for (ix, &xv) in xs.iter().enumerate() {
                        f(iy * nx + ix, xv, yv);
                    }
                }
            }
            None => {
                for (ix, &xv) in xs.iter().enumerate() {
                    f(ix, xv, 0.0);
                }
            }
        }
    }

    /// 二维坐标网格（展平的 X、Y 序列，行主序），一维时 Y 全零
    pub fn meshgrid(&self) -> (Vec<f64>, Vec<f64>) {
        let n = self.node_count();
        let mut xs = Vec::with_capacity(n);
        let mut ys = Vec::with_capacity(n);
        self.for_each_node(|_, x, y| {
            xs.push(x);
            ys.push(y);
        });
        (xs, ys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_invariants() {
        let axis = GridAxis::new(1.0, 4.0, 101).unwrap();
        assert!((axis.spacing() - 3.0 / 101.0).abs() < 1e-14);
        assert_eq!(axis.node_count(), 103);
        assert_eq!(axis.face_count(), 102);

        let coords = axis.coords();
        assert_eq!(coords.len(), 103);
        assert!((coords[0] - 1.0).abs() < 1e-14);
        assert!((coords[102] - 4.0).abs() < 1e-14);
        // 严格递增
        for pair in coords.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_axis_rejects_invalid() {
        assert!(GridAxis::new(0.0, 1.0, 0).is_err());
        assert!(GridAxis::new(1.0, 1.0, 10).is_err());
        assert!(GridAxis::new(2.0, 1.0, 10).is_err());
        assert!(GridAxis::new(f64::NAN, 1.0, 10).is_err());
    }

    #[test]
    fn test_single_cell_axis() {
        let axis = GridAxis::new(0.0, 1.0, 1).unwrap();
        let coords = axis.coords();
        assert_eq!(coords.len(), 3);
        assert!((coords[1] - 0.5).abs() < 1e-14);
    }

    #[test]
    fn test_plane_shape_and_meshgrid() {
        let x = GridAxis::new(0.0, 1.0, 3).unwrap();
        let y = GridAxis::new(0.0, 2.0, 2).unwrap();
        let grid = Grid::plane(x, y);

        assert_eq!(grid.dimension(), 2);
        assert_eq!(grid.node_count(), 5 * 4);
        assert_eq!(grid.shape(), (4, 5));

        let (xs, ys) = grid.meshgrid();
        assert_eq!(xs.len(), 20);
        // 行主序：x 最快，首两点相差 Δx/2
        assert!((xs[1] - xs[0] - grid.x().spacing() / 2.0).abs() < 1e-14);
        assert!((ys[0] - 0.0).abs() < 1e-14);
        assert!((ys[5] - 0.5).abs() < 1e-14);
    }

    #[test]
    fn test_line_for_each_node() {
        let grid = Grid::line(GridAxis::new(0.0, 1.0, 2).unwrap());
        let mut seen = Vec::new();
        grid.for_each_node(|i, x, y| {
            seen.push((i, x, y));
        });
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0].0, 0);
        assert!((seen[1].1 - 0.25).abs() < 1e-14);
        assert!(seen.iter().all(|&(_, _, y)| y == 0.0));
        assert!((grid.min_spacing() - 0.5).abs() < 1e-14);
    }
}
