//! 两遍插值的中间缓冲区.

/// 亮度滤波在水平方向上需要的额外列数 (8 抽头 - 1)
pub const SCRATCH_MARGIN: usize = 7;

/// 竖直滤波结果 (未移位的 `i32` 和) 的暂存区.
///
/// 大小在构造时按最大块尺寸确定, 之后只复用不再分配. 同一时刻只服务一次插值调用.
#[derive(Debug, Clone)]
pub struct ScratchBuffer {
    data: Vec<i32>,
    stride: usize,
    rows: usize,
}

impl ScratchBuffer {
    /// 按最大块宽高创建, 每行额外留出滤波抽头所需的列
    pub fn new(max_width: usize, max_height: usize) -> Self {
        let stride = max_width + SCRATCH_MARGIN;
        Self {
            data: vec![0; stride * max_height],
            stride,
            rows: max_height,
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// 取出 `columns x rows` 区域的可写视图
    pub fn region_mut(&mut self, columns: usize, rows: usize) -> &mut [i32] {
        assert!(
            columns <= self.stride && rows <= self.rows,
            "暂存区不足: 需要 {columns}x{rows}, 容量 {}x{}",
            self.stride,
            self.rows
        );
        &mut self.data[..self.stride * rows]
    }
}
