//! 帧内参考样本构建.
//!
//! 参考边界由上方行与左侧列组成, 两者都以块左上角外侧的角点样本为起点, 长度各为 `2N+1`:
//! - `above[0]` 为角点, `above[1..=N]` 为正上方, `above[N+1..=2N]` 为右上方
//! - `left[0]` 为角点, `left[1..=N]` 为正左方, `left[N+1..=2N]` 为左下方
//!
//! 不可用的样本按 "自左下向上、再沿上方向右" 的扫描顺序用最近的可用样本替代,
//! 全部不可用时填充中灰值.

use vpred_core::{BitDepth, Neighbors, Sample, block::is_valid_block_size};

use super::IntraMode;

/// 一个方块的帧内参考边界
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSamples {
    size: usize,
    above: Vec<i32>,
    left: Vec<i32>,
}

impl ReferenceSamples {
    /// 从已重建样本构建参考边界.
    ///
    /// `origin` 为块左上角样本在 `src` 中的索引. 只读取 `neighbors` 标记为可用的区域,
    /// 因此不可用区域可以落在缓冲区之外.
    pub fn build(
        src: &[Sample],
        origin: usize,
        stride: usize,
        size: usize,
        neighbors: Neighbors,
        bit_depth: BitDepth,
    ) -> Self {
        let n = size;
        let len = 4 * n + 1;
        let corner_pos = 2 * n;

        // 扫描线: [0] 为左下方最底部样本, [2N] 为角点, [4N] 为右上方最右样本
        let mut line = vec![0i32; len];
        let mut avail = vec![false; len];

        let read = |dx: isize, dy: isize| -> i32 {
            let idx = origin as isize + dy * stride as isize + dx;
            assert!(idx >= 0, "参考样本位于缓冲区之前: dx={dx}, dy={dy}");
            i32::from(src[idx as usize])
        };

        // 左方与左下方: left[k] 位于 (-1, k-1)
        for k in 1..=2 * n {
            let flag = if k <= n {
                Neighbors::LEFT
            } else {
                Neighbors::BELOW_LEFT
            };
            if neighbors.contains(flag) {
                let pos = corner_pos - k;
                line[pos] = read(-1, k as isize - 1);
                avail[pos] = true;
            }
        }
        if neighbors.contains(Neighbors::ABOVE_LEFT) {
            line[corner_pos] = read(-1, -1);
            avail[corner_pos] = true;
        }
        // 上方与右上方: above[k] 位于 (k-1, -1)
        for k in 1..=2 * n {
            let flag = if k <= n {
                Neighbors::ABOVE
            } else {
                Neighbors::ABOVE_RIGHT
            };
            if neighbors.contains(flag) {
                let pos = corner_pos + k;
                line[pos] = read(k as isize - 1, -1);
                avail[pos] = true;
            }
        }

        match avail.iter().position(|&a| a) {
            None => line.fill(bit_depth.mid_value()),
            Some(first) => {
                let seed = line[first];
                line[..first].fill(seed);
                for pos in first + 1..len {
                    if !avail[pos] {
                        line[pos] = line[pos - 1];
                    }
                }
            }
        }

        Self::from_line(n, &line)
    }

    /// 由角点、上方 `2N` 个样本与左侧 `2N` 个样本直接构造 (全部视为可用)
    pub fn from_parts(corner: i32, above: &[i32], left: &[i32]) -> Self {
        assert_eq!(above.len(), left.len(), "上方与左侧参考长度必须一致");
        assert!(
            above.len() >= 8 && above.len() % 2 == 0,
            "参考长度必须为 2N, 实际为 {}",
            above.len()
        );
        let size = above.len() / 2;
        assert_block_size(size);
        let mut a = Vec::with_capacity(2 * size + 1);
        a.push(corner);
        a.extend_from_slice(above);
        let mut l = Vec::with_capacity(2 * size + 1);
        l.push(corner);
        l.extend_from_slice(left);
        Self {
            size,
            above: a,
            left: l,
        }
    }

    /// 全部参考样本为同一值
    pub fn constant(size: usize, value: i32) -> Self {
        assert_block_size(size);
        Self {
            size,
            above: vec![value; 2 * size + 1],
            left: vec![value; 2 * size + 1],
        }
    }

    fn from_line(n: usize, line: &[i32]) -> Self {
        assert_block_size(n);
        let corner_pos = 2 * n;
        let above = line[corner_pos..].to_vec();
        let left = (0..=2 * n).map(|k| line[corner_pos - k]).collect();
        Self {
            size: n,
            above,
            left,
        }
    }

    fn to_line(&self) -> Vec<i32> {
        let n = self.size;
        let mut line = Vec::with_capacity(4 * n + 1);
        line.extend((1..=2 * n).rev().map(|k| self.left[k]));
        line.extend_from_slice(&self.above);
        line
    }

    /// 块边长 N
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn corner(&self) -> i32 {
        self.above[0]
    }

    /// 上方参考, 长度 `2N+1`, 下标 0 为角点
    pub fn above(&self) -> &[i32] {
        &self.above
    }

    /// 左侧参考, 长度 `2N+1`, 下标 0 为角点
    pub fn left(&self) -> &[i32] {
        &self.left
    }

    /// [1,2,1]/4 平滑后的参考边界, 两个端点保持不变
    pub fn smoothed(&self) -> Self {
        let line = self.to_line();
        let last = line.len() - 1;
        let mut out = line.clone();
        for i in 1..last {
            out[i] = (line[i - 1] + 2 * line[i] + line[i + 1] + 2) >> 2;
        }
        Self::from_line(self.size, &out)
    }
}

/// 亮度参考样本是否需要平滑.
///
/// 以方向到纯水平/纯竖直的距离 (角度下标绝对值) 判定, Planar 视为最远, DC 从不平滑.
pub(crate) fn needs_smoothing(mode: IntraMode, size: usize) -> bool {
    let min_dist = match mode {
        IntraMode::Dc => return false,
        IntraMode::Planar => 10,
        IntraMode::Angular { .. } => mode.angle_index().unsigned_abs(),
    };
    match size {
        8 => min_dist > 7,
        16 => min_dist > 1,
        32 => min_dist > 0,
        _ => false,
    }
}

fn assert_block_size(size: usize) {
    assert!(
        is_valid_block_size(size),
        "帧内块尺寸必须是 [4, 128] 内的 2 的幂, 实际为 {size}"
    );
}
