//! 运动矢量与运动信息.

use crate::block::BlockGeometry;

/// 运动矢量, 单位为 1/4 亮度样本 (4:2:0 色度上即 1/8 色度样本)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MotionVector {
    pub hor: i32,
    pub ver: i32,
}

impl MotionVector {
    pub const ZERO: MotionVector = MotionVector { hor: 0, ver: 0 };

    pub const fn new(hor: i32, ver: i32) -> Self {
        Self { hor, ver }
    }

    /// 预测矢量 + 残差矢量
    pub const fn add(self, other: MotionVector) -> Self {
        Self {
            hor: self.hor + other.hor,
            ver: self.ver + other.ver,
        }
    }

    /// 亮度整像素偏移 (算术右移, 负数向下取整)
    pub const fn luma_integer(self) -> (i32, i32) {
        (self.hor >> 2, self.ver >> 2)
    }

    /// 亮度 1/4 像素相位, 取值 [0, 3]
    pub const fn luma_fraction(self) -> (usize, usize) {
        ((self.hor & 3) as usize, (self.ver & 3) as usize)
    }

    /// 4:2:0 色度整像素偏移
    pub const fn chroma_integer(self) -> (i32, i32) {
        (self.hor >> 3, self.ver >> 3)
    }

    /// 4:2:0 色度 1/8 像素相位, 取值 [0, 7]
    pub const fn chroma_fraction(self) -> (usize, usize) {
        ((self.hor & 7) as usize, (self.ver & 7) as usize)
    }
}

/// 单个参考列表上的运动信息. `ref_idx < 0` 表示该列表未使用.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MvField {
    pub ref_idx: i8,
    pub mv: MotionVector,
}

impl MvField {
    /// 未使用的列表
    pub const UNUSED: MvField = MvField {
        ref_idx: -1,
        mv: MotionVector::ZERO,
    };

    pub const fn new(ref_idx: i8, mv: MotionVector) -> Self {
        Self { ref_idx, mv }
    }

    pub const fn is_used(&self) -> bool {
        self.ref_idx >= 0
    }
}

impl Default for MvField {
    fn default() -> Self {
        Self::UNUSED
    }
}

/// 图像边界外允许的额外偏移 (样本)
const MV_CLIP_OFFSET: i32 = 8;

/// 把运动矢量裁剪到参考图像可寻址区域内.
///
/// 裁剪后块最多越出图像边缘 `MV_CLIP_OFFSET` 个样本 (左/上方向再加一个最大 CU),
/// 扩展区宽度不小于 [`crate::Picture::default_margin`] 时不会越界读取.
pub fn clip_mv(
    mv: MotionVector,
    block: &BlockGeometry,
    pic_width: usize,
    pic_height: usize,
    max_cu_size: usize,
) -> MotionVector {
    let x = block.x as i32;
    let y = block.y as i32;
    let cu = max_cu_size as i32;

    let hor_max = (pic_width as i32 + MV_CLIP_OFFSET - x - 1) << 2;
    let hor_min = (-cu - MV_CLIP_OFFSET - x + 1) << 2;
    let ver_max = (pic_height as i32 + MV_CLIP_OFFSET - y - 1) << 2;
    let ver_min = (-cu - MV_CLIP_OFFSET - y + 1) << 2;

    MotionVector {
        hor: mv.hor.clamp(hor_min, hor_max),
        ver: mv.ver.clamp(ver_min, ver_max),
    }
}
