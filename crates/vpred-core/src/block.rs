//! 预测块几何描述与输出缓冲区视图.

use crate::sample::{Component, Sample};

/// 支持的最小块边长
pub const MIN_BLOCK_SIZE: usize = 4;
/// 支持的最大块边长
pub const MAX_BLOCK_SIZE: usize = 128;

/// 预测块几何描述 (亮度坐标)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGeometry {
    /// 块左上角在图像中的横坐标
    pub x: usize,
    /// 块左上角在图像中的纵坐标
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl BlockGeometry {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 对应的 4:2:0 色度块
    pub const fn chroma(&self) -> Self {
        Self {
            x: self.x / 2,
            y: self.y / 2,
            width: self.width / 2,
            height: self.height / 2,
        }
    }

    /// 指定分量上的几何
    pub const fn for_component(&self, component: Component) -> Self {
        if component.is_chroma() {
            self.chroma()
        } else {
            *self
        }
    }
}

/// 块边长是否为 [4, 128] 内的 2 的幂
pub fn is_valid_block_size(size: usize) -> bool {
    size.is_power_of_two() && (MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&size)
}

/// 调用方持有的单平面输出视图
#[derive(Debug)]
pub struct BlockMut<'a> {
    pub data: &'a mut [Sample],
    pub stride: usize,
}

impl<'a> BlockMut<'a> {
    pub fn new(data: &'a mut [Sample], stride: usize) -> Self {
        Self { data, stride }
    }

    /// 第 `y` 行的前 `width` 个样本
    #[inline]
    pub fn row_mut(&mut self, y: usize, width: usize) -> &mut [Sample] {
        let start = y * self.stride;
        &mut self.data[start..start + width]
    }
}

/// 调用方持有的 Y/Cb/Cr 输出视图
#[derive(Debug)]
pub struct YuvBlockMut<'a> {
    pub luma: BlockMut<'a>,
    pub cb: BlockMut<'a>,
    pub cr: BlockMut<'a>,
}

impl<'a> YuvBlockMut<'a> {
    pub fn plane_mut(&mut self, component: Component) -> &mut BlockMut<'a> {
        match component {
            Component::Luma => &mut self.luma,
            Component::Cb => &mut self.cb,
            Component::Cr => &mut self.cr,
        }
    }
}

/// 自有的 4:2:0 预测缓冲区
#[derive(Debug, Clone)]
pub struct YuvBuffer {
    planes: [Vec<Sample>; 3],
    luma_stride: usize,
    chroma_stride: usize,
    height: usize,
}

impl YuvBuffer {
    /// 按亮度宽高创建, 色度宽高减半 (至少 1)
    pub fn new(width: usize, height: usize) -> Self {
        let c_width = (width / 2).max(1);
        let c_height = (height / 2).max(1);
        Self {
            planes: [
                vec![0; width * height],
                vec![0; c_width * c_height],
                vec![0; c_width * c_height],
            ],
            luma_stride: width,
            chroma_stride: c_width,
            height,
        }
    }

    pub fn stride(&self, component: Component) -> usize {
        if component.is_chroma() {
            self.chroma_stride
        } else {
            self.luma_stride
        }
    }

    /// 亮度高度
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn plane(&self, component: Component) -> &[Sample] {
        &self.planes[component.index()]
    }

    pub fn plane_mut(&mut self, component: Component) -> &mut [Sample] {
        &mut self.planes[component.index()]
    }

    /// 全部平面的可写视图
    pub fn as_block_mut(&mut self) -> YuvBlockMut<'_> {
        let [luma, cb, cr] = &mut self.planes;
        YuvBlockMut {
            luma: BlockMut::new(luma, self.luma_stride),
            cb: BlockMut::new(cb, self.chroma_stride),
            cr: BlockMut::new(cr, self.chroma_stride),
        }
    }

    /// 把左上角 `width x height` (亮度尺寸) 的内容复制到目标视图
    pub fn copy_to(&self, width: usize, height: usize, dst: &mut YuvBlockMut<'_>) {
        for component in Component::ALL {
            let (w, h) = if component.is_chroma() {
                (width / 2, height / 2)
            } else {
                (width, height)
            };
            let src = self.plane(component);
            let src_stride = self.stride(component);
            let out = dst.plane_mut(component);
            for y in 0..h {
                let s = &src[y * src_stride..y * src_stride + w];
                out.row_mut(y, w).copy_from_slice(s);
            }
        }
    }
}
