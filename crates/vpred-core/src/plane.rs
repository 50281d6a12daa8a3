//! 带边界扩展的样本平面与参考图像.
//!
//! 平面四周保留 `margin` 个样本的扩展区, 帧间插值的滤波抽头与越界运动矢量
//! 只会读到扩展区, 不会越过缓冲区. 扩展区由 [`Plane::extend_borders`] 复制边缘样本填充.

use crate::error::{PredError, PredResult};
use crate::sample::{BitDepth, Component, Sample};

/// 单个颜色平面
#[derive(Debug, Clone)]
pub struct Plane {
    data: Vec<Sample>,
    width: usize,
    height: usize,
    margin: usize,
    stride: usize,
}

impl Plane {
    /// 创建平面, 有效区与扩展区全部填充 `fill`
    pub fn new(width: usize, height: usize, margin: usize, fill: Sample) -> PredResult<Self> {
        if width == 0 || height == 0 {
            return Err(PredError::InvalidArgument(format!(
                "平面尺寸必须大于 0, width={width}, height={height}"
            )));
        }
        let stride = width + 2 * margin;
        let rows = height + 2 * margin;
        Ok(Self {
            data: vec![fill; stride * rows],
            width,
            height,
            margin,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn margin(&self) -> usize {
        self.margin
    }

    /// 行跨度 (包含两侧扩展区)
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// 样本 (0, 0) 在底层缓冲区中的索引
    pub fn origin(&self) -> usize {
        self.margin * self.stride + self.margin
    }

    /// 坐标 (x, y) 对应的缓冲区索引, 允许落在扩展区内
    #[inline]
    pub fn index(&self, x: isize, y: isize) -> usize {
        let m = self.margin as isize;
        assert!(
            x >= -m && y >= -m && x < (self.width as isize + m) && y < (self.height as isize + m),
            "平面坐标越过扩展区: ({x}, {y}), margin={}",
            self.margin
        );
        ((y + m) as usize) * self.stride + (x + m) as usize
    }

    /// 读取样本 (允许扩展区坐标)
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> Sample {
        self.data[self.index(x, y)]
    }

    /// 写入样本 (允许扩展区坐标)
    #[inline]
    pub fn set(&mut self, x: isize, y: isize, value: Sample) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// 底层缓冲区
    pub fn data(&self) -> &[Sample] {
        &self.data
    }

    /// 底层缓冲区 (可写)
    pub fn data_mut(&mut self) -> &mut [Sample] {
        &mut self.data
    }

    /// 填充整个平面 (含扩展区)
    pub fn fill(&mut self, value: Sample) {
        self.data.fill(value);
    }

    /// 用边缘样本填充扩展区: 先左右复制每一行, 再上下复制整行
    pub fn extend_borders(&mut self) {
        let m = self.margin;
        if m == 0 {
            return;
        }
        let stride = self.stride;
        for y in 0..self.height {
            let row = (y + m) * stride;
            let left = self.data[row + m];
            let right = self.data[row + m + self.width - 1];
            self.data[row..row + m].fill(left);
            self.data[row + m + self.width..row + stride].fill(right);
        }

        let top_row = m * stride;
        for y in 0..m {
            self.data.copy_within(top_row..top_row + stride, y * stride);
        }
        let bottom_row = (m + self.height - 1) * stride;
        for y in (m + self.height)..(2 * m + self.height) {
            self.data
                .copy_within(bottom_row..bottom_row + stride, y * stride);
        }
    }
}

/// 4:2:0 参考图像 (Y/Cb/Cr 三个平面)
#[derive(Debug, Clone)]
pub struct Picture {
    planes: [Plane; 3],
    bit_depth: BitDepth,
}

impl Picture {
    /// 按最大 CU 尺寸推荐的扩展区宽度 (运动矢量裁剪后的最远位置 + 滤波抽头)
    pub const fn default_margin(max_cu_size: usize) -> usize {
        max_cu_size + 16
    }

    /// 创建图像, 三个平面全部填充中灰值.
    ///
    /// 色度平面宽高与扩展区均为亮度的一半.
    pub fn new(width: usize, height: usize, margin: usize, bit_depth: BitDepth) -> PredResult<Self> {
        if width % 2 != 0 || height % 2 != 0 {
            return Err(PredError::InvalidArgument(format!(
                "4:2:0 图像宽高必须为偶数, width={width}, height={height}"
            )));
        }
        let mid = bit_depth.mid_value() as Sample;
        let luma = Plane::new(width, height, margin, mid)?;
        let cb = Plane::new(width / 2, height / 2, margin / 2, mid)?;
        let cr = Plane::new(width / 2, height / 2, margin / 2, mid)?;
        Ok(Self {
            planes: [luma, cb, cr],
            bit_depth,
        })
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// 亮度宽度
    pub fn width(&self) -> usize {
        self.planes[0].width()
    }

    /// 亮度高度
    pub fn height(&self) -> usize {
        self.planes[0].height()
    }

    pub fn plane(&self, component: Component) -> &Plane {
        &self.planes[component.index()]
    }

    pub fn plane_mut(&mut self, component: Component) -> &mut Plane {
        &mut self.planes[component.index()]
    }

    /// 扩展全部平面的边界
    pub fn extend_borders(&mut self) {
        for plane in &mut self.planes {
            plane.extend_borders();
        }
    }
}
