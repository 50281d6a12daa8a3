//! 帧间预测: 分像素插值与单/双向合并.
//!
//! 每个 [`InterPredictor`] 持有自己的两遍插值暂存区和两个列表的预测缓冲区,
//! 因此以 `&mut self` 调用, 并行时每个工作线程各建一个实例.

mod filter;
mod scratch;
mod weighted;

pub use filter::{
    CHROMA_KERNELS, FilterPlan, HIGH_PRECISION_OFFSET, Kernel, LUMA_KERNELS, OutputStage,
    Precision, chroma_plan, luma_plan,
};
pub use scratch::{SCRATCH_MARGIN, ScratchBuffer};
pub use weighted::{
    ResolvedWeight, WeightTable, WpParam, average_bi, precision_shift, weighted_bi,
};

use log::debug;
use vpred_core::{
    BitDepth, BlockGeometry, BlockMut, Component, MotionVector, MvField, Picture, Plane,
    PredResult, PredictionConfig, YuvBlockMut, YuvBuffer,
};

/// 一个预测单元的几何与两个列表上的运动信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionUnit {
    /// 亮度坐标下的块位置与尺寸
    pub geometry: BlockGeometry,
    /// `fields[0]` 为 L0, `fields[1]` 为 L1
    pub fields: [MvField; 2],
}

impl PredictionUnit {
    pub const fn uni(geometry: BlockGeometry, list: usize, field: MvField) -> Self {
        let mut fields = [MvField::UNUSED; 2];
        fields[list] = field;
        Self { geometry, fields }
    }

    pub const fn bi(geometry: BlockGeometry, l0: MvField, l1: MvField) -> Self {
        Self {
            geometry,
            fields: [l0, l1],
        }
    }

    pub const fn is_bi(&self) -> bool {
        self.fields[0].is_used() && self.fields[1].is_used()
    }
}

/// 帧间预测器
#[derive(Debug)]
pub struct InterPredictor {
    bit_depth: BitDepth,
    high_accuracy_bi: bool,
    max_width: usize,
    max_height: usize,
    scratch: ScratchBuffer,
    list_buffers: [YuvBuffer; 2],
}

impl InterPredictor {
    pub fn new(config: &PredictionConfig) -> PredResult<Self> {
        config.validate()?;
        let bit_depth = config.internal_bit_depth()?;
        let (max_width, max_height) = (config.max_cu_width, config.max_cu_height);
        debug!(
            "帧间预测器已创建: bit_depth={}, max_cu={}x{}, high_accuracy_bi={}",
            bit_depth.bits(),
            max_width,
            max_height,
            config.high_accuracy_bi
        );
        Ok(Self {
            bit_depth,
            high_accuracy_bi: config.high_accuracy_bi,
            max_width,
            max_height,
            scratch: ScratchBuffer::new(max_width, max_height),
            list_buffers: [
                YuvBuffer::new(max_width, max_height),
                YuvBuffer::new(max_width, max_height),
            ],
        })
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// 亮度插值: `(x, y)` 为块在参考平面上的整像素位置, `mv` 以 1/4 样本为单位
    #[allow(clippy::too_many_arguments)]
    pub fn interpolate_luma(
        &mut self,
        plane: &Plane,
        x: isize,
        y: isize,
        mv: MotionVector,
        width: usize,
        height: usize,
        precision: Precision,
        dst: &mut BlockMut<'_>,
    ) {
        self.check_block(width, height);
        interpolate_luma_block(
            &mut self.scratch,
            self.bit_depth,
            plane,
            x,
            y,
            mv,
            width,
            height,
            precision,
            dst,
        );
    }

    /// 4:2:0 色度插值: `(x, y)`、宽高均为色度坐标, `mv` 仍为亮度 1/4 样本单位
    #[allow(clippy::too_many_arguments)]
    pub fn interpolate_chroma(
        &mut self,
        plane: &Plane,
        x: isize,
        y: isize,
        mv: MotionVector,
        width: usize,
        height: usize,
        precision: Precision,
        dst: &mut BlockMut<'_>,
    ) {
        self.check_block(width, height);
        interpolate_chroma_block(
            &mut self.scratch,
            self.bit_depth,
            plane,
            x,
            y,
            mv,
            width,
            height,
            precision,
            dst,
        );
    }

    /// 对预测单元做运动补偿, 三个分量写入 `dst`.
    ///
    /// `ref_lists[list][ref_idx]` 为参考图像. 只用一个列表时直接复制插值结果;
    /// 两个列表时按 `weights` 加权合并, 无加权表时取平均, `rounding` 控制平分点的舍入方向.
    pub fn motion_compensation(
        &mut self,
        pu: &PredictionUnit,
        ref_lists: [&[Picture]; 2],
        weights: Option<&WeightTable>,
        rounding: bool,
        dst: &mut YuvBlockMut<'_>,
    ) {
        let used = pu.fields.map(|f| f.is_used());
        assert!(used[0] || used[1], "预测单元未使用任何参考列表");
        let geo = pu.geometry;
        self.check_block(geo.width, geo.height);

        let bi = used[0] && used[1];
        let precision = if bi && self.high_accuracy_bi {
            Precision::High
        } else {
            Precision::Nominal
        };

        for list in 0..2 {
            if !used[list] {
                continue;
            }
            let field = pu.fields[list];
            let refs = ref_lists[list];
            let ref_idx = field.ref_idx as usize;
            assert!(
                ref_idx < refs.len(),
                "参考下标越界: list={list}, ref_idx={ref_idx}, 共 {}",
                refs.len()
            );
            let picture = &refs[ref_idx];
            debug_assert_eq!(picture.bit_depth(), self.bit_depth, "参考图像位深与配置不一致");

            let mut out = self.list_buffers[list].as_block_mut();
            interpolate_luma_block(
                &mut self.scratch,
                self.bit_depth,
                picture.plane(Component::Luma),
                geo.x as isize,
                geo.y as isize,
                field.mv,
                geo.width,
                geo.height,
                precision,
                &mut out.luma,
            );
            let c_geo = geo.chroma();
            for component in [Component::Cb, Component::Cr] {
                interpolate_chroma_block(
                    &mut self.scratch,
                    self.bit_depth,
                    picture.plane(component),
                    c_geo.x as isize,
                    c_geo.y as isize,
                    field.mv,
                    c_geo.width,
                    c_geo.height,
                    precision,
                    out.plane_mut(component),
                );
            }
        }

        if !bi {
            let list = if used[0] { 0 } else { 1 };
            self.list_buffers[list].copy_to(geo.width, geo.height, dst);
            return;
        }

        let [buf0, buf1] = &self.list_buffers;
        for component in Component::ALL {
            let g = geo.for_component(component);
            let stride = buf0.stride(component);
            let (src0, src1) = (buf0.plane(component), buf1.plane(component));
            let out = dst.plane_mut(component);
            match weights {
                Some(table) => {
                    let w0 = table.resolve(
                        0,
                        pu.fields[0].ref_idx as usize,
                        component,
                        self.bit_depth,
                        precision,
                    );
                    let w1 = table.resolve(
                        1,
                        pu.fields[1].ref_idx as usize,
                        component,
                        self.bit_depth,
                        precision,
                    );
                    weighted_bi(
                        src0,
                        src1,
                        stride,
                        g.width,
                        g.height,
                        &w0,
                        &w1,
                        precision,
                        rounding,
                        self.bit_depth,
                        out,
                    );
                }
                None => average_bi(
                    src0,
                    src1,
                    stride,
                    g.width,
                    g.height,
                    precision,
                    rounding,
                    self.bit_depth,
                    out,
                ),
            }
        }
    }

    fn check_block(&self, width: usize, height: usize) {
        assert!(width > 0 && height > 0, "块尺寸必须大于 0: {width}x{height}");
        assert!(
            width <= self.max_width && height <= self.max_height,
            "块 {width}x{height} 超出配置的最大尺寸 {}x{}",
            self.max_width,
            self.max_height
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn interpolate_luma_block(
    scratch: &mut ScratchBuffer,
    bit_depth: BitDepth,
    plane: &Plane,
    x: isize,
    y: isize,
    mv: MotionVector,
    width: usize,
    height: usize,
    precision: Precision,
    dst: &mut BlockMut<'_>,
) {
    let (ix, iy) = mv.luma_integer();
    let (fx, fy) = mv.luma_fraction();
    run_plan(
        scratch,
        bit_depth,
        plane,
        x + ix as isize,
        y + iy as isize,
        luma_plan(fx, fy),
        width,
        height,
        precision,
        dst,
    );
}

#[allow(clippy::too_many_arguments)]
fn interpolate_chroma_block(
    scratch: &mut ScratchBuffer,
    bit_depth: BitDepth,
    plane: &Plane,
    x: isize,
    y: isize,
    mv: MotionVector,
    width: usize,
    height: usize,
    precision: Precision,
    dst: &mut BlockMut<'_>,
) {
    let (ix, iy) = mv.chroma_integer();
    let (fx, fy) = mv.chroma_fraction();
    run_plan(
        scratch,
        bit_depth,
        plane,
        x + ix as isize,
        y + iy as isize,
        chroma_plan(fx, fy),
        width,
        height,
        precision,
        dst,
    );
}

/// 滤波读取的整个窗口必须落在平面扩展区内
fn assert_window(
    plane: &Plane,
    x: isize,
    y: isize,
    width: usize,
    height: usize,
    horizontal: Option<Kernel>,
    vertical: Option<Kernel>,
) {
    let span = |k: Option<Kernel>| match k {
        Some(k) => (k.lead() as isize, (k.taps() - 1 - k.lead()) as isize),
        None => (0, 0),
    };
    let (lead_x, tail_x) = span(horizontal);
    let (lead_y, tail_y) = span(vertical);
    plane.index(x - lead_x, y - lead_y);
    plane.index(
        x + width as isize - 1 + tail_x,
        y + height as isize - 1 + tail_y,
    );
}

/// 按滤波方案插值 `width x height` 个样本, `(x, y)` 为整像素起点
#[allow(clippy::too_many_arguments)]
fn run_plan(
    scratch: &mut ScratchBuffer,
    bit_depth: BitDepth,
    plane: &Plane,
    x: isize,
    y: isize,
    plan: FilterPlan,
    width: usize,
    height: usize,
    precision: Precision,
    dst: &mut BlockMut<'_>,
) {
    let src = plane.data();
    let stride = plane.stride();
    let stage = OutputStage::new(precision, bit_depth, plan.passes());

    match plan {
        FilterPlan::Copy => {
            assert_window(plane, x, y, width, height, None, None);
            let origin = plane.index(x, y);
            for row in 0..height {
                let line = &src[origin + row * stride..origin + row * stride + width];
                for (out, &s) in dst.row_mut(row, width).iter_mut().zip(line) {
                    *out = stage.apply(i32::from(s));
                }
            }
        }
        FilterPlan::Horizontal(kernel) => {
            assert_window(plane, x, y, width, height, Some(kernel), None);
            let origin = plane.index(x, y);
            for row in 0..height {
                let base = origin + row * stride;
                for (col, out) in dst.row_mut(row, width).iter_mut().enumerate() {
                    *out = stage.apply(kernel.apply(src, base + col, 1));
                }
            }
        }
        FilterPlan::Vertical(kernel) => {
            assert_window(plane, x, y, width, height, None, Some(kernel));
            let origin = plane.index(x, y);
            for row in 0..height {
                let base = origin + row * stride;
                for (col, out) in dst.row_mut(row, width).iter_mut().enumerate() {
                    *out = stage.apply(kernel.apply(src, base + col, stride));
                }
            }
        }
        FilterPlan::TwoPass {
            vertical,
            horizontal,
        } => {
            assert_window(plane, x, y, width, height, Some(horizontal), Some(vertical));
            let lead = horizontal.lead();
            let columns = width + horizontal.taps() - 1;
            let tmp_stride = scratch.stride();
            let tmp = scratch.region_mut(columns, height);

            // 第一遍: 从 x - lead 开始的 columns 列做竖直滤波, 保留未移位的和
            let origin = plane.index(x - lead as isize, y);
            for row in 0..height {
                let base = origin + row * stride;
                let line = &mut tmp[row * tmp_stride..row * tmp_stride + columns];
                for (col, t) in line.iter_mut().enumerate() {
                    *t = vertical.apply(src, base + col, stride);
                }
            }

            for row in 0..height {
                let base = row * tmp_stride + lead;
                for (col, out) in dst.row_mut(row, width).iter_mut().enumerate() {
                    *out = stage.apply(horizontal.apply(&*tmp, base + col, 1));
                }
            }
        }
    }
}
