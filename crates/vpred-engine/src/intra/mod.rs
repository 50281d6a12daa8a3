//! 帧内预测.
//!
//! 提供 35 种帧内模式: Planar、DC 与 33 个角度方向. 模式下标经固定表映射为方向下标,
//! 方向 0 为 DC. 亮度 DC 可选边界滤波, 亮度参考样本可选 [1,2,1] 平滑.

mod angular;
mod dc;
mod planar;
mod reference;

pub use reference::ReferenceSamples;

use log::debug;
use vpred_core::block::is_valid_block_size;
use vpred_core::{
    BitDepth, BlockGeometry, BlockMut, Component, Neighbors, Plane, PredResult,
    PredictionConfig, Sample,
};

/// 帧内模式数量 (下标 0..=34)
pub const NUM_INTRA_MODES: u8 = 35;
/// 竖直模式下标
pub const VER_IDX: u8 = 0;
/// 水平模式下标
pub const HOR_IDX: u8 = 1;
/// DC 模式下标
pub const DC_IDX: u8 = 2;
/// Planar 模式下标
pub const PLANAR_IDX: u8 = 34;
/// 色度沿用亮度模式 (DM) 的色度模式下标
pub const DM_CHROMA_IDX: u8 = 4;
/// 色度候选与亮度模式重复时的替代模式 (竖直 +32/32, 45° 对角)
const CHROMA_SUBSTITUTE_IDX: u8 = 6;

/// 模式下标 -> 方向下标
const ANG_MODE_ORDER: [u8; 34] = [
    9, 25, 0, 1, 5, 13, 17, 21, 29, 33, 3, 7, 11, 15, 19, 23, 27, 31, 2, 4, 6, 8, 10, 12, 14, 16,
    18, 20, 22, 24, 26, 28, 30, 32,
];

/// 帧内预测模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntraMode {
    Planar,
    Dc,
    /// 角度方向, 方向下标 `1..=33`
    Angular { direction: u8 },
}

impl IntraMode {
    /// 由模式下标 `0..=34` 构造
    pub fn from_index(index: u8) -> Self {
        assert!(index < NUM_INTRA_MODES, "帧内模式下标越界: {index}");
        if index == PLANAR_IDX {
            return Self::Planar;
        }
        match ANG_MODE_ORDER[usize::from(index)] {
            0 => Self::Dc,
            direction => Self::Angular { direction },
        }
    }

    /// 角度下标 `-8..=8` (非角度模式为 0)
    pub fn angle_index(self) -> i32 {
        match self {
            Self::Angular { direction } => angular::direction_params(direction).1,
            _ => 0,
        }
    }

    /// 1/32 样本单位的预测角度 (非角度模式为 0)
    pub fn angle(self) -> i32 {
        angular::intra_pred_angle(self.angle_index())
    }

    /// 是否以竖直方向为主 (仅角度模式有意义)
    pub fn is_vertical(self) -> bool {
        match self {
            Self::Angular { direction } => angular::direction_params(direction).0,
            _ => false,
        }
    }
}

/// 色度候选模式列表 `[Planar, 竖直, 水平, DC, DM]`.
///
/// 亮度模式与前四项之一重复时, 该项替换为 45° 对角模式.
pub fn chroma_mode_candidates(luma_mode: u8) -> [u8; 5] {
    assert!(luma_mode < NUM_INTRA_MODES, "亮度模式下标越界: {luma_mode}");
    let mut list = [PLANAR_IDX, VER_IDX, HOR_IDX, DC_IDX, luma_mode];
    if let Some(dup) = list[..4].iter().position(|&m| m == luma_mode) {
        list[dup] = CHROMA_SUBSTITUTE_IDX;
    }
    list
}

/// 由色度模式下标 `0..=4` 与亮度模式推导实际使用的模式下标
pub fn derive_chroma_mode(chroma_idx: u8, luma_mode: u8) -> u8 {
    assert!(chroma_idx <= DM_CHROMA_IDX, "色度模式下标越界: {chroma_idx}");
    chroma_mode_candidates(luma_mode)[usize::from(chroma_idx)]
}

/// 帧内预测器, 持有序列级的位深与滤波开关, 预测本身无状态
#[derive(Debug, Clone)]
pub struct IntraPredictor {
    bit_depth: BitDepth,
    dc_boundary_filter: bool,
    intra_smoothing: bool,
}

impl IntraPredictor {
    pub fn new(config: &PredictionConfig) -> PredResult<Self> {
        config.validate()?;
        let bit_depth = config.internal_bit_depth()?;
        debug!(
            "帧内预测器已创建: bit_depth={}, dc_filter={}, smoothing={}",
            bit_depth.bits(),
            config.dc_boundary_filter,
            config.intra_smoothing
        );
        Ok(Self {
            bit_depth,
            dc_boundary_filter: config.dc_boundary_filter,
            intra_smoothing: config.intra_smoothing,
        })
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// 对一个方块做帧内预测.
    ///
    /// `origin` 为块左上角在 `src` (已重建样本) 中的索引, 结果写入 `dst` 的左上角.
    #[allow(clippy::too_many_arguments)]
    pub fn predict(
        &self,
        src: &[Sample],
        origin: usize,
        stride: usize,
        width: usize,
        height: usize,
        mode_index: u8,
        component: Component,
        neighbors: Neighbors,
        dst: &mut BlockMut<'_>,
    ) {
        assert_eq!(width, height, "帧内预测块必须为方块: {width}x{height}");
        assert!(is_valid_block_size(width), "帧内预测块尺寸非法: {width}");
        let refs = ReferenceSamples::build(src, origin, stride, width, neighbors, self.bit_depth);
        self.predict_with_reference(&refs, mode_index, component, neighbors, dst);
    }

    /// 从带扩展区的平面上读取邻居并预测 `block` (该分量坐标系下的几何)
    pub fn predict_in_plane(
        &self,
        plane: &Plane,
        block: &BlockGeometry,
        mode_index: u8,
        component: Component,
        neighbors: Neighbors,
        dst: &mut BlockMut<'_>,
    ) {
        let origin = plane.index(block.x as isize, block.y as isize);
        self.predict(
            plane.data(),
            origin,
            plane.stride(),
            block.width,
            block.height,
            mode_index,
            component,
            neighbors,
            dst,
        );
    }

    /// 使用已构建的参考边界预测
    pub fn predict_with_reference(
        &self,
        refs: &ReferenceSamples,
        mode_index: u8,
        component: Component,
        neighbors: Neighbors,
        dst: &mut BlockMut<'_>,
    ) {
        let mode = IntraMode::from_index(mode_index);
        let size = refs.size();
        let luma = component == Component::Luma;

        let smoothed;
        let refs = if luma && self.intra_smoothing && reference::needs_smoothing(mode, size) {
            smoothed = refs.smoothed();
            &smoothed
        } else {
            refs
        };

        match mode {
            IntraMode::Planar => planar::predict(refs, dst),
            IntraMode::Dc => {
                dc::predict(refs, neighbors, dst);
                if luma
                    && self.dc_boundary_filter
                    && neighbors.has_above()
                    && neighbors.has_left()
                {
                    dc::boundary_filter(refs, self.bit_depth, dst);
                }
            }
            IntraMode::Angular { direction } => angular::predict(refs, direction, dst),
        }
    }
}

/// DC 值 (不做边界滤波), 供模式决策等外部调用
pub fn dc_value(refs: &ReferenceSamples, neighbors: Neighbors) -> i32 {
    dc::dc_value(refs, neighbors)
}

/// DC 边界滤波强度: 0 不滤波, 1..=3 为三档权重
pub fn dc_filter_profile(size: usize) -> u8 {
    dc::filter_profile(size)
}
