//! 双向预测合并: 平均与显式加权.

use vpred_core::{BitDepth, BlockMut, Component, Sample};

use super::filter::Precision;

/// 单个参考/分量的加权预测参数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WpParam {
    /// 码流中是否携带了该组参数
    pub present: bool,
    pub log2_denom: u32,
    pub weight: i32,
    /// 8 位尺度下的偏移
    pub offset: i32,
}

impl WpParam {
    pub const fn new(log2_denom: u32, weight: i32, offset: i32) -> Self {
        Self {
            present: true,
            log2_denom,
            weight,
            offset,
        }
    }

    /// 未携带参数, 仅给出分母 (权重默认为 `1 << log2_denom`)
    pub const fn absent(log2_denom: u32) -> Self {
        Self {
            present: false,
            log2_denom,
            weight: 0,
            offset: 0,
        }
    }
}

/// 解析后的加权参数, 可直接代入合并公式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWeight {
    pub weight: i32,
    /// 已按内部位深缩放的偏移
    pub offset: i32,
    /// `log2_denom` 加上中间精度的额外位数
    pub shift: u32,
}

/// 两个参考列表上按参考下标、分量组织的加权参数表
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    lists: [Vec<[WpParam; 3]>; 2],
}

impl WeightTable {
    /// 每个列表 `num_refs[list]` 个参考, 初始全部为未携带
    pub fn new(num_refs: [usize; 2], luma_log2_denom: u32, chroma_log2_denom: u32) -> Self {
        let entry = [
            WpParam::absent(luma_log2_denom),
            WpParam::absent(chroma_log2_denom),
            WpParam::absent(chroma_log2_denom),
        ];
        Self {
            lists: num_refs.map(|n| vec![entry; n]),
        }
    }

    pub fn set(&mut self, list: usize, ref_idx: usize, component: Component, param: WpParam) {
        self.lists[list][ref_idx][component.index()] = param;
    }

    pub fn get(&self, list: usize, ref_idx: usize, component: Component) -> WpParam {
        assert!(list < 2, "参考列表下标越界: {list}");
        let refs = &self.lists[list];
        assert!(
            ref_idx < refs.len(),
            "加权表缺少参考: list={list}, ref_idx={ref_idx}, 共 {}",
            refs.len()
        );
        refs[ref_idx][component.index()]
    }

    /// 解析出合并所用的权重/偏移/移位量.
    ///
    /// 未携带时权重为 `1 << log2_denom`、偏移为 0, 此时加权合并退化为带舍入的平均.
    pub fn resolve(
        &self,
        list: usize,
        ref_idx: usize,
        component: Component,
        bit_depth: BitDepth,
        precision: Precision,
    ) -> ResolvedWeight {
        let param = self.get(list, ref_idx, component);
        let (weight, offset) = if param.present {
            (param.weight, param.offset << (bit_depth.bits() - 8))
        } else {
            (1 << param.log2_denom, 0)
        };
        ResolvedWeight {
            weight,
            offset,
            shift: param.log2_denom + precision_shift(precision, bit_depth),
        }
    }
}

/// 插值结果相对输出位深多出的位数
pub fn precision_shift(precision: Precision, bit_depth: BitDepth) -> u32 {
    match precision {
        Precision::Nominal => 0,
        Precision::High => bit_depth.high_precision_shift(),
    }
}

/// 两路预测取平均.
///
/// 输入为 `precision` 精度的插值结果, 高精度时先加回存储偏移.
/// `rounding` 为 false 时舍入偏移少 1, 即平分点向下取整.
#[allow(clippy::too_many_arguments)]
pub fn average_bi(
    src0: &[Sample],
    src1: &[Sample],
    src_stride: usize,
    width: usize,
    height: usize,
    precision: Precision,
    rounding: bool,
    bit_depth: BitDepth,
    dst: &mut BlockMut<'_>,
) {
    let shift = precision_shift(precision, bit_depth);
    let round = if rounding { 1 << shift } else { (1 << shift) - 1 };
    let offset = round + 2 * precision.storage_offset();
    for y in 0..height {
        let a = &src0[y * src_stride..y * src_stride + width];
        let b = &src1[y * src_stride..y * src_stride + width];
        for ((out, &p0), &p1) in dst.row_mut(y, width).iter_mut().zip(a).zip(b) {
            *out = bit_depth.clip((i32::from(p0) + i32::from(p1) + offset) >> (shift + 1));
        }
    }
}

/// 两路预测按显式权重合并.
///
/// 舍入规则与 [`average_bi`] 相同: 默认权重下两者结果逐样本一致.
#[allow(clippy::too_many_arguments)]
pub fn weighted_bi(
    src0: &[Sample],
    src1: &[Sample],
    src_stride: usize,
    width: usize,
    height: usize,
    w0: &ResolvedWeight,
    w1: &ResolvedWeight,
    precision: Precision,
    rounding: bool,
    bit_depth: BitDepth,
    dst: &mut BlockMut<'_>,
) {
    assert_eq!(w0.shift, w1.shift, "两个列表的加权分母必须一致");
    let shift = w0.shift;
    let bias = precision.storage_offset() * (w0.weight + w1.weight);
    let round = ((w0.offset + w1.offset + 1) << shift) - i32::from(!rounding) + bias;
    for y in 0..height {
        let a = &src0[y * src_stride..y * src_stride + width];
        let b = &src1[y * src_stride..y * src_stride + width];
        for ((out, &p0), &p1) in dst.row_mut(y, width).iter_mut().zip(a).zip(b) {
            let v = i32::from(p0) * w0.weight + i32::from(p1) * w1.weight + round;
            *out = bit_depth.clip(v >> (shift + 1));
        }
    }
}
