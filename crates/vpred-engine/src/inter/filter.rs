//! 分像素插值滤波器与相位分派表.
//!
//! 亮度 1/4 像素使用 8 抽头滤波器, 色度 1/8 像素使用 4 抽头滤波器, 系数和均为 64.
//! `(frac_x, frac_y)` 的每种组合在编译期映射到一个 [`FilterPlan`].

use vpred_core::{BitDepth, Sample, sample::INTERNAL_PRECISION};

/// 单个方向上的一维滤波核
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    coeffs: &'static [i32],
}

impl Kernel {
    const fn new(coeffs: &'static [i32]) -> Self {
        Self { coeffs }
    }

    pub fn coeffs(&self) -> &'static [i32] {
        self.coeffs
    }

    pub const fn taps(&self) -> usize {
        self.coeffs.len()
    }

    /// 当前位置之前参与滤波的样本数 (8 抽头为 3, 4 抽头为 1)
    pub const fn lead(&self) -> usize {
        self.coeffs.len() / 2 - 1
    }

    /// 以 `center` 为当前位置、`step` 为抽头间距求加权和 (未移位)
    #[inline]
    pub fn apply<T: Copy + Into<i32>>(&self, src: &[T], center: usize, step: usize) -> i32 {
        let start = center - self.lead() * step;
        self.coeffs
            .iter()
            .enumerate()
            .map(|(t, &c)| c * src[start + t * step].into())
            .sum()
    }
}

/// 滤波核增益 `log2(64)`
pub const FILTER_GAIN_SHIFT: u32 = 6;

const LUMA_QUARTER: [i32; 8] = [-1, 4, -10, 58, 17, -5, 1, 0];
const LUMA_HALF: [i32; 8] = [-1, 4, -11, 40, 40, -11, 4, -1];
const LUMA_THREE_QUARTER: [i32; 8] = [0, 1, -5, 17, 58, -10, 4, -1];

/// 亮度各相位的滤波核, 相位 0 为单位冲激 (整像素走复制路径, 不查此核)
pub const LUMA_KERNELS: [Kernel; 4] = [
    Kernel::new(&[0, 0, 0, 64, 0, 0, 0, 0]),
    Kernel::new(&LUMA_QUARTER),
    Kernel::new(&LUMA_HALF),
    Kernel::new(&LUMA_THREE_QUARTER),
];

/// 色度各相位的滤波核, 相位 0 同为单位冲激
pub const CHROMA_KERNELS: [Kernel; 8] = [
    Kernel::new(&[0, 64, 0, 0]),
    Kernel::new(&[-2, 58, 10, -2]),
    Kernel::new(&[-4, 54, 16, -2]),
    Kernel::new(&[-6, 46, 28, -4]),
    Kernel::new(&[-4, 36, 36, -4]),
    Kernel::new(&[-4, 28, 46, -6]),
    Kernel::new(&[-2, 16, 54, -4]),
    Kernel::new(&[-2, 10, 58, -2]),
];

/// 一个相位组合的滤波方案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPlan {
    /// 整像素, 直接复制
    Copy,
    /// 仅水平滤波
    Horizontal(Kernel),
    /// 仅竖直滤波
    Vertical(Kernel),
    /// 先竖直滤波到暂存区, 再水平滤波到目标
    TwoPass { vertical: Kernel, horizontal: Kernel },
}

impl FilterPlan {
    /// 参与滤波的方向数: 0, 1 或 2
    pub const fn passes(&self) -> u32 {
        match self {
            Self::Copy => 0,
            Self::Horizontal(_) | Self::Vertical(_) => 1,
            Self::TwoPass { .. } => 2,
        }
    }
}

const fn plan_for(kernels: &[Kernel], frac_x: usize, frac_y: usize) -> FilterPlan {
    match (frac_x, frac_y) {
        (0, 0) => FilterPlan::Copy,
        (x, 0) => FilterPlan::Horizontal(kernels[x]),
        (0, y) => FilterPlan::Vertical(kernels[y]),
        (x, y) => FilterPlan::TwoPass {
            vertical: kernels[y],
            horizontal: kernels[x],
        },
    }
}

const fn build_luma_plans() -> [FilterPlan; 16] {
    let mut plans = [FilterPlan::Copy; 16];
    let mut i = 0;
    while i < 16 {
        plans[i] = plan_for(&LUMA_KERNELS, i % 4, i / 4);
        i += 1;
    }
    plans
}

const fn build_chroma_plans() -> [FilterPlan; 64] {
    let mut plans = [FilterPlan::Copy; 64];
    let mut i = 0;
    while i < 64 {
        plans[i] = plan_for(&CHROMA_KERNELS, i % 8, i / 8);
        i += 1;
    }
    plans
}

/// 亮度相位表, 下标 `frac_y * 4 + frac_x`
static LUMA_PLANS: [FilterPlan; 16] = build_luma_plans();
/// 色度相位表, 下标 `frac_y * 8 + frac_x`
static CHROMA_PLANS: [FilterPlan; 64] = build_chroma_plans();

pub fn luma_plan(frac_x: usize, frac_y: usize) -> FilterPlan {
    assert!(frac_x < 4 && frac_y < 4, "亮度相位越界: ({frac_x}, {frac_y})");
    LUMA_PLANS[frac_y * 4 + frac_x]
}

pub fn chroma_plan(frac_x: usize, frac_y: usize) -> FilterPlan {
    assert!(frac_x < 8 && frac_y < 8, "色度相位越界: ({frac_x}, {frac_y})");
    CHROMA_PLANS[frac_y * 8 + frac_x]
}

/// 高精度中间值存入 [`Sample`] 前减去的偏移.
///
/// 14 位结果加上滤波过冲可超过 `i16::MAX`, 减去后正负两侧都落在 `i16` 内.
pub const HIGH_PRECISION_OFFSET: i32 = 1 << (INTERNAL_PRECISION - 1);

/// 插值输出精度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// 输出位深, 钳位到合法范围
    Nominal,
    /// 14 位中间精度, 不钳位, 以减去 [`HIGH_PRECISION_OFFSET`] 后的值存储, 供双向预测合并
    High,
}

impl Precision {
    /// 存储偏移: 合并时每个样本需加回该值
    pub const fn storage_offset(self) -> i32 {
        match self {
            Self::Nominal => 0,
            Self::High => HIGH_PRECISION_OFFSET,
        }
    }
}

/// 输出级: `(((sum << left) + offset) >> right) - bias`, 可选钳位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputStage {
    left: u32,
    right: u32,
    offset: i32,
    bias: i32,
    clip: Option<BitDepth>,
}

impl OutputStage {
    /// 按精度与滤波方向数 (0..=2) 求输出级参数
    pub fn new(precision: Precision, bit_depth: BitDepth, passes: u32) -> Self {
        let gain = FILTER_GAIN_SHIFT * passes;
        let (left, right, clip) = match precision {
            Precision::Nominal => (0, gain, Some(bit_depth)),
            Precision::High => {
                let target = INTERNAL_PRECISION - bit_depth.bits();
                if gain >= target {
                    (0, gain - target, None)
                } else {
                    (target - gain, 0, None)
                }
            }
        };
        let offset = if right > 0 { 1 << (right - 1) } else { 0 };
        Self {
            left,
            right,
            offset,
            bias: precision.storage_offset(),
            clip,
        }
    }

    #[inline]
    pub fn apply(&self, sum: i32) -> Sample {
        let v = (((sum << self.left) + self.offset) >> self.right) - self.bias;
        match self.clip {
            Some(bit_depth) => bit_depth.clip(v),
            None => v as Sample,
        }
    }
}
