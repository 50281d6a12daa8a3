//! 样本类型与位深工具.

/// 单个样本值.
///
/// 内部精度可能高于输出位深 (bit increment / 高精度双向预测中间值), 因此使用有符号 16 位.
pub type Sample = i16;

/// 高精度中间表示的位宽 (双向预测中间结果)
pub const INTERNAL_PRECISION: u32 = 14;

/// 颜色分量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// 亮度
    Luma,
    /// 蓝色色度
    Cb,
    /// 红色色度
    Cr,
}

impl Component {
    /// 全部分量, 按平面顺序
    pub const ALL: [Component; 3] = [Component::Luma, Component::Cb, Component::Cr];

    /// 平面索引 (Y=0, Cb=1, Cr=2)
    pub const fn index(self) -> usize {
        match self {
            Self::Luma => 0,
            Self::Cb => 1,
            Self::Cr => 2,
        }
    }

    /// 是否为色度分量
    pub const fn is_chroma(self) -> bool {
        !matches!(self, Self::Luma)
    }
}

/// 样本位深 (输入位深 + bit increment 之后的内部位深)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitDepth(u32);

impl BitDepth {
    /// 8 位
    pub const EIGHT: BitDepth = BitDepth(8);

    /// 创建位深, 合法范围 [8, 14]
    pub fn new(bits: u32) -> Option<Self> {
        (8..=INTERNAL_PRECISION).contains(&bits).then_some(Self(bits))
    }

    /// 位数
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// 最大样本值 `(1 << bits) - 1`
    pub const fn max_value(self) -> i32 {
        (1 << self.0) - 1
    }

    /// 中灰值 `1 << (bits - 1)`, 用于无可用邻居时的替代样本
    pub const fn mid_value(self) -> i32 {
        1 << (self.0 - 1)
    }

    /// 钳位到合法样本范围
    #[inline]
    pub fn clip(self, value: i32) -> Sample {
        value.clamp(0, self.max_value()) as Sample
    }

    /// 高精度中间表示相对本位深的左移量
    pub const fn high_precision_shift(self) -> u32 {
        INTERNAL_PRECISION - self.0
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        Self::EIGHT
    }
}
