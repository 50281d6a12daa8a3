//! 帧内预测邻居可用性.

use bitflags::bitflags;

bitflags! {
    /// 邻居区域可用性位掩码, 每个位表示一段参考样本是否已重建
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Neighbors: u8 {
        /// 左上角单个样本
        const ABOVE_LEFT  = 1 << 0;
        /// 正上方 N 个样本
        const ABOVE       = 1 << 1;
        /// 右上方 N 个样本
        const ABOVE_RIGHT = 1 << 2;
        /// 正左方 N 个样本
        const LEFT        = 1 << 3;
        /// 左下方 N 个样本
        const BELOW_LEFT  = 1 << 4;

        /// 全部可用
        const ALL = Self::ABOVE_LEFT.bits()
            | Self::ABOVE.bits()
            | Self::ABOVE_RIGHT.bits()
            | Self::LEFT.bits()
            | Self::BELOW_LEFT.bits();
    }
}

impl Neighbors {
    /// 只按上方/左方可用性构造 (角点随两者同时可用)
    pub fn from_above_left(above: bool, left: bool) -> Self {
        let mut flags = Self::empty();
        if above {
            flags |= Self::ABOVE;
        }
        if left {
            flags |= Self::LEFT;
        }
        if above && left {
            flags |= Self::ABOVE_LEFT;
        }
        flags
    }

    pub fn has_above(self) -> bool {
        self.contains(Self::ABOVE)
    }

    pub fn has_left(self) -> bool {
        self.contains(Self::LEFT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_above_left() {
        assert_eq!(Neighbors::from_above_left(false, false), Neighbors::empty());
        let both = Neighbors::from_above_left(true, true);
        assert!(both.contains(Neighbors::ABOVE_LEFT), "上方与左方都可用时角点可用");
        let above = Neighbors::from_above_left(true, false);
        assert!(above.has_above() && !above.has_left());
        assert!(!above.contains(Neighbors::ABOVE_LEFT));
    }
}
