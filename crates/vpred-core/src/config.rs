//! 预测引擎配置.
//!
//! 每个序列解析一次, 以显式参数传入引擎. 高精度双向预测、DC 边界滤波和参考样本平滑
//! 都是运行期开关.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::block::is_valid_block_size;
use crate::error::{PredError, PredResult};
use crate::sample::BitDepth;

/// 预测引擎配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// 输入位深
    pub bit_depth: u32,
    /// 内部额外精度位数
    pub bit_increment: u32,
    /// 最大块宽度, 决定暂存缓冲区大小
    pub max_cu_width: usize,
    /// 最大块高度
    pub max_cu_height: usize,
    /// 双向预测时以 14 位中间精度插值
    pub high_accuracy_bi: bool,
    /// 亮度 DC 模式边界滤波
    pub dc_boundary_filter: bool,
    /// 亮度参考样本 [1,2,1] 平滑
    pub intra_smoothing: bool,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            bit_depth: 8,
            bit_increment: 0,
            max_cu_width: 64,
            max_cu_height: 64,
            high_accuracy_bi: true,
            dc_boundary_filter: true,
            intra_smoothing: true,
        }
    }
}

impl PredictionConfig {
    /// 校验配置
    pub fn validate(&self) -> PredResult<()> {
        self.internal_bit_depth()?;
        for (name, size) in [
            ("max_cu_width", self.max_cu_width),
            ("max_cu_height", self.max_cu_height),
        ] {
            if !is_valid_block_size(size) {
                return Err(PredError::InvalidConfig(format!(
                    "{name} 必须是 [4, 128] 内的 2 的幂, 实际为 {size}"
                )));
            }
        }
        if self.bit_increment > 0 && !self.high_accuracy_bi {
            warn!(
                "bit_increment={} 但未启用高精度双向预测, 平均结果仅保留内部位深",
                self.bit_increment
            );
        }
        Ok(())
    }

    /// 内部位深 = 输入位深 + bit increment
    pub fn internal_bit_depth(&self) -> PredResult<BitDepth> {
        let bits = self.bit_depth.saturating_add(self.bit_increment);
        BitDepth::new(bits).ok_or_else(|| {
            PredError::InvalidConfig(format!(
                "内部位深必须位于 [8, 14], bit_depth={}, bit_increment={}",
                self.bit_depth, self.bit_increment
            ))
        })
    }
}
