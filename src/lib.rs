//! # vpred
//!
//! 纯 Rust 实现的视频编解码块预测引擎.
//!
//! - **帧内预测**: 参考样本构建与替代、DC / Planar / 33 个角度方向、DC 边界滤波、参考平滑
//! - **帧间预测**: 1/4 亮度与 1/8 色度分像素插值、两遍可分离滤波、单/双向合并与加权预测
//! - **AMVP**: 预测矢量选择
//!
//! # 快速开始
//!
//! ```rust
//! use vpred::core::{BlockGeometry, MotionVector, MvField, Picture, PredictionConfig, YuvBuffer};
//! use vpred::engine::{InterPredictor, PredictionUnit};
//!
//! let config = PredictionConfig::default();
//! let mut inter = InterPredictor::new(&config).unwrap();
//! let bit_depth = config.internal_bit_depth().unwrap();
//! let refs = vec![Picture::new(64, 64, Picture::default_margin(64), bit_depth).unwrap()];
//!
//! let geometry = BlockGeometry::new(16, 16, 16, 16);
//! let pu = PredictionUnit::uni(geometry, 0, MvField::new(0, MotionVector::new(5, -3)));
//! let mut out = YuvBuffer::new(16, 16);
//! inter.motion_compensation(&pu, [refs.as_slice(), &[]], None, true, &mut out.as_block_mut());
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `vpred-core` | 样本/平面/运动矢量等基础类型、错误类型与配置 |
//! | `vpred-engine` | 帧内/帧间预测引擎与 AMVP |

/// 基础类型、错误与配置
pub use vpred_core as core;

/// 预测引擎
pub use vpred_engine as engine;

pub mod config;
pub mod logging;

/// 获取 vpred 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
