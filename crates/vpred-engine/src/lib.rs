//! # vpred-engine
//!
//! 块预测引擎: 帧内参考样本构建、DC/Planar/角度预测、DC 边界滤波,
//! 帧间分像素插值 (两遍可分离滤波 + 暂存区)、单/双向合并与加权预测, 以及 AMVP 预测矢量选择.
//!
//! 所有定点运算的舍入与移位量都按格式要求逐位复现.
//!
//! ## 使用示例
//!
//! ```rust
//! use vpred_core::{BlockMut, Component, Neighbors, PredictionConfig};
//! use vpred_engine::intra::{IntraPredictor, ReferenceSamples, PLANAR_IDX};
//!
//! let predictor = IntraPredictor::new(&PredictionConfig::default()).unwrap();
//! let refs = ReferenceSamples::constant(8, 100);
//! let mut out = [0i16; 64];
//! predictor.predict_with_reference(
//!     &refs,
//!     PLANAR_IDX,
//!     Component::Luma,
//!     Neighbors::ALL,
//!     &mut BlockMut::new(&mut out, 8),
//! );
//! assert!(out.iter().all(|&v| v == 100));
//! ```

pub mod amvp;
pub mod inter;
pub mod intra;

// 重导出常用类型
pub use amvp::{AMVP_MAX_CANDIDATES, AmvpInfo, AmvpMode, MvpSelection, select_mvp};
pub use inter::{InterPredictor, Precision, PredictionUnit, WeightTable, WpParam};
pub use intra::{IntraMode, IntraPredictor, ReferenceSamples};

#[cfg(test)]
mod tests;
