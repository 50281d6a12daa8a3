//! # vpred-core
//!
//! vpred 预测引擎核心库, 提供样本/平面/运动矢量等基础类型、统一错误类型和引擎配置.
//!
//! 参数集、参考图像管理、熵编码等属于外部协作方, 本 crate 只定义它们交给预测引擎的数据形态.

pub mod block;
pub mod config;
pub mod error;
pub mod mv;
pub mod neighbors;
pub mod plane;
pub mod sample;

// 重导出常用类型
pub use block::{BlockGeometry, BlockMut, YuvBlockMut, YuvBuffer};
pub use config::PredictionConfig;
pub use error::{PredError, PredResult};
pub use mv::{MotionVector, MvField, clip_mv};
pub use neighbors::Neighbors;
pub use plane::{Picture, Plane};
pub use sample::{BitDepth, Component, Sample};
