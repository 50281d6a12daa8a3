//! 统一错误类型定义.
//!
//! vpred 各 crate 共用的错误类型. 热路径上的契约违规 (调用方 bug) 直接断言,
//! 只有平面尺寸与配置校验这类可恢复场景才返回错误;
//! 文件读取与 JSON 解析的错误由上层门面以 `anyhow` 附加上下文.

use thiserror::Error;

/// vpred 统一错误类型
#[derive(Debug, Error)]
pub enum PredError {
    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 配置非法
    #[error("配置非法: {0}")]
    InvalidConfig(String),
}

/// vpred 统一 Result 类型
pub type PredResult<T> = Result<T, PredError>;
