//! 配置文件加载.
//!
//! 配置为 JSON 文本, 顶层字段与 [`PredictionConfig`] 一致, 未给出的字段取默认值.

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

use vpred_core::PredictionConfig;

/// 从文件读取并校验预测引擎配置
pub fn load_config(path: impl AsRef<Path>) -> Result<PredictionConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("读取配置文件失败, path={}", path.display()))?;
    let config =
        parse_config(&text).with_context(|| format!("配置文件无效, path={}", path.display()))?;
    debug!("已加载预测配置: {:?}", config);
    Ok(config)
}

/// 从 JSON 文本解析并校验配置
pub fn parse_config(text: &str) -> Result<PredictionConfig> {
    let config: PredictionConfig = serde_json::from_str(text).context("解析配置 JSON 失败")?;
    config.validate()?;
    Ok(config)
}
