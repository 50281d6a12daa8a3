use anyhow::Result;
use chrono::{Duration as ChronoDuration, NaiveDate};
use std::fs;
use std::path::Path;

/// 删除早于 `today - retention_days` 的日志文件, 返回删除数量.
///
/// 只处理 `{prefix}.{YYYY-MM-DD}.log` 形式的文件, 其余文件保持不动.
pub fn cleanup_expired_logs(
    directory: &Path,
    prefix: &str,
    retention_days: i64,
    today: NaiveDate,
) -> Result<usize> {
    if !directory.exists() {
        return Ok(0);
    }

    let cutoff = today - ChronoDuration::days(retention_days);
    let mut removed = 0;
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        let date = match parse_log_name(&file_name, prefix) {
            Some(date) => date,
            None => continue,
        };
        if date < cutoff && fs::remove_file(entry.path()).is_ok() {
            removed += 1;
        }
    }
    Ok(removed)
}

fn parse_log_name(file_name: &str, prefix: &str) -> Option<NaiveDate> {
    let with_prefix = file_name.strip_prefix(prefix)?;
    let date_part = with_prefix.strip_prefix('.')?.strip_suffix(".log")?;
    if date_part.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
