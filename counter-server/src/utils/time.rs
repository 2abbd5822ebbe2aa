//! 时间工具函数 - 业务时区转换
//!
//! 存储层只保存 `i64` Unix millis (UTC)，面向人的展示 (CSV 报表、
//! `*_local` 字段) 统一在这里按业务时区偏移格式化。

use chrono::{DateTime, FixedOffset, Utc};

use super::{AppError, AppResult};

/// 报表中的日期时间格式
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
/// 导出文件名中的时间戳格式
pub const FILENAME_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// 小时偏移 → FixedOffset
///
/// 固定偏移，不处理夏令时。
pub fn offset_from_hours(hours: i32) -> AppResult<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| AppError::validation(format!("Invalid UTC offset: {} hours", hours)))
}

/// Unix millis → 业务时区时间
///
/// 超出 chrono 可表示范围时 fallback 到 Unix 纪元。
pub fn to_local(millis: i64, offset: FixedOffset) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&offset)
}

/// Unix millis → `dd/mm/YYYY HH:MM:SS` (业务时区)
pub fn format_local(millis: i64, offset: FixedOffset) -> String {
    to_local(millis, offset).format(DISPLAY_FORMAT).to_string()
}

/// Unix millis → `YYYY-mm-dd_HH-MM` (业务时区)，用于导出文件名
pub fn filename_stamp(millis: i64, offset: FixedOffset) -> String {
    to_local(millis, offset).format(FILENAME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-01 15:04:05 UTC
    const T: i64 = 1_709_305_445_000;

    #[test]
    fn test_offset_from_hours() {
        assert_eq!(offset_from_hours(-3).unwrap().local_minus_utc(), -3 * 3600);
        assert!(offset_from_hours(30).is_err());
        // seconds would not fit in i32
        assert!(offset_from_hours(1_000_000).is_err());
        assert!(offset_from_hours(i32::MIN).is_err());
    }

    #[test]
    fn test_format_local_applies_offset() {
        let brt = offset_from_hours(-3).unwrap();
        assert_eq!(format_local(T, brt), "01/03/2024 12:04:05");

        let utc = offset_from_hours(0).unwrap();
        assert_eq!(format_local(T, utc), "01/03/2024 15:04:05");
    }

    #[test]
    fn test_offset_crosses_midnight() {
        // 2024-03-01 01:00:00 UTC → 前一天 22:00 (UTC-3)
        let brt = offset_from_hours(-3).unwrap();
        assert_eq!(format_local(1_709_254_800_000, brt), "29/02/2024 22:00:00");
    }

    #[test]
    fn test_filename_stamp() {
        let brt = offset_from_hours(-3).unwrap();
        assert_eq!(filename_stamp(T, brt), "2024-03-01_12-04");
    }
}
