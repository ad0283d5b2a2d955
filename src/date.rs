use chrono::NaiveDate;

use crate::error::CaseError;

/// 未指定年份时使用的默认年份
pub const DEFAULT_YEAR: i32 = 2020;

// 数据集列名格式：月/日/两位年份，月和日不补零，例如 `3/7/20`
const LABEL_FORMAT: &str = "%-m/%-d/%y";
const PARSE_FORMAT: &str = "%m/%d/%y";

/// 把 (日, 月, 年) 转换为合法的日历日期
pub fn calendar_date(day: u32, month: u32, year: i32) -> Result<NaiveDate, CaseError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(CaseError::InvalidDate { day, month, year })
}

/// 日期对应的列名
pub fn date_label(date: NaiveDate) -> String {
    date.format(LABEL_FORMAT).to_string()
}

/// (日, 月, 年) 对应的列名，`year` 为 `None` 时取 [`DEFAULT_YEAR`]
pub fn format_date_label(day: u32, month: u32, year: Option<i32>) -> Result<String, CaseError> {
    calendar_date(day, month, year.unwrap_or(DEFAULT_YEAR)).map(date_label)
}

/// 前一天，跨月、跨年都能正确回退
pub fn previous_day(date: NaiveDate) -> Result<NaiveDate, CaseError> {
    date.pred_opt().ok_or_else(|| CaseError::DateNotFound(format!("day before {}", date_label(date))))
}

/// 把列名解析回日期。只接受与 [`date_label`] 输出完全一致的写法，`03/07/20` 这类补零的列名不算。
pub fn parse_date_label(label: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(label, PARSE_FORMAT).ok()?;
    (date_label(date) == label).then_some(date)
}
