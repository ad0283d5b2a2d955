use polars::prelude::*;
use tracing::debug;

use crate::date::{calendar_date, previous_day, DEFAULT_YEAR};
use crate::error::CaseError;
use crate::{CaseTable, COUNTRY_COLUMN};

const UNCHANGED: &str = "unchanged";

/// 给定日期波兰的累计确诊数
///
/// ```no_run
/// # async fn demo() -> Result<(), covid_stats::CaseError> {
/// let table = covid_stats::load_case_table(covid_stats::CONFIRMED_CASES_URL).await?;
/// assert_eq!(covid_stats::poland_cases_by_date(&table, 7, 3, Some(2020))?, 5);
/// # Ok(())
/// # }
/// ```
pub fn poland_cases_by_date(
    table: &CaseTable,
    day: u32,
    month: u32,
    year: Option<i32>,
) -> Result<i64, CaseError> {
    cases_by_date(table, "Poland", day, month, year)
}

/// 给定国家、日期的累计确诊数。国家有多行时取第一行。
pub fn cases_by_date(
    table: &CaseTable,
    country: &str,
    day: u32,
    month: u32,
    year: Option<i32>,
) -> Result<i64, CaseError> {
    let label = table.require_date(calendar_date(day, month, year.unwrap_or(DEFAULT_YEAR))?)?;
    debug!(country, date = %label, "looking up cases");

    let rows = table
        .to_lazy()
        .filter(col(COUNTRY_COLUMN).eq(lit(country)))
        .select([col(label.as_str()).cast(DataType::Int64)])
        .collect()?;

    if rows.height() == 0 {
        return Err(CaseError::CountryNotFound(country.to_string()));
    }

    rows.column(&label)?
        .i64()?
        .get(0)
        .ok_or_else(|| CaseError::MissingValue {
            country: country.to_string(),
            date: label,
        })
}

/// 给定日期确诊数最多的 5 个国家
pub fn top5_countries_by_date(
    table: &CaseTable,
    day: u32,
    month: u32,
    year: Option<i32>,
) -> Result<Vec<String>, CaseError> {
    top_countries_by_date(table, 5, day, month, year)
}

/// 给定日期确诊数最多的 `n` 个国家，按确诊数降序。
///
/// 同一国家的多个省份/地区行先求和（空值跳过）。确诊数相同时，在表中先出现的国家排在前面。
/// 国家数不足 `n` 时返回全部国家。
pub fn top_countries_by_date(
    table: &CaseTable,
    n: usize,
    day: u32,
    month: u32,
    year: Option<i32>,
) -> Result<Vec<String>, CaseError> {
    let label = table.require_date(calendar_date(day, month, year.unwrap_or(DEFAULT_YEAR))?)?;
    debug!(n, date = %label, "ranking countries");

    // group_by_stable 保留国家首次出现的顺序，maintain_order 让排序稳定
    let ranked = table
        .to_lazy()
        .select([col(COUNTRY_COLUMN), col(label.as_str()).cast(DataType::Int64)])
        .group_by_stable([col(COUNTRY_COLUMN)])
        .agg([col(label.as_str()).sum()])
        .sort(
            [label.as_str()],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .limit(n.min(IdxSize::MAX as usize) as IdxSize)
        .collect()?;

    let countries = ranked.column(COUNTRY_COLUMN)?.str()?;
    Ok(countries.into_iter().flatten().map(|name| name.to_string()).collect())
}

/// 与前一天相比确诊数没有变化的行数（国家/地区）。
///
/// 统计的是数值**相同**的行；任一天为空值的行不计入。前一天按日历回退，跨月跨年都正确。
/// 前一天不在表中（比如表的第一天）时返回 [`CaseError::DateNotFound`]。
pub fn no_new_cases_count(
    table: &CaseTable,
    day: u32,
    month: u32,
    year: Option<i32>,
) -> Result<usize, CaseError> {
    let today = calendar_date(day, month, year.unwrap_or(DEFAULT_YEAR))?;
    let previous_label = table.require_date(previous_day(today)?)?;
    let today_label = table.require_date(today)?;
    debug!(today = %today_label, previous = %previous_label, "comparing consecutive days");

    let flags = table
        .to_lazy()
        .select([col(previous_label.as_str())
            .cast(DataType::Int64)
            .eq(col(today_label.as_str()).cast(DataType::Int64))
            .alias(UNCHANGED)])
        .collect()?;

    let unchanged = flags
        .column(UNCHANGED)?
        .bool()?
        .into_iter()
        .filter(|flag| *flag == Some(true))
        .count();
    Ok(unchanged)
}
