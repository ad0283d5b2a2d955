use std::ops::Deref;

use chrono::NaiveDate;
use polars::frame::DataFrame;
use polars::prelude::{IntoLazy, LazyFrame};
use tracing::info;

use crate::fetcher::retrieve_data;
use crate::load::detect_content;

mod date;
mod error;
mod fetcher;
mod load;
mod query;

pub use date::{calendar_date, date_label, format_date_label, parse_date_label, previous_day, DEFAULT_YEAR};
pub use error::{CaseError, LoadError};
pub use query::{
    cases_by_date, no_new_cases_count, poland_cases_by_date, top5_countries_by_date,
    top_countries_by_date,
};

/// 约翰霍普金斯大学 CSSE 确诊病例时间序列
pub const CONFIRMED_CASES_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_19-covid-Confirmed.csv";

pub const PROVINCE_COLUMN: &str = "Province/State";
pub const COUNTRY_COLUMN: &str = "Country/Region";

/// 确诊病例表：每行一个国家/地区，每个日期一列，单元格是累计确诊数。
///
/// 加载之后只读，可以放心地在多个调用方之间共享。
#[derive(Debug, Clone)]
pub struct CaseTable(DataFrame);

impl Deref for CaseTable {
    type Target = DataFrame;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl CaseTable {
    /// 校验表结构：必须有国家和省份列，且至少有一个日期列
    pub fn new(df: DataFrame) -> Result<Self, LoadError> {
        for name in [PROVINCE_COLUMN, COUNTRY_COLUMN] {
            if df.get_column_index(name).is_none() {
                return Err(LoadError::MissingColumn(name));
            }
        }

        let table = Self(df);
        if table.date_labels().is_empty() {
            return Err(LoadError::NoDateColumns);
        }
        Ok(table)
    }

    /// 按表中顺序列出所有日期列名
    pub fn date_labels(&self) -> Vec<String> {
        self.0
            .get_column_names()
            .into_iter()
            .filter(|name| parse_date_label(name.as_str()).is_some())
            .map(|name| name.to_string())
            .collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates().min()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates().max()
    }

    fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0
            .get_column_names()
            .into_iter()
            .filter_map(|name| parse_date_label(name.as_str()))
    }

    /// 返回日期对应且确实存在的列名。
    ///
    /// 列名只有两位年份，1920 和 2120 都会写成 `20`；列名解析回来不是同一天时直接报错，
    /// 不去读另一个世纪的列。
    pub(crate) fn require_date(&self, date: NaiveDate) -> Result<String, CaseError> {
        let label = date_label(date);
        if parse_date_label(&label) != Some(date) {
            return Err(CaseError::DateNotFound(date.to_string()));
        }
        if self.0.get_column_index(&label).is_none() {
            return Err(CaseError::DateNotFound(label));
        }
        Ok(label)
    }

    /// 每次查询都从同一张表构建新的 LazyFrame，表本身不会被修改
    pub(crate) fn to_lazy(&self) -> LazyFrame {
        self.0.clone().lazy()
    }
}

/// 从数据源（http/https/file 或本地路径）获取并解析确诊病例表
pub async fn load_case_table(source: impl AsRef<str>) -> Result<CaseTable, CaseError> {
    let source = source.as_ref();
    info!("retrieving data from source: {}", source);

    let table = detect_content(retrieve_data(source).await?).load()?;

    info!(
        rows = table.height(),
        dates = table.date_labels().len(),
        "confirmed cases table loaded"
    );
    Ok(table)
}
