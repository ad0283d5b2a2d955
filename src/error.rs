use polars::prelude::PolarsError;
use thiserror::Error;

/// 查询确诊数据时可能出现的错误
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("invalid calendar date: day {day}, month {month}, year {year}")]
    InvalidDate { day: u32, month: u32, year: i32 },

    #[error("date column `{0}` not found in confirmed cases table")]
    DateNotFound(String),

    #[error("country `{0}` not found in confirmed cases table")]
    CountryNotFound(String),

    #[error("no case count recorded for {country} on {date}")]
    MissingValue { country: String, date: String },

    #[error("failed to load confirmed cases: {0}")]
    DataLoad(#[from] LoadError),

    #[error("query failed: {0}")]
    Polars(#[from] PolarsError),
}

/// 获取或解析数据源时的错误
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed csv: {0}")]
    Csv(#[from] PolarsError),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("no date columns found")]
    NoDateColumns,

    #[error("unsupported source `{0}`, expected http(s)://, file:// or a local path")]
    UnsupportedSource(String),
}
