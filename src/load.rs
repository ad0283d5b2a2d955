use std::io::Cursor;

use polars::prelude::*;

use crate::error::LoadError;
use crate::CaseTable;

/// 取回来的原始 CSV 文本
pub(crate) struct CsvContent(pub(crate) String);

pub(crate) fn detect_content(data: String) -> CsvContent {
    CsvContent(data)
}

impl CsvContent {
    /// 解析为 CaseTable。坏掉的单元格记为 null，不让整张表加载失败
    pub(crate) fn load(self) -> Result<CaseTable, LoadError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(self.0.into_bytes()))
            .finish()?;

        CaseTable::new(df)
    }
}
