use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::LoadError;

// rust 的 async trait 还没有稳定，可以用async_trait 宏
#[async_trait]
pub trait Fetch {
    type Error;
    async fn fetch(&self) -> Result<String, Self::Error>;
}

/// 从文件源或者 http 源中获取原始 CSV 文本
pub async fn retrieve_data(source: impl AsRef<str>) -> Result<String, LoadError> {
    let name = source.as_ref();
    if name.starts_with("http://") || name.starts_with("https://") {
        UrlFetcher(name).fetch().await
    } else if let Some(path) = name.strip_prefix("file://") {
        FileFetcher(path).fetch().await
    } else if !name.is_empty() && !name.contains("://") {
        // 没有 scheme 的当作本地路径
        FileFetcher(name).fetch().await
    } else {
        Err(LoadError::UnsupportedSource(name.to_string()))
    }
}

struct UrlFetcher<'a>(pub(crate) &'a str);

#[async_trait]
impl<'a> Fetch for UrlFetcher<'a> {
    type Error = LoadError;

    async fn fetch(&self) -> Result<String, Self::Error> {
        let resp = reqwest::get(self.0).await?.error_for_status()?;
        debug!("GET {} -> {}", self.0, resp.status());
        Ok(resp.text().await?)
    }
}

struct FileFetcher<'a>(pub(crate) &'a str);

#[async_trait]
impl<'a> Fetch for FileFetcher<'a> {
    type Error = LoadError;

    async fn fetch(&self) -> Result<String, Self::Error> {
        Ok(fs::read_to_string(self.0).await?)
    }
}
