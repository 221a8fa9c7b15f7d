use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::path::Path;

pub mod local;

/// ソースファイル読み込みのトレイト
#[automock]
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// ファイルの内容をUTF-8文字列として読み込む
    async fn read_to_string(&self, path: &Path) -> Result<String>;

    /// ファイルが存在するかチェック
    fn exists(&self, path: &Path) -> bool;
}

// SourceReader for Box<dyn SourceReader>
#[async_trait]
impl SourceReader for Box<dyn SourceReader> {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        self.as_ref().read_to_string(path).await
    }

    fn exists(&self, path: &Path) -> bool {
        self.as_ref().exists(path)
    }
}
