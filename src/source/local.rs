use super::SourceReader;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;

/// ローカルファイルシステムからソースを読み込む
#[derive(Debug, Clone, Default)]
pub struct LocalSourceReader;

impl LocalSourceReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceReader for LocalSourceReader {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
