// モックチェック専用のカスタムエラー型定義

use std::path::PathBuf;
use thiserror::Error;

/// モックチェック固有のエラー型
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Sorry, test file doesn't exist: {}", .0.display())]
    TestFileNotFound(PathBuf),

    #[error("'{}' is not a test file", .0.display())]
    NotTestFile(PathBuf),

    #[error("Sorry, module under test doesn't exist: {}", .0.display())]
    UnderTestFileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Error reading directory contents: {}: {source}", path.display())]
    DirectoryWalk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Check task failed: {source}")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl CheckError {
    /// 読み込みエラーの作成
    pub fn read_failed(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// ディレクトリ走査エラーの作成
    pub fn directory_walk(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::DirectoryWalk {
            path: path.into(),
            source,
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::Task { source }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// 単一ペアに閉じたエラーは回復可能で、残りのペアのチェックは続行される。
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::TestFileNotFound(_)
            | Self::NotTestFile(_)
            | Self::UnderTestFileNotFound(_)
            | Self::ReadFailed { .. } => true,
            Self::DirectoryWalk { .. } | Self::Configuration { .. } | Self::Task { .. } => false,
        }
    }
}

impl From<tokio::task::JoinError> for CheckError {
    fn from(error: tokio::task::JoinError) -> Self {
        CheckError::Task { source: error }
    }
}

/// モックチェックの結果型
pub type CheckResult<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_pair_error_messages() {
        let error = CheckError::TestFileNotFound(PathBuf::from("src/demo.test.ts"));
        assert_eq!(
            error.to_string(),
            "Sorry, test file doesn't exist: src/demo.test.ts"
        );

        let error = CheckError::NotTestFile(PathBuf::from("src/demo.ts"));
        assert_eq!(error.to_string(), "'src/demo.ts' is not a test file");

        let error = CheckError::UnderTestFileNotFound(PathBuf::from("src/demo.ts"));
        assert_eq!(
            error.to_string(),
            "Sorry, module under test doesn't exist: src/demo.ts"
        );
    }

    #[test]
    fn test_read_failed_keeps_source() {
        let error = CheckError::read_failed("src/demo.ts", anyhow::anyhow!("permission denied"));

        assert!(error.to_string().contains("src/demo.ts"));
        assert!(error.to_string().contains("permission denied"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_configuration_error() {
        let error = CheckError::configuration("max_concurrent must be at least 1");
        assert_eq!(
            error.to_string(),
            "Invalid configuration: max_concurrent must be at least 1"
        );
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(CheckError::TestFileNotFound(PathBuf::from("a.test.ts")).is_recoverable());
        assert!(CheckError::NotTestFile(PathBuf::from("a.ts")).is_recoverable());
        assert!(CheckError::UnderTestFileNotFound(PathBuf::from("a.ts")).is_recoverable());
        assert!(CheckError::read_failed("a.ts", anyhow::anyhow!("io")).is_recoverable());
    }

    #[tokio::test]
    async fn test_task_error() {
        let task = tokio::spawn(async {
            std::future::pending::<()>().await;
        });
        // キャンセルしてJoinErrorを発生させる
        task.abort();

        let join_error = task.await.expect_err("aborted task should fail");
        let error: CheckError = join_error.into();

        assert!(error.to_string().contains("Check task failed"));
        assert!(!error.is_recoverable());
    }
}
