// モックチェックの設定管理
// デフォルト値 + JSON設定ファイルによる上書き

use crate::core::{CheckError, CheckResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 走査時に読み飛ばすディレクトリ
pub const DEFAULT_IGNORE_DIRS: [&str; 3] = ["node_modules", "build", "__snapshots__"];

/// テストファイル名に含まれるマーカー（`demo.test.ts`, `demo.spec.ts`）
pub const DEFAULT_TEST_MARKERS: [&str; 2] = ["test", "spec"];

pub const DEFAULT_MOCK_FUNCTION: &str = "jest.mock";

/// `//#region not-mocked` ～ `//#endregion` の範囲のimportはチェック対象外
pub const DEFAULT_NOT_MOCKED_REGION: &str = "not-mocked";

/// モックチェックの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub ignore_dirs: Vec<String>,
    pub test_markers: Vec<String>,
    pub mock_function: String,
    pub not_mocked_region: String,
    pub max_concurrent: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            test_markers: DEFAULT_TEST_MARKERS.iter().map(|s| s.to_string()).collect(),
            mock_function: DEFAULT_MOCK_FUNCTION.to_string(),
            not_mocked_region: DEFAULT_NOT_MOCKED_REGION.to_string(),
            max_concurrent: num_cpus::get().max(1) * 2,
        }
    }
}

impl CheckConfig {
    /// JSON設定ファイルから読み込む（省略されたフィールドはデフォルト値）
    pub fn from_file(path: &Path) -> CheckResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CheckError::read_failed(path, e.into()))?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            CheckError::configuration(format!("{}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_ignore_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_test_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mock_function(mut self, mock_function: impl Into<String>) -> Self {
        self.mock_function = mock_function.into();
        self
    }

    pub fn with_not_mocked_region(mut self, region: impl Into<String>) -> Self {
        self.not_mocked_region = region.into();
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// 設定をバリデーション
    pub fn validate(&self) -> CheckResult<()> {
        if self.test_markers.is_empty() || self.test_markers.iter().any(|m| m.is_empty()) {
            return Err(CheckError::configuration(
                "test_markers must contain at least one non-empty marker",
            ));
        }
        if self.test_markers.iter().any(|m| m.contains('.')) {
            return Err(CheckError::configuration(
                "test_markers must not contain '.'",
            ));
        }
        if self.mock_function.trim().is_empty() {
            return Err(CheckError::configuration("mock_function must not be empty"));
        }
        if self.not_mocked_region.trim().is_empty() {
            return Err(CheckError::configuration(
                "not_mocked_region must not be empty",
            ));
        }
        if self.max_concurrent == 0 {
            return Err(CheckError::configuration(
                "max_concurrent must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.iter().any(|dir| dir == name)
    }
}
