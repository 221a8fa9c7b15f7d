// モックチェックに関連するデータ型定義

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// テストファイルとテスト対象モジュールの組
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestPair {
    pub test_file: PathBuf,
    pub under_test_file: PathBuf,
}

impl TestPair {
    pub fn new(test_file: impl Into<PathBuf>, under_test_file: impl Into<PathBuf>) -> Self {
        Self {
            test_file: test_file.into(),
            under_test_file: under_test_file.into(),
        }
    }
}

impl fmt::Display for TestPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.test_file.display(),
            self.under_test_file.display()
        )
    }
}

/// importされたモジュール指定子（`"./dependency"` など）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Module(String);

impl Module {
    pub fn new(specifier: impl Into<String>) -> Self {
        Self(specifier.into())
    }

    pub fn specifier(&self) -> &str {
        &self.0
    }

    /// テストファイルに追加すべきモック呼び出し（`jest.mock("./dependency")`）
    pub fn mock_call(&self, mock_function: &str) -> String {
        format!(r#"{mock_function}("{}")"#, self.0)
    }

    /// テストファイルの内容にこのモジュールのモック呼び出しが含まれるか
    ///
    /// 前方一致で判定するため、`jest.mock("./x", () => ...)` のようなファクトリ付きも許容する。
    pub fn is_mocked_in(&self, test_contents: &str, mock_function: &str) -> bool {
        let double_quoted = format!(r#"{mock_function}("{}""#, self.0);
        let single_quoted = format!("{mock_function}('{}'", self.0);
        test_contents.contains(&double_quoted) || test_contents.contains(&single_quoted)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 単一ペアのチェック結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    pub pair: TestPair,
    pub imports: Vec<Module>,
    pub missing: Vec<Module>,
}

impl PairReport {
    pub fn is_fully_mocked(&self) -> bool {
        self.missing.is_empty()
    }
}

/// 個別チェックの結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairOutcome {
    Checked(PairReport),
    Failed { pair: TestPair, error: String },
}

impl PairOutcome {
    pub fn pair(&self) -> &TestPair {
        match self {
            Self::Checked(report) => &report.pair,
            Self::Failed { pair, .. } => pair,
        }
    }
}

/// チェック全体のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub checked_pairs: usize,
    pub pairs_with_missing_mocks: usize,
    pub missing_mocks: usize,
    pub failed_pairs: usize,
    pub elapsed_ms: u64,
}

impl CheckSummary {
    /// 結果一覧からサマリーを集計
    pub fn from_outcomes(outcomes: &[PairOutcome], elapsed_ms: u64) -> Self {
        let mut summary = Self {
            elapsed_ms,
            ..Self::default()
        };

        for outcome in outcomes {
            match outcome {
                PairOutcome::Checked(report) => {
                    summary.checked_pairs += 1;
                    if !report.is_fully_mocked() {
                        summary.pairs_with_missing_mocks += 1;
                        summary.missing_mocks += report.missing.len();
                    }
                }
                PairOutcome::Failed { .. } => summary.failed_pairs += 1,
            }
        }

        summary
    }

    pub fn has_missing_mocks(&self) -> bool {
        self.missing_mocks > 0
    }
}
