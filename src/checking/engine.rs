// 依存性注入によるモックチェックエンジン
// ペアごとのチェックをtokioタスクで並列実行する

use super::config::CheckConfig;
use super::reporting::CheckReporter;
use crate::core::{CheckError, CheckResult, CheckSummary, PairOutcome, PairReport, TestPair};
use crate::imports::ImportExtractor;
use crate::scanner::FileScanner;
use crate::source::SourceReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// 1回のチェック実行の結果
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRun {
    pub outcomes: Vec<PairOutcome>,
    pub summary: CheckSummary,
}

/// モックチェックエンジン
pub struct MockCheckEngine<R, P> {
    reader: Arc<R>,
    extractor: Arc<ImportExtractor>,
    config: CheckConfig,
    reporter: P,
}

impl<R, P> MockCheckEngine<R, P>
where
    R: SourceReader + 'static,
    P: CheckReporter,
{
    /// コンストラクタインジェクション（設定はここでバリデーションされる）
    pub fn new(reader: R, config: CheckConfig, reporter: P) -> CheckResult<Self> {
        config.validate()?;
        let extractor = ImportExtractor::new(&config.not_mocked_region)?;

        Ok(Self {
            reader: Arc::new(reader),
            extractor: Arc::new(extractor),
            config,
            reporter,
        })
    }

    pub fn into_reporter(self) -> P {
        self.reporter
    }

    /// ディレクトリ以下の全テストファイルをチェック
    pub async fn check_directory(&self, directory: &Path) -> CheckResult<CheckRun> {
        tracing::info!(directory = %directory.display(), "looking for test files");
        let pairs = FileScanner::find_test_pairs(directory, &self.config)?;
        self.check_pairs(pairs).await
    }

    /// 単一のテストファイルをチェック
    pub async fn check_file(&self, test_file: &Path) -> CheckResult<CheckRun> {
        let pair = TestPair::from_test_file(test_file, &self.config)?;
        self.check_pairs(vec![pair]).await
    }

    /// ペア群を並列にチェックし、テストファイルのパス順に報告する
    ///
    /// 個別ペアの失敗は `PairOutcome::Failed` として記録され、他のペアのチェックは続行される。
    pub async fn check_pairs(&self, mut pairs: Vec<TestPair>) -> CheckResult<CheckRun> {
        let start_time = Instant::now();
        pairs.sort_by(|a, b| a.test_file.cmp(&b.test_file));

        tracing::info!(
            pairs = pairs.len(),
            max_concurrent = self.config.max_concurrent,
            "starting mock check"
        );
        self.reporter.report_started(&pairs);

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent));
        let mut handles = Vec::with_capacity(pairs.len());

        for pair in pairs {
            let reader = Arc::clone(&self.reader);
            let extractor = Arc::clone(&self.extractor);
            let semaphore = Arc::clone(&semaphore);
            let mock_function = self.config.mock_function.clone();

            handles.push(tokio::spawn(async move {
                // セマフォで同時実行数制御
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return PairOutcome::Failed {
                            pair,
                            error: format!("Semaphore error: {e}"),
                        }
                    }
                };

                match check_single_pair(reader.as_ref(), &extractor, &mock_function, &pair).await {
                    Ok(report) => PairOutcome::Checked(report),
                    Err(error) => {
                        tracing::warn!(pair = %pair, %error, "mock check failed");
                        PairOutcome::Failed {
                            pair,
                            error: error.to_string(),
                        }
                    }
                }
            }));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            let outcome = handle.await.map_err(CheckError::task)?;
            self.reporter.report_pair(&outcome);
            outcomes.push(outcome);
        }

        let summary =
            CheckSummary::from_outcomes(&outcomes, start_time.elapsed().as_millis() as u64);
        tracing::info!(
            checked = summary.checked_pairs,
            missing = summary.missing_mocks,
            failed = summary.failed_pairs,
            "mock check finished"
        );
        self.reporter.report_completed(&summary);

        Ok(CheckRun { outcomes, summary })
    }

    /// 単一ペアのチェック（報告はしない）
    pub async fn check_pair(&self, pair: &TestPair) -> CheckResult<PairReport> {
        check_single_pair(
            self.reader.as_ref(),
            &self.extractor,
            &self.config.mock_function,
            pair,
        )
        .await
    }
}

/// テスト対象のimportを抽出し、テストファイル内にモックが無いものを集める
async fn check_single_pair<R>(
    reader: &R,
    extractor: &ImportExtractor,
    mock_function: &str,
    pair: &TestPair,
) -> CheckResult<PairReport>
where
    R: SourceReader + ?Sized,
{
    if !reader.exists(&pair.test_file) {
        return Err(CheckError::TestFileNotFound(pair.test_file.clone()));
    }
    if !reader.exists(&pair.under_test_file) {
        return Err(CheckError::UnderTestFileNotFound(
            pair.under_test_file.clone(),
        ));
    }

    let under_test_source = reader
        .read_to_string(&pair.under_test_file)
        .await
        .map_err(|e| CheckError::read_failed(&pair.under_test_file, e))?;
    let imports = extractor.extract(&under_test_source);

    if imports.is_empty() {
        return Ok(PairReport {
            pair: pair.clone(),
            imports,
            missing: Vec::new(),
        });
    }

    let test_source = reader
        .read_to_string(&pair.test_file)
        .await
        .map_err(|e| CheckError::read_failed(&pair.test_file, e))?;
    // コメントアウトされたモック呼び出しは数えない
    let test_code = extractor.strip_comments(&test_source);

    let missing = imports
        .iter()
        .filter(|module| !module.is_mocked_in(&test_code, mock_function))
        .cloned()
        .collect();

    Ok(PairReport {
        pair: pair.clone(),
        imports,
        missing,
    })
}
