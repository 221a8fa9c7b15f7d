// チェック結果の報告
//
// 出力先ごとの実装:
// - ConsoleCheckReporter - 色付きの人間向け出力
// - JsonCheckReporter    - CI向けのJSON出力
// - NoOpCheckReporter    - 出力なし

use crate::core::{CheckSummary, PairOutcome, TestPair};
use mockall::automock;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Mutex;

/// チェック結果の報告を抽象化するトレイト
#[automock]
pub trait CheckReporter: Send + Sync {
    /// チェック開始時の報告
    fn report_started(&self, pairs: &[TestPair]);

    /// ペアごとの結果の報告（テストファイルのパス順に呼ばれる）
    fn report_pair(&self, outcome: &PairOutcome);

    /// チェック完了時の報告
    fn report_completed(&self, summary: &CheckSummary);
}

// CheckReporter for Box<dyn CheckReporter>
impl CheckReporter for Box<dyn CheckReporter> {
    fn report_started(&self, pairs: &[TestPair]) {
        self.as_ref().report_started(pairs)
    }

    fn report_pair(&self, outcome: &PairOutcome) {
        self.as_ref().report_pair(outcome)
    }

    fn report_completed(&self, summary: &CheckSummary) {
        self.as_ref().report_completed(summary)
    }
}

/// 静音版（バックグラウンド・テスト用）
#[derive(Debug, Clone, Default)]
pub struct NoOpCheckReporter;

impl NoOpCheckReporter {
    pub fn new() -> Self {
        Self
    }
}

impl CheckReporter for NoOpCheckReporter {
    fn report_started(&self, _pairs: &[TestPair]) {}

    fn report_pair(&self, _outcome: &PairOutcome) {}

    fn report_completed(&self, _summary: &CheckSummary) {}
}

/// コンソール出力
pub struct ConsoleCheckReporter<W = io::Stdout> {
    out: Mutex<W>,
    mock_function: String,
    colored: bool,
}

impl<W: Write + Send> ConsoleCheckReporter<W> {
    pub fn with_writer(out: W, mock_function: impl Into<String>, colored: bool) -> Self {
        Self {
            out: Mutex::new(out),
            mock_function: mock_function.into(),
            colored,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.colored {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for line in lines {
            // stdoutが閉じられていても処理は続行する
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }
}

impl<W: Write + Send> CheckReporter for ConsoleCheckReporter<W> {
    fn report_started(&self, pairs: &[TestPair]) {
        if pairs.is_empty() {
            self.write_lines(&["Couldn't find any modules under test.".to_string()]);
            return;
        }

        let mut lines = vec!["Modules under test:".to_string()];
        lines.extend(pairs.iter().map(|pair| pair.to_string()));
        lines.push("Checking that all imports have a mock.".to_string());
        self.write_lines(&lines);
    }

    fn report_pair(&self, outcome: &PairOutcome) {
        let mut lines = Vec::new();
        match outcome {
            PairOutcome::Checked(report) => {
                lines.push(format!(
                    "Checking {}... ",
                    report.pair.under_test_file.display()
                ));
                if report.imports.is_empty() {
                    lines.push("  No imports.".to_string());
                } else {
                    lines.push("  Imports:".to_string());
                    lines.extend(report.imports.iter().map(|import| format!("    {import}")));

                    if report.is_fully_mocked() {
                        lines.push(format!(
                            "\n{} All your imports are mocked.\n",
                            self.paint("Good job!", Style::new().green().bold())
                        ));
                    } else {
                        lines.push(self.paint("  Missing mocks:", Style::new().red()));
                        lines.extend(
                            report
                                .missing
                                .iter()
                                .map(|module| format!("    {}", module.mock_call(&self.mock_function))),
                        );
                    }
                }
            }
            PairOutcome::Failed { pair, error } => {
                lines.push(format!("Checking {}... ", pair.under_test_file.display()));
                lines.push(format!(
                    "  {} {error}",
                    self.paint("Error:", Style::new().yellow().bold())
                ));
            }
        }
        self.write_lines(&lines);
    }

    fn report_completed(&self, summary: &CheckSummary) {
        if summary.checked_pairs + summary.failed_pairs == 0 {
            return;
        }

        let mut line = format!(
            "Checked {} module(s): {} missing mock(s) in {} module(s)",
            summary.checked_pairs, summary.missing_mocks, summary.pairs_with_missing_mocks
        );
        if summary.failed_pairs > 0 {
            line.push_str(&format!(", {} failed", summary.failed_pairs));
        }
        line.push_str(&format!(" ({}ms)", summary.elapsed_ms));

        let style = if summary.has_missing_mocks() || summary.failed_pairs > 0 {
            Style::new().red()
        } else {
            Style::new().green()
        };
        self.write_lines(&[self.paint(&line, style)]);
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    checked_at: chrono::DateTime<chrono::Utc>,
    mock_function: &'a str,
    summary: &'a CheckSummary,
    results: &'a [PairOutcome],
}

/// 全結果を集めて完了時に1つのJSONドキュメントとして出力
pub struct JsonCheckReporter<W = io::Stdout> {
    out: Mutex<W>,
    mock_function: String,
    outcomes: Mutex<Vec<PairOutcome>>,
}

impl JsonCheckReporter<io::Stdout> {
    pub fn new(mock_function: impl Into<String>) -> Self {
        Self::with_writer(io::stdout(), mock_function)
    }
}

impl<W: Write + Send> JsonCheckReporter<W> {
    pub fn with_writer(out: W, mock_function: impl Into<String>) -> Self {
        Self {
            out: Mutex::new(out),
            mock_function: mock_function.into(),
            outcomes: Mutex::new(Vec::new()),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> CheckReporter for JsonCheckReporter<W> {
    fn report_started(&self, _pairs: &[TestPair]) {
        self.outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    fn report_pair(&self, outcome: &PairOutcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(outcome.clone());
    }

    fn report_completed(&self, summary: &CheckSummary) {
        let outcomes = self
            .outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let document = JsonDocument {
            checked_at: chrono::Utc::now(),
            mock_function: &self.mock_function,
            summary,
            results: &outcomes,
        };

        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(error) = serde_json::to_writer_pretty(&mut *out, &document) {
            tracing::error!(%error, "failed to write JSON report");
            return;
        }
        let _ = writeln!(out);
        let _ = out.flush();
    }
}
