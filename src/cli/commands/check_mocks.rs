use crate::checking::{
    CheckConfig, CheckReporter, CheckRun, ConsoleCheckReporter, JsonCheckReporter,
    MockCheckEngine,
};
use crate::cli::OutputFormat;
use crate::source::{local::LocalSourceReader, SourceReader};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// 全importがモックされている（またはチェック対象なし）
pub const EXIT_OK: u8 = 0;
/// モックされていないimportがある
pub const EXIT_MISSING_MOCKS: u8 = 1;
/// チェック自体が失敗した
pub const EXIT_ERROR: u8 = 2;

/// Configuration struct for the mock check command
#[derive(Debug, Clone)]
pub struct CheckMocksConfig {
    pub filename: Option<PathBuf>,
    pub directory: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub format: OutputFormat,
    pub colored: bool,
}

/// チェック対象
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckTarget {
    File(PathBuf),
    Directory(PathBuf),
}

impl CheckTarget {
    /// ファイル指定があればそれを優先し、無ければディレクトリ（既定はカレントディレクトリ）
    pub fn resolve(filename: Option<PathBuf>, directory: Option<PathBuf>) -> Result<Self> {
        if let Some(filename) = filename {
            return Ok(Self::File(filename));
        }
        let directory = match directory {
            Some(directory) => directory,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        Ok(Self::Directory(directory))
    }
}

/// Execute the mock check against the local filesystem
pub async fn execute_check_mocks(config: CheckMocksConfig) -> Result<CheckRun> {
    let check_config = match &config.config_file {
        Some(path) => CheckConfig::from_file(path)?,
        None => CheckConfig::default(),
    };

    let reporter: Box<dyn CheckReporter> = match config.format {
        OutputFormat::Console => Box::new(ConsoleCheckReporter::with_writer(
            std::io::stdout(),
            check_config.mock_function.clone(),
            config.colored,
        )),
        OutputFormat::Json => Box::new(JsonCheckReporter::new(check_config.mock_function.clone())),
    };

    let target = CheckTarget::resolve(config.filename, config.directory)?;
    if let (OutputFormat::Console, CheckTarget::Directory(directory)) = (config.format, &target) {
        println!("Looking for files in: {}", directory.display());
    }

    execute_check_mocks_with(LocalSourceReader::new(), check_config, reporter, target).await
}

/// Generic execution with injected reader and reporter
pub async fn execute_check_mocks_with<R, P>(
    reader: R,
    check_config: CheckConfig,
    reporter: P,
    target: CheckTarget,
) -> Result<CheckRun>
where
    R: SourceReader + 'static,
    P: CheckReporter,
{
    let engine = MockCheckEngine::new(reader, check_config, reporter)?;

    let run = match &target {
        CheckTarget::File(test_file) => engine.check_file(test_file).await?,
        CheckTarget::Directory(directory) => engine.check_directory(directory).await?,
    };
    Ok(run)
}

/// 実行結果からプロセスの終了コードを決める
pub fn exit_code(run: &CheckRun) -> u8 {
    if run.summary.failed_pairs > 0 {
        EXIT_ERROR
    } else if run.summary.has_missing_mocks() {
        EXIT_MISSING_MOCKS
    } else {
        EXIT_OK
    }
}
