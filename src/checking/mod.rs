// モックチェック本体
//
// - config.rs    - 設定（デフォルト値 + JSON設定ファイル）
// - engine.rs    - ペアの並列チェック
// - reporting.rs - 結果の出力

pub mod config;
pub mod engine;
pub mod reporting;

// 公開API
pub use config::CheckConfig;
pub use engine::{CheckRun, MockCheckEngine};
pub use reporting::{CheckReporter, ConsoleCheckReporter, JsonCheckReporter, NoOpCheckReporter};
