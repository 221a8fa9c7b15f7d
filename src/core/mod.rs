// コアレイヤー - エラー定義と基本的なデータ型
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod error;
pub mod types;

// 公開API
pub use error::{CheckError, CheckResult};
pub use types::{CheckSummary, Module, PairOutcome, PairReport, TestPair};
