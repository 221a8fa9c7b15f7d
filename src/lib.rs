pub mod checking;
pub mod cli;
pub mod core;
pub mod greeting;
pub mod imports;
pub mod scanner;
pub mod source;

pub use crate::checking::{CheckConfig, CheckRun, MockCheckEngine};
pub use crate::core::{
    CheckError, CheckResult, CheckSummary, Module, PairOutcome, PairReport, TestPair,
};
pub use crate::greeting::{hello_world, DemoType, Dependency};
