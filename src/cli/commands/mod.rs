pub mod check_mocks;

pub use check_mocks::*;
