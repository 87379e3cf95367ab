//! App - runner 本体
//!
//! - **RunnerBuilder**: 構築と起動時検証
//! - **BoundedRunner**: coordinator（admission loop と完了処理）
//! - **RunState**: 1 回の run のブックキーピング

pub mod builder;
pub mod runner;
pub mod state;

pub use self::builder::RunnerBuilder;
pub use self::runner::{BoundedRunner, run_limited};
pub use self::state::{RunState, StateError};
