//! Hermetic E2E support for pomwalk
//!
//! Test binaries under `tests/` drive live sessions against a local mock
//! repository built from these helpers.

pub mod fixtures;
pub mod test_env;

pub use fixtures::PomBuilder;
pub use test_env::{CommandRun, HermeticSessionBuilder, TestEnvironment, run_command};
