//! Pancake - a small unit-testing micro-framework
//!
//! Cases are declared with [`tt_test!`] or [`tt_test_f!`] and registered
//! statically; a `harness = false` target calls [`run_all_tests`] (or uses
//! [`tt_main!`]) to run them with a name filter and a gtest-style console
//! report. The process exit code is 0 when every selected case passed and 1
//! otherwise.
//!
//! ```ignore
//! use pancake::*;
//!
//! tt_test!(Math, add, |t| {
//!     let a = 2 + 2;
//!     tt_expect_eq!(t, a, 4);
//!     tt_assert_true!(t, a == 4);
//! });
//!
//! #[derive(Default)]
//! struct MyFix {
//!     buf: i32,
//! }
//!
//! impl Fixture for MyFix {
//!     fn set_up(&mut self, _t: &mut Context<'_>) -> Outcome {
//!         self.buf = 42;
//!         Ok(())
//!     }
//! }
//!
//! tt_test_f!(MyFix, value, |t, fx| {
//!     tt_expect_eq!(t, fx.buf, 42);
//! });
//!
//! tt_main!();
//! ```
//!
//! Cases run sequentially in one process. A panic inside a case body is not
//! contained and ends the whole run, and cases can see each other's changes
//! to global state.

pub mod assertions;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod fixture;
pub mod logging;
pub mod registry;
pub mod reporter;
pub mod runner;

pub use config::Config;
pub use context::{Context, Location, Severity};
pub use error::{FatalFailure, Outcome, RunError, RunResult};
pub use filter::Filter;
pub use fixture::Fixture;
pub use registry::{register, Declaration, Registry, TestCase};
pub use reporter::{ColorChoice, Stream};
pub use runner::{run_all_tests, CaseOutcome, RunOptions, RunSummary, Runner};

#[doc(hidden)]
pub use inventory;
