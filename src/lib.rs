//! # callrun
//!
//! A minimal task runner. A program registers plain functions in a
//! [`Namespace`], and `callrun` turns them into command-line actions:
//!
//! ```text
//! $ my-tasks                         # run `default`, or list the commands
//! $ my-tasks foo 'foo("bye")'        # call foo() then foo("bye")
//! $ my-tasks 'bar(1, darg=88, -1, -2, fan=False)'
//! ```

pub mod ast;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod inspect;
pub mod interpreter;
pub mod listing;
pub mod namespace;
pub mod parser;
pub mod process;
pub mod scope;

pub use ast::Value;
pub use cli::{ParsedArgs, run_cli, run_cli_with};
pub use config::Config;
pub use error::{CommandResult, DispatchError};
pub use executor::{Dispatcher, Outcome};
pub use interpreter::CallArgs;
pub use namespace::{Command, Namespace};
pub use process::{RunOutput, run};
pub use scope::WorkingDir;

/// Print an error message and exit with code 1.
pub fn fatal_error(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
