//! CLI module containing the entry point used by host programs.
//!
//! A host builds its [`Namespace`] and hands it to [`run_cli`], which parses the
//! process arguments, dispatches, and exits with the run's status.

use crate::config::{Config, LOG_ENV};
use crate::executor::Dispatcher;
use crate::namespace::Namespace;
use clap::Parser as ClapParser;
use std::ffi::OsString;

/// Command-line arguments of a dispatcher run.
#[derive(ClapParser, Debug, Clone, Default, PartialEq, Eq)]
#[command(about = "Run the commands defined by this program", long_about = None)]
#[command(version)]
#[command(
    after_help = "Each CALL is a command name, optionally with literal arguments:\n  \
                  foo\n  foo(\"bye\")\n  bar(1, darg=88, -1, -2, fan=False)"
)]
pub struct ParsedArgs {
    /// List the available commands and exit
    #[arg(short = 'l', long = "list")]
    pub list_only: bool,

    /// Include commands whose name starts with an underscore
    #[arg(short = 'H', long = "hidden")]
    pub show_hidden: bool,

    /// Print the available commands as JSON and exit
    #[arg(long)]
    pub inspect: bool,

    /// Calls to run, in order
    #[arg(value_name = "CALL")]
    pub invocations: Vec<String>,
}

impl ParsedArgs {
    /// Parse a full argument vector, program name first.
    ///
    /// # Errors
    ///
    /// Returns `Err` for unknown flags, and for `--help`/`--version` (which
    /// clap reports as errors carrying their output).
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}

/// Initialise logging to stderr. The filter comes from `CALLRUN_LOG` and
/// defaults to warnings only so command output stays clean.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    // a host may have installed its own subscriber already
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Dispatch the process arguments against `namespace` with the default
/// configuration, then exit.
pub fn run_cli(namespace: &Namespace) -> ! {
    run_cli_with(namespace, Config::default())
}

/// Dispatch the process arguments against `namespace`, then exit.
///
/// Exit status is 0 when every call succeeded, 1 after printing the listing
/// or on any error, and 2 for invalid flags.
pub fn run_cli_with(namespace: &Namespace, config: Config) -> ! {
    let args = match ParsedArgs::try_parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    std::process::exit(run_with_args(namespace, config, &args))
}

/// Run once and return the exit status instead of exiting.
pub fn run_with_args(namespace: &Namespace, config: Config, args: &ParsedArgs) -> i32 {
    init_logging();

    let origins = namespace.origins();
    if origins.len() > 1 && config.only_origin.is_none() {
        tracing::info!(?origins, "commands come from several origins");
    }

    let dispatcher = Dispatcher::new(namespace, config);
    let mut stdout = std::io::stdout().lock();
    match dispatcher.run(args, &mut stdout) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("{e}");
            1
        }
    }
}
