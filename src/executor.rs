//! Dispatching parsed command-line arguments against a namespace.

use crate::ast::Invocation;
use crate::cli::ParsedArgs;
use crate::config::Config;
use crate::discovery::{self, Filter};
use crate::error::DispatchError;
use crate::namespace::{CommandDescriptor, Entry, Namespace};
use crate::{inspect, interpreter, listing, parser};
use std::io::Write;

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command listing was printed instead of running anything.
    Listed,
    /// The JSON description of the commands was printed.
    Inspected,
    /// Every requested invocation (or the default action) ran.
    Completed,
}

impl Outcome {
    /// Listing is a terminal action that did no work, so it is not a success.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Listed => 1,
            Outcome::Inspected | Outcome::Completed => 0,
        }
    }
}

/// Runs invocations against the eligible commands of one namespace.
pub struct Dispatcher<'ns> {
    namespace: &'ns Namespace,
    config: Config,
}

impl<'ns> Dispatcher<'ns> {
    pub fn new(namespace: &'ns Namespace, config: Config) -> Self {
        Self { namespace, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Eligible commands for the given visibility.
    pub fn eligible(&self, show_hidden: bool) -> Vec<&'ns Entry> {
        let filter = Filter {
            show_hidden,
            only_origin: self.config.only_origin.as_deref(),
        };
        discovery::discover(self.namespace, &filter)
    }

    /// Execute one run. Listing and inspect output go to `out`; command side
    /// effects go wherever the commands write.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the first invocation that names an unknown command,
    /// fails to parse, does not fit the command's signature, or whose command
    /// returns an error. Later invocations are not attempted.
    pub fn run(&self, args: &ParsedArgs, out: &mut dyn Write) -> Result<Outcome, DispatchError> {
        let eligible = self.eligible(args.show_hidden);

        if args.list_only {
            return self.list(&eligible, out);
        }

        if args.inspect {
            let descriptors = describe(&eligible);
            writeln!(out, "{}", inspect::to_json(&descriptors)?)?;
            return Ok(Outcome::Inspected);
        }

        if args.invocations.is_empty() {
            let default = &self.config.default_action;
            return match eligible.iter().find(|e| &e.name == default) {
                Some(entry) => {
                    tracing::debug!(name = %entry.name, "running default action");
                    call(entry, &Invocation::bare(&entry.name))?;
                    Ok(Outcome::Completed)
                }
                None => self.list(&eligible, out),
            };
        }

        for token in &args.invocations {
            let name = parser::invocation_name(token);
            let Some(entry) = eligible.iter().find(|e| e.name == name) else {
                return Err(DispatchError::UnknownCommand(name.to_string()));
            };
            let invocation = parser::parse_invocation(token)?;
            tracing::debug!(
                name,
                positional = invocation.positional.len(),
                keywords = invocation.keywords.len(),
                "dispatching"
            );
            call(entry, &invocation)?;
        }

        Ok(Outcome::Completed)
    }

    fn list(&self, eligible: &[&Entry], out: &mut dyn Write) -> Result<Outcome, DispatchError> {
        listing::write_listing(out, &describe(eligible), self.config.width, &self.config.indent)?;
        Ok(Outcome::Listed)
    }
}

fn describe(entries: &[&Entry]) -> Vec<CommandDescriptor> {
    entries.iter().map(|e| e.descriptor()).collect()
}

fn call(entry: &Entry, invocation: &Invocation) -> Result<(), DispatchError> {
    let args = interpreter::bind(entry.command.params(), invocation).map_err(|source| {
        DispatchError::Bind {
            name: entry.name.clone(),
            source,
        }
    })?;
    entry
        .command
        .call(&args)
        .map_err(|source| DispatchError::Command {
            name: entry.name.clone(),
            source,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ast::Value;
    use crate::namespace::Command;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recording(log: &Log, label: &'static str) -> Command {
        let log = Rc::clone(log);
        Command::new(move |args| {
            let rendered = args
                .values()
                .map(|(n, v)| format!("{n}={}", v.repr()))
                .collect::<Vec<_>>()
                .join(",");
            log.borrow_mut().push(format!("{label}({rendered})"));
            Ok(())
        })
    }

    fn script(log: &Log) -> Namespace {
        let mut ns = Namespace::new("script");
        ns.define(
            "foo",
            recording(log, "foo")
                .param_default("msg", "hello")
                .doc("Let foo speak"),
        )
        .unwrap();

        let bar_log = Rc::clone(log);
        ns.define(
            "bar",
            Command::new(move |args| {
                bar_log.borrow_mut().push(format!(
                    "bar arg={} darg={} star={} stars={}",
                    args.get("arg").map(Value::repr).unwrap_or_default(),
                    args.get("darg").map(Value::repr).unwrap_or_default(),
                    args.rest_value().repr(),
                    args.extra_value().repr()
                ));
                Ok(())
            })
            .param("arg")
            .param_default("darg", 1)
            .var_args("star")
            .var_kwargs("stars"),
        )
        .unwrap();
        ns
    }

    fn parsed(tokens: &[&str]) -> ParsedArgs {
        ParsedArgs {
            invocations: tokens.iter().map(|t| (*t).to_string()).collect(),
            ..ParsedArgs::default()
        }
    }

    fn run(ns: &Namespace, args: &ParsedArgs) -> (Result<Outcome, DispatchError>, String) {
        let mut out = Vec::new();
        let result = Dispatcher::new(ns, Config::default()).run(args, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_bare_name_equals_empty_call() {
        let log = Log::default();
        let ns = script(&log);
        let (result, _) = run(&ns, &parsed(&["foo", "foo()", "foo(\"bye\")"]));
        assert_eq!(result.unwrap(), Outcome::Completed);
        assert_eq!(
            *log.borrow(),
            vec!["foo(msg='hello')", "foo(msg='hello')", "foo(msg='bye')"]
        );
    }

    #[test]
    fn test_bar_gathers() {
        let log = Log::default();
        let ns = script(&log);
        let (result, _) = run(&ns, &parsed(&["bar(1, darg=88, -1, -2, fan=False)"]));
        assert_eq!(result.unwrap().exit_code(), 0);
        assert_eq!(
            *log.borrow(),
            vec!["bar arg=1 darg=88 star=(-1, -2) stars={'fan': False}"]
        );
    }

    #[test]
    fn test_unknown_command_aborts_remaining() {
        let log = Log::default();
        let ns = script(&log);
        let (result, _) = run(&ns, &parsed(&["foo", "baz", "foo(2)"]));
        let err = result.unwrap_err();
        assert!(matches!(&err, DispatchError::UnknownCommand(n) if n == "baz"));
        assert!(err.to_string().contains("baz"));
        assert_eq!(*log.borrow(), vec!["foo(msg='hello')"]);
    }

    #[test]
    fn test_no_args_without_default_lists() {
        let log = Log::default();
        let ns = script(&log);
        let (result, out) = run(&ns, &ParsedArgs::default());
        let outcome = result.unwrap();
        assert_eq!(outcome, Outcome::Listed);
        assert_eq!(outcome.exit_code(), 1);
        assert!(out.starts_with("Commands\n- foo(msg='hello')\n    Let foo speak\n"));
        assert!(out.contains("- bar(arg, darg=1, *star, **stars)\n"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_default_action_runs_once() {
        let log = Log::default();
        let mut ns = Namespace::new("script");
        ns.define("default", recording(&log, "default")).unwrap();

        let (result, out) = run(&ns, &ParsedArgs::default());
        assert_eq!(result.unwrap(), Outcome::Completed);
        assert!(out.is_empty());
        assert_eq!(*log.borrow(), vec!["default()"]);
    }

    #[test]
    fn test_custom_default_action_name() {
        let log = Log::default();
        let mut ns = Namespace::new("script");
        ns.define("build", recording(&log, "build")).unwrap();
        ns.define("default", recording(&log, "default")).unwrap();

        let mut out = Vec::new();
        let outcome = Dispatcher::new(&ns, Config::default().default_action("build"))
            .run(&ParsedArgs::default(), &mut out)
            .unwrap();
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(*log.borrow(), vec!["build()"]);
    }

    #[test]
    fn test_list_flag_ignores_invocations_and_default() {
        let log = Log::default();
        let mut ns = script(&log);
        ns.define("default", recording(&log, "default")).unwrap();

        let args = ParsedArgs {
            list_only: true,
            ..parsed(&["foo"])
        };
        let (result, out) = run(&ns, &args);
        assert_eq!(result.unwrap(), Outcome::Listed);
        assert!(out.contains("- default()"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_hidden_default_needs_flag() {
        let log = Log::default();
        let mut ns = Namespace::new("script");
        ns.define("_secret", recording(&log, "_secret")).unwrap();

        let (result, _) = run(&ns, &parsed(&["_secret"]));
        assert!(matches!(result, Err(DispatchError::UnknownCommand(_))));

        let args = ParsedArgs {
            show_hidden: true,
            ..parsed(&["_secret"])
        };
        let (result, _) = run(&ns, &args);
        assert_eq!(result.unwrap(), Outcome::Completed);
        assert_eq!(*log.borrow(), vec!["_secret()"]);
    }

    #[test]
    fn test_empty_namespace() {
        let ns = Namespace::new("script");
        let (result, out) = run(&ns, &ParsedArgs::default());
        assert_eq!(result.unwrap(), Outcome::Listed);
        assert_eq!(out, "Commands\n");

        let (result, _) = run(&ns, &parsed(&["anything"]));
        assert!(matches!(result, Err(DispatchError::UnknownCommand(_))));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let log = Log::default();
        let ns = script(&log);
        let (result, _) = run(&ns, &parsed(&["foo(1,,2)", "foo"]));
        assert!(matches!(result, Err(DispatchError::Parse(_))));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_bind_error_surfaces() {
        let log = Log::default();
        let ns = script(&log);
        let (result, _) = run(&ns, &parsed(&["bar"]));
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "bar() missing required argument(s): arg");
    }

    #[test]
    fn test_command_error_surfaces() {
        let mut ns = Namespace::new("script");
        ns.define("fail", Command::new(|_| Err("boom".into()))).unwrap();
        let (result, _) = run(&ns, &parsed(&["fail"]));
        assert_eq!(result.unwrap_err().to_string(), "fail() failed: boom");
    }

    #[test]
    fn test_only_origin_hides_imported() {
        let log = Log::default();
        let mut shared = Namespace::new("shared");
        shared.define("lint", recording(&log, "lint")).unwrap();
        let mut ns = Namespace::new("script");
        ns.import(shared);

        let dispatcher = Dispatcher::new(&ns, Config::default().only_origin("script"));
        let mut out = Vec::new();
        let result = dispatcher.run(&parsed(&["lint"]), &mut out);
        assert!(matches!(result, Err(DispatchError::UnknownCommand(_))));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_inspect_outputs_json() {
        let log = Log::default();
        let ns = script(&log);
        let args = ParsedArgs {
            inspect: true,
            ..ParsedArgs::default()
        };
        let (result, out) = run(&ns, &args);
        assert_eq!(result.unwrap(), Outcome::Inspected);
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(parsed["commands"][1]["signature"], "bar(arg, darg=1, *star, **stars)");
    }
}
