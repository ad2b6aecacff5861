//! # callrun-example
//!
//! A small task script built on `callrun`.
//!
//! ## Usage
//!
//! - List the commands: `callrun-example`
//! - Call with defaults: `callrun-example foo` prints `foo says hello`
//! - Pass arguments: `callrun-example 'foo(1)'` prints `foo says 1`
//! - Several calls: `callrun-example 'foo("hello")' 'foo("bye")'`
//! - Gather extras: `callrun-example 'bar(1, darg=88, -1, -2, fan=False)'`

use callrun::error::DefineError;
use callrun::{Command, Namespace, WorkingDir};

fn register(ns: &mut Namespace) -> Result<(), DefineError> {
    ns.define(
        "foo",
        Command::new(|args| {
            println!("foo says {}", args.get("msg").unwrap_or(&callrun::Value::None));
            Ok(())
        })
        .param_default("msg", "hello")
        .doc(
            "Let foo speak

                Returns
                -------
                None
            ",
        ),
    )?;

    ns.define(
        "bar",
        Command::new(|args| {
            for name in ["arg", "darg"] {
                if let Some(value) = args.get(name) {
                    println!("{name} {value}");
                }
            }
            println!("args {}", args.rest_value().repr());
            println!("kwargs {}", args.extra_value().repr());
            Ok(())
        })
        .param("arg")
        .param_default("darg", 1)
        .var_args("star")
        .var_kwargs("stars"),
    )?;

    ns.define(
        "ls",
        Command::new(|args| {
            let _cwd = WorkingDir::enter(args.str("path")?)?;
            let output = callrun::run("ls", None)?;
            print!("{}", output.stdout);
            if !output.success() {
                return Err(output.stderr.trim().to_string().into());
            }
            Ok(())
        })
        .param_default("path", ".")
        .doc("List the files in a directory."),
    )?;

    ns.define(
        "_tidy",
        Command::new(|_| {
            println!("tidying up");
            Ok(())
        }),
    )?;

    Ok(())
}

fn main() {
    let mut ns = Namespace::new(module_path!());
    if let Err(e) = register(&mut ns) {
        callrun::fatal_error(&format!("Error registering commands: {e}"));
    }
    callrun::run_cli(&ns);
}
