//! Command registration.
//!
//! A host program registers its callables in a [`Namespace`] together with the
//! parameter metadata a dynamic runtime would get by introspection: names,
//! defaults, variadic markers and documentation.

use crate::ast::{ParamKind, Parameter, Value};
use crate::error::{CommandResult, DefineError};
use crate::interpreter::CallArgs;
use serde::Serialize;
use std::fmt;

/// Origin of the dispatcher's own definitions. Commands from this origin are
/// never offered on the command line.
pub const DISPATCHER_ORIGIN: &str = env!("CARGO_CRATE_NAME");

type Body = Box<dyn Fn(&CallArgs) -> CommandResult>;

/// A callable plus its signature.
pub struct Command {
    params: Vec<Parameter>,
    doc: Option<String>,
    body: Body,
}

impl Command {
    /// Wrap a callable. Parameters and documentation are added with the
    /// builder methods below.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&CallArgs) -> CommandResult + 'static,
    {
        Self {
            params: Vec::new(),
            doc: None,
            body: Box::new(body),
        }
    }

    /// A required parameter.
    #[must_use]
    pub fn param(mut self, name: &str) -> Self {
        self.params.push(Parameter::required(name));
        self
    }

    /// A parameter with a default value.
    #[must_use]
    pub fn param_default(mut self, name: &str, default: impl Into<Value>) -> Self {
        self.params
            .push(Parameter::with_default(name, default.into()));
        self
    }

    /// `*name`: receives surplus positional arguments.
    #[must_use]
    pub fn var_args(mut self, name: &str) -> Self {
        self.params.push(Parameter::var_positional(name));
        self
    }

    /// `**name`: receives unmatched keyword arguments.
    #[must_use]
    pub fn var_kwargs(mut self, name: &str) -> Self {
        self.params.push(Parameter::var_keyword(name));
        self
    }

    #[must_use]
    pub fn doc(mut self, text: &str) -> Self {
        self.doc = Some(text.to_string());
        self
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn doc_text(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub(crate) fn call(&self, args: &CallArgs) -> CommandResult {
        (self.body)(args)
    }

    /// Check the parameter list the way a function definition would be checked.
    fn validate(&self, name: &str) -> Result<(), DefineError> {
        let mut seen: Vec<&str> = Vec::new();
        let mut seen_default = false;
        let mut seen_var_positional = false;
        let mut seen_var_keyword = false;

        for param in &self.params {
            if !is_identifier(&param.name) {
                return Err(DefineError::InvalidName(param.name.clone()));
            }
            if seen.contains(&param.name.as_str()) {
                return Err(DefineError::DuplicateParameter {
                    command: name.to_string(),
                    param: param.name.clone(),
                });
            }
            seen.push(&param.name);

            match param.kind {
                ParamKind::Positional => {
                    if seen_var_positional || seen_var_keyword {
                        return Err(DefineError::ParameterAfterVariadic {
                            command: name.to_string(),
                            param: param.name.clone(),
                        });
                    }
                    if param.default.is_some() {
                        seen_default = true;
                    } else if seen_default {
                        return Err(DefineError::RequiredAfterDefault {
                            command: name.to_string(),
                            param: param.name.clone(),
                        });
                    }
                }
                ParamKind::VarPositional => {
                    if seen_var_positional {
                        return Err(DefineError::DuplicateVariadic {
                            command: name.to_string(),
                            marker: "*",
                        });
                    }
                    if seen_var_keyword {
                        return Err(DefineError::ParameterAfterVariadic {
                            command: name.to_string(),
                            param: param.name.clone(),
                        });
                    }
                    seen_var_positional = true;
                }
                ParamKind::VarKeyword => {
                    if seen_var_keyword {
                        return Err(DefineError::DuplicateVariadic {
                            command: name.to_string(),
                            marker: "**",
                        });
                    }
                    seen_var_keyword = true;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("params", &self.params)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

/// A registered command: its name, where it was defined, and the callable.
#[derive(Debug)]
pub struct Entry {
    pub name: String,
    pub origin: String,
    pub command: Command,
}

/// Description of a command, derived on demand from its registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandDescriptor {
    pub name: String,
    pub params: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    pub origin: String,
}

impl Entry {
    #[must_use]
    pub fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor {
            name: self.name.clone(),
            params: self.command.params.clone(),
            doc: self.command.doc.clone(),
            origin: self.origin.clone(),
        }
    }
}

/// The table of commands a dispatcher run works against.
///
/// Entries keep registration order. Defining an existing name replaces the
/// earlier command in place.
#[derive(Debug)]
pub struct Namespace {
    origin: String,
    entries: Vec<Entry>,
}

impl Namespace {
    /// An empty namespace whose own definitions carry `origin`, usually
    /// `module_path!()` of the registering code.
    #[must_use]
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            entries: Vec::new(),
        }
    }

    /// The origin assigned to commands registered with [`Namespace::define`].
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Register `command` under `name` with this namespace's origin.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the name or a parameter name is not an identifier, or
    /// if the parameter list is not a valid signature.
    pub fn define(&mut self, name: &str, command: Command) -> Result<&mut Self, DefineError> {
        let origin = self.origin.clone();
        self.define_from(&origin, name, command)
    }

    /// Register `command` as if it had been defined by `origin`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Namespace::define`].
    pub fn define_from(
        &mut self,
        origin: &str,
        name: &str,
        command: Command,
    ) -> Result<&mut Self, DefineError> {
        if !is_identifier(name) {
            return Err(DefineError::InvalidName(name.to_string()));
        }
        command.validate(name)?;

        let entry = Entry {
            name: name.to_string(),
            origin: origin.to_string(),
            command,
        };
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                tracing::debug!(name, "redefining command");
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
        Ok(self)
    }

    /// Merge every command of `other` into this namespace, keeping their origins.
    pub fn import(&mut self, other: Namespace) -> &mut Self {
        if other.origin != self.origin {
            tracing::warn!(
                into = %self.origin,
                from = %other.origin,
                "merging commands from a different origin"
            );
        }
        for entry in other.entries {
            match self.entries.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) => *existing = entry,
                None => self.entries.push(entry),
            }
        }
        self
    }

    /// Every distinct origin that contributed commands, in first-seen order.
    pub fn origins(&self) -> Vec<&str> {
        let mut origins: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !origins.contains(&entry.origin.as_str()) {
                origins.push(&entry.origin);
            }
        }
        origins
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !matches!(name, "True" | "False" | "None")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn noop() -> Command {
        Command::new(|_| Ok(()))
    }

    #[test]
    fn test_define_keeps_registration_order() {
        let mut ns = Namespace::new("script");
        ns.define("zeta", noop()).unwrap();
        ns.define("alpha", noop()).unwrap();
        let names: Vec<&str> = ns.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_redefine_replaces_in_place() {
        let mut ns = Namespace::new("script");
        ns.define("a", noop()).unwrap();
        ns.define("b", noop()).unwrap();
        ns.define("a", noop().param("x")).unwrap();
        assert_eq!(ns.len(), 2);
        assert_eq!(ns.entries().next().unwrap().name, "a");
        assert_eq!(ns.get("a").unwrap().command.params().len(), 1);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut ns = Namespace::new("script");
        for bad in ["", "1abc", "with-dash", "None", "sp ace"] {
            assert_eq!(
                ns.define(bad, noop()).unwrap_err(),
                DefineError::InvalidName(bad.to_string())
            );
        }
        assert!(ns.is_empty());
    }

    #[test]
    fn test_signature_validation() {
        let mut ns = Namespace::new("script");
        assert!(matches!(
            ns.define("f", noop().param_default("a", 1).param("b")),
            Err(DefineError::RequiredAfterDefault { .. })
        ));
        assert!(matches!(
            ns.define("f", noop().param("a").param("a")),
            Err(DefineError::DuplicateParameter { .. })
        ));
        assert!(matches!(
            ns.define("f", noop().var_args("r").param("a")),
            Err(DefineError::ParameterAfterVariadic { .. })
        ));
        assert!(matches!(
            ns.define("f", noop().var_kwargs("kw").var_args("r")),
            Err(DefineError::ParameterAfterVariadic { .. })
        ));
        assert!(matches!(
            ns.define("f", noop().var_args("a").var_args("b")),
            Err(DefineError::DuplicateVariadic { marker: "*", .. })
        ));
        assert!(
            ns.define(
                "bar",
                noop()
                    .param("arg")
                    .param_default("darg", 1)
                    .var_args("star")
                    .var_kwargs("stars")
            )
            .is_ok()
        );
    }

    #[test]
    fn test_import_keeps_foreign_origin() {
        let mut helpers = Namespace::new("helpers");
        helpers.define("clean", noop()).unwrap();

        let mut ns = Namespace::new("script");
        ns.define("build", noop()).unwrap();
        ns.import(helpers);

        assert_eq!(ns.get("clean").unwrap().origin, "helpers");
        assert_eq!(ns.get("build").unwrap().origin, "script");
        assert_eq!(ns.origins(), vec!["script", "helpers"]);
    }

    #[test]
    fn test_descriptor_reflects_registration() {
        let mut ns = Namespace::new("script");
        ns.define("foo", noop().param_default("msg", "hello").doc("Let foo speak"))
            .unwrap();
        let descriptor = ns.get("foo").unwrap().descriptor();
        assert_eq!(descriptor.name, "foo");
        assert_eq!(descriptor.params[0].default, Some(Value::from("hello")));
        assert_eq!(descriptor.doc.as_deref(), Some("Let foo speak"));
        assert_eq!(descriptor.origin, "script");
    }
}
