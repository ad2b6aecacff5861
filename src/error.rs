//! Error types for registration, binding and dispatch.

use crate::parser::ParseError;
use thiserror::Error;

/// Result type returned by command bodies.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// A command could not be registered because its signature is invalid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefineError {
    #[error("`{0}` is not a valid identifier")]
    InvalidName(String),

    #[error("{command}: duplicate parameter `{param}`")]
    DuplicateParameter { command: String, param: String },

    #[error("{command}: parameter `{param}` without a default follows a parameter with a default")]
    RequiredAfterDefault { command: String, param: String },

    #[error("{command}: parameter `{param}` must come before `*` and `**` parameters")]
    ParameterAfterVariadic { command: String, param: String },

    #[error("{command}: more than one `{marker}` parameter")]
    DuplicateVariadic { command: String, marker: &'static str },
}

/// The arguments of an invocation do not fit the command's signature.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("missing required argument(s): {}", .0.join(", "))]
    MissingArguments(Vec<String>),

    #[error("takes {expected} positional argument(s) but {given} were given")]
    TooManyPositional { expected: usize, given: usize },

    #[error("got an unexpected keyword argument `{0}`")]
    UnexpectedKeyword(String),

    #[error("got multiple values for argument `{0}`")]
    DuplicateKeyword(String),
}

/// Anything that stops a dispatcher run.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0} is not a recognized function")]
    UnknownCommand(String),

    #[error("invalid invocation\n{0}")]
    Parse(#[from] ParseError),

    #[error("{name}() {source}")]
    Bind {
        name: String,
        #[source]
        source: BindError,
    },

    #[error("{name}() failed: {source}")]
    Command {
        name: String,
        #[source]
        source: Box<dyn std::error::Error>,
    },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize commands: {0}")]
    Json(#[from] serde_json::Error),
}
