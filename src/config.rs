//! Dispatcher configuration.

use crate::listing::{DOC_INDENT, DOC_WIDTH};

/// Name of the command run when no invocation is given.
pub const DEFAULT_ACTION: &str = "default";

/// Environment variable holding the log filter (`tracing_subscriber::EnvFilter` syntax).
pub const LOG_ENV: &str = "CALLRUN_LOG";

/// Settings for one dispatcher run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub default_action: String,
    /// Restrict eligible commands to this origin.
    pub only_origin: Option<String>,
    pub width: usize,
    pub indent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_action: DEFAULT_ACTION.to_string(),
            only_origin: None,
            width: DOC_WIDTH,
            indent: DOC_INDENT.to_string(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn default_action(mut self, name: &str) -> Self {
        name.clone_into(&mut self.default_action);
        self
    }

    /// Only offer commands registered by `origin`, leaving out anything
    /// imported from other namespaces.
    #[must_use]
    pub fn only_origin(mut self, origin: &str) -> Self {
        self.only_origin = Some(origin.to_string());
        self
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn indent(mut self, indent: &str) -> Self {
        indent.clone_into(&mut self.indent);
        self
    }
}
