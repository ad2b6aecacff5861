//! JSON description of the eligible commands

use crate::ast::Parameter;
use crate::listing::{clean_doc, render_signature};
use crate::namespace::CommandDescriptor;
use serde::Serialize;

/// One command as reported by `--inspect`
#[derive(Debug, Serialize)]
pub struct CommandInfo {
    pub name: String,
    pub signature: String,
    pub params: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub origin: String,
}

/// Root structure for inspect output
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub commands: Vec<CommandInfo>,
}

impl From<&CommandDescriptor> for CommandInfo {
    fn from(descriptor: &CommandDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            signature: render_signature(descriptor),
            params: descriptor.params.clone(),
            description: descriptor
                .doc
                .as_deref()
                .map(clean_doc)
                .filter(|d| !d.is_empty()),
            origin: descriptor.origin.clone(),
        }
    }
}

/// Pretty-printed JSON for `commands`.
///
/// # Errors
///
/// Returns `Err` if serialization fails.
pub fn to_json(commands: &[CommandDescriptor]) -> Result<String, serde_json::Error> {
    let output = InspectOutput {
        commands: commands.iter().map(CommandInfo::from).collect(),
    };
    serde_json::to_string_pretty(&output)
}
