//! Selection of the commands offered on the command line.

use crate::namespace::{DISPATCHER_ORIGIN, Entry, Namespace};

/// Filters applied to a namespace to find its eligible commands.
#[derive(Debug, Clone, Default)]
pub struct Filter<'a> {
    /// Include names starting with `_`.
    pub show_hidden: bool,
    /// When set, only commands defined by exactly this origin are eligible.
    pub only_origin: Option<&'a str>,
}

/// Why an entry was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    DispatcherOrigin,
    ForeignOrigin,
    Hidden,
}

/// Check a single entry against the filter.
pub fn check(entry: &Entry, filter: &Filter<'_>) -> Result<(), Exclusion> {
    if entry.origin == DISPATCHER_ORIGIN {
        return Err(Exclusion::DispatcherOrigin);
    }
    if let Some(origin) = filter.only_origin
        && entry.origin != origin
    {
        return Err(Exclusion::ForeignOrigin);
    }
    if !filter.show_hidden && entry.name.starts_with('_') {
        return Err(Exclusion::Hidden);
    }
    Ok(())
}

/// Eligible entries in registration order. An empty result is valid.
pub fn discover<'ns>(namespace: &'ns Namespace, filter: &Filter<'_>) -> Vec<&'ns Entry> {
    let eligible: Vec<&Entry> = namespace
        .entries()
        .filter(|entry| match check(entry, filter) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(name = %entry.name, ?reason, "skipping command");
                false
            }
        })
        .collect();

    tracing::debug!(
        eligible = eligible.len(),
        total = namespace.len(),
        "discovered commands"
    );
    eligible
}
