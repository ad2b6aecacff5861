//! Rendering of the `Commands` listing.

use crate::namespace::CommandDescriptor;
use std::io::{self, Write};

/// Reflow width for documentation text.
pub const DOC_WIDTH: usize = 80;

/// Indent applied to every documentation line.
pub const DOC_INDENT: &str = "    ";

/// `name(p1, p2=default, *rest, **extra)`
#[must_use]
pub fn render_signature(descriptor: &CommandDescriptor) -> String {
    let params = descriptor
        .params
        .iter()
        .map(crate::ast::Parameter::render)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", descriptor.name, params)
}

/// Normalise documentation text: expand tabs, strip the first line, remove
/// the common indentation of the following lines, and drop leading and
/// trailing blank lines.
#[must_use]
pub fn clean_doc(doc: &str) -> String {
    let expanded = doc.replace('\t', "        ");
    let lines: Vec<&str> = expanded.lines().collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    if let Some(first) = lines.first() {
        cleaned.push(first.trim().to_string());
    }
    for line in lines.iter().skip(1) {
        if line.trim().is_empty() {
            cleaned.push(String::new());
        } else {
            let dedented: String = line.chars().skip(margin).collect();
            cleaned.push(dedented.trim_end().to_string());
        }
    }

    let start = cleaned.iter().position(|l| !l.is_empty());
    let end = cleaned.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(s), Some(e)) => cleaned[s..=e].join("\n"),
        _ => String::new(),
    }
}

/// Wrap a single line to `width` columns, prefixing every output line with
/// `indent`. Whitespace-only input yields an empty string. Leading whitespace
/// of the line is kept; runs of spaces between words are kept unless they
/// fall on a line break.
#[must_use]
pub fn fill(line: &str, width: usize, indent: &str) -> String {
    if line.trim().is_empty() {
        return String::new();
    }

    let avail = width.saturating_sub(indent.chars().count()).max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for chunk in chunks(line) {
        let is_space = chunk.starts_with(char::is_whitespace);
        let chunk_len = chunk.chars().count();

        if is_space {
            if current_len > 0 {
                current.push_str(chunk);
                current_len += chunk_len;
            } else if lines.is_empty() {
                // leading whitespace wider than a line wraps onto itself
                let keep = (chunk_len - 1) % avail + 1;
                current.extend(chunk.chars().skip(chunk_len - keep));
                current_len = keep;
            }
            // whitespace never starts a continuation line
            continue;
        }

        // a word that fits on a line of its own moves there whole, and a
        // whitespace-only fragment left behind is dropped
        if current_len + chunk_len > avail && chunk_len <= avail {
            push_line(&mut lines, &current);
            current.clear();
            current_len = 0;
        }

        // only words longer than a whole line are broken
        let mut word: Vec<char> = chunk.chars().collect();
        while current_len + word.len() > avail {
            let take = avail.saturating_sub(current_len);
            current.extend(&word[..take]);
            push_line(&mut lines, &current);
            current.clear();
            current_len = 0;
            word.drain(..take);
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    push_line(&mut lines, &current);

    lines
        .iter()
        .map(|l| format!("{indent}{l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Finish a wrapped line without its trailing whitespace. Lines that hold
/// only whitespace are dropped.
fn push_line(lines: &mut Vec<String>, current: &str) {
    let line = current.trim_end();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
}

/// Split a line into alternating runs of whitespace and non-whitespace.
fn chunks(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (idx, c) in line.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|s| s != space) {
            out.push(&line[start..idx]);
            start = idx;
        }
        in_space = Some(space);
    }
    if start < line.len() {
        out.push(&line[start..]);
    }
    out
}

/// Clean and reflow documentation text for the listing.
#[must_use]
pub fn format_doc(doc: &str, width: usize, indent: &str) -> String {
    clean_doc(doc)
        .lines()
        .map(|line| fill(line, width, indent))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the `Commands` header followed by one entry per command.
///
/// # Errors
///
/// Returns `Err` if writing to `out` fails.
pub fn write_listing(
    out: &mut dyn Write,
    commands: &[CommandDescriptor],
    width: usize,
    indent: &str,
) -> io::Result<()> {
    writeln!(out, "Commands")?;
    for descriptor in commands {
        writeln!(out, "- {}", render_signature(descriptor))?;
        if let Some(doc) = &descriptor.doc {
            let formatted = format_doc(doc, width, indent);
            if !formatted.is_empty() {
                writeln!(out, "{formatted}")?;
            }
        }
    }
    Ok(())
}
