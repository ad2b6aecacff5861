//! User-friendly parse error types and formatting.
//!
//! Converts raw pest parser errors into a short diagnostic that points at the
//! offending column of the invocation string, with a hint when one applies.

use std::fmt;

use super::Rule;

/// A structured, user-friendly invocation parse error.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message (no raw rule names).
    pub message: String,
    /// Column number (1-indexed) where the error begins.
    pub col: usize,
    /// End column for span errors (used to size the underline caret).
    pub col_end: Option<usize>,
    /// The invocation string that failed to parse.
    pub input: String,
    /// Optional suggestion to help the user fix the error.
    pub hint: Option<String>,
}

impl ParseError {
    /// Build a `ParseError` from a pest error.
    pub(super) fn from_pest(error: &pest::error::Error<Rule>, input: &str) -> Self {
        let (col, col_end) = match error.line_col {
            pest::error::LineColLocation::Pos((_, c)) => (c, None),
            pest::error::LineColLocation::Span((sl, sc), (el, ec)) => {
                (sc, if sl == el { Some(ec) } else { None })
            }
        };

        let (message, hint) = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => (
                friendly_message(positives),
                friendly_hint(positives, input, col),
            ),
            pest::error::ErrorVariant::CustomError { message } => (message.clone(), None),
        };

        ParseError {
            message,
            col,
            col_end,
            input: input.to_string(),
            hint,
        }
    }

    /// An error not tied to a particular position.
    pub(super) fn custom(message: &str, input: &str) -> Self {
        ParseError {
            message: message.to_string(),
            col: 1,
            col_end: None,
            input: input.to_string(),
            hint: None,
        }
    }

    /// An error covering the span of a single token.
    pub(super) fn at_span(message: &str, input: &str, span: pest::Span<'_>) -> Self {
        let (_, start) = span.start_pos().line_col();
        let (_, end) = span.end_pos().line_col();
        ParseError {
            message: message.to_string(),
            col: start,
            col_end: Some(end),
            input: input.to_string(),
            hint: None,
        }
    }
}

/// Return a short, user-facing label for a grammar rule, or `None` to omit it.
fn rule_label(rule: Rule) -> Option<&'static str> {
    match rule {
        Rule::identifier => Some("function name"),
        Rule::call_args => Some("`(`"),
        Rule::argument => Some("argument"),
        Rule::keyword_argument => Some("keyword argument (`name=value`)"),
        Rule::literal | Rule::positional_argument => Some("literal value"),
        Rule::string => Some("quoted string"),
        Rule::number => Some("number"),
        Rule::pair => Some("`key: value` pair"),
        // EOI and all silent/atomic rules are suppressed.
        _ => None,
    }
}

/// Compose a human-readable message from the expected rule set.
fn friendly_message(positives: &[Rule]) -> String {
    let mut named: Vec<&str> = positives.iter().copied().filter_map(rule_label).collect();
    named.dedup();

    match named.as_slice() {
        [] => "unexpected token".to_string(),
        [single] => format!("expected {single}"),
        [a, b] => format!("expected {a} or {b}"),
        many => match many.split_last() {
            Some((last, rest)) => format!("expected {} or {}", rest.join(", "), last),
            None => "unexpected token".to_string(),
        },
    }
}

/// Return an actionable hint based on the expected rules and the input.
fn friendly_hint(positives: &[Rule], input: &str, col: usize) -> Option<String> {
    let has = |r: Rule| positives.contains(&r);

    if has(Rule::literal) || has(Rule::argument) {
        // columns count characters, not bytes
        let before: String = input.chars().take(col.saturating_sub(1)).collect();
        let after: String = input.chars().skip(col.saturating_sub(1)).collect();
        if after.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            return Some(
                "Arguments must be literals: quote text as 'text' or \"text\", \
                 and use True, False or None for constants."
                    .to_string(),
            );
        }
        let open = before.chars().filter(|&c| c == '(').count();
        let close = before.chars().filter(|&c| c == ')').count();
        if open > close && after.is_empty() {
            return Some("The argument list must be closed with `)`.".to_string());
        }
    }

    if has(Rule::identifier) && !has(Rule::literal) {
        return Some(
            "Function names must start with a letter or `_` and contain only \
             letters, digits, or `_`."
                .to_string(),
        );
    }

    None
}

/// Format the caret underline for an error at `col` with optional `col_end`.
fn underline(col: usize, col_end: Option<usize>) -> String {
    let start = col.saturating_sub(1);
    let len = col_end.map_or(1, |end| end.saturating_sub(col).max(1));
    format!("{}{}", " ".repeat(start), "^".repeat(len))
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        //   error: <message>
        //     | <input>
        //     | <caret>
        writeln!(f, "error: {}", self.message)?;
        writeln!(f, "   | {}", self.input)?;
        write!(f, "   | {}", underline(self.col, self.col_end))?;

        if let Some(ref hint) = self.hint {
            writeln!(f)?;
            write!(f, "   = hint: {hint}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
