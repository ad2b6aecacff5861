//! Parser implementation using pest
//!
//! This module turns a single command-line token such as
//! `bar(1, darg=88, -1, -2, fan=False)` into an [`Invocation`]. Only literals
//! are accepted as arguments; nothing is looked up or evaluated.

mod error;
mod literal;

pub use error::ParseError;

use crate::ast::{Invocation, Value};
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct CallParser;

/// The function name of an invocation string: everything before the first `(`.
///
/// A token without parentheses names a call with no arguments, so the whole
/// token is the name.
#[must_use]
pub fn invocation_name(token: &str) -> &str {
    token.find('(').map_or(token, |idx| &token[..idx])
}

/// Parse an invocation string into an [`Invocation`].
///
/// # Errors
///
/// Returns `Err` if the input is not a single call expression, for example:
/// - Unbalanced parentheses or brackets
/// - An argument that is not a literal (`foo(x)`)
/// - Unterminated strings or malformed numbers
/// - An integer literal that does not fit in 64 bits
pub fn parse_invocation(input: &str) -> Result<Invocation, ParseError> {
    let mut pairs = CallParser::parse(Rule::invocation, input)
        .map_err(|e| ParseError::from_pest(&e, input))?;

    let Some(root) = pairs.next() else {
        return Err(ParseError::custom("empty invocation", input));
    };

    let mut invocation = Invocation::bare("");
    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::identifier => pair.as_str().clone_into(&mut invocation.name),
            Rule::call_args => parse_call_args(pair, &mut invocation, input)?,
            _ => {}
        }
    }

    Ok(invocation)
}

fn parse_call_args(
    pair: Pair<'_, Rule>,
    invocation: &mut Invocation,
    input: &str,
) -> Result<(), ParseError> {
    for argument in pair.into_inner() {
        let Some(inner) = argument.into_inner().next() else {
            continue;
        };
        match inner.as_rule() {
            Rule::keyword_argument => {
                let mut parts = inner.into_inner();
                let (Some(name), Some(value)) = (parts.next(), parts.next()) else {
                    continue;
                };
                let value = parse_literal(value, input)?;
                invocation.keywords.push((name.as_str().to_string(), value));
            }
            Rule::positional_argument => {
                if let Some(value) = inner.into_inner().next() {
                    invocation.positional.push(parse_literal(value, input)?);
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn parse_literal(pair: Pair<'_, Rule>, input: &str) -> Result<Value, ParseError> {
    // `literal` wraps exactly one concrete alternative
    let pair = if pair.as_rule() == Rule::literal {
        match pair.into_inner().next() {
            Some(inner) => inner,
            None => return Err(ParseError::custom("expected a literal", input)),
        }
    } else {
        pair
    };

    match pair.as_rule() {
        Rule::string => literal::parse_string(pair.as_str())
            .map(Value::Str)
            .map_err(|msg| ParseError::at_span(&msg, input, pair.as_span())),
        Rule::number => literal::parse_number(pair.as_str())
            .map_err(|msg| ParseError::at_span(&msg, input, pair.as_span())),
        Rule::boolean => Ok(Value::Bool(pair.as_str() == "True")),
        Rule::none => Ok(Value::None),
        Rule::parenthesized => match pair.into_inner().next() {
            Some(inner) => parse_literal(inner, input),
            None => Err(ParseError::custom("expected a literal", input)),
        },
        Rule::list => parse_items(pair, input).map(Value::List),
        Rule::tuple => parse_items(pair, input).map(Value::Tuple),
        Rule::dict => {
            let mut entries = Vec::new();
            for entry in pair.into_inner() {
                let mut kv = entry.into_inner();
                if let (Some(k), Some(v)) = (kv.next(), kv.next()) {
                    entries.push((parse_literal(k, input)?, parse_literal(v, input)?));
                }
            }
            Ok(Value::Dict(entries))
        }
        _ => Err(ParseError::at_span(
            "unsupported literal",
            input,
            pair.as_span(),
        )),
    }
}

fn parse_items(pair: Pair<'_, Rule>, input: &str) -> Result<Vec<Value>, ParseError> {
    pair.into_inner()
        .map(|item| parse_literal(item, input))
        .collect()
}
