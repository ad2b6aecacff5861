//! Literal decoding helpers
//!
//! The grammar only checks shape; these functions turn the matched text into values.

use crate::ast::Value;

/// Decode a quoted string token, including its surrounding quotes.
pub(super) fn parse_string(raw: &str) -> Result<String, String> {
    let inner = raw
        .get(1..raw.len().saturating_sub(1))
        .ok_or_else(|| "unterminated string".to_string())?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(c @ ('\\' | '\'' | '"')) => out.push(c),
            // unknown escapes are kept verbatim, backslash included
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => return Err("string ends with a lone backslash".to_string()),
        }
    }
    Ok(out)
}

/// Decode a signed integer or float token.
pub(super) fn parse_number(raw: &str) -> Result<Value, String> {
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    if digits.contains(['.', 'e', 'E']) {
        let value: f64 = digits
            .parse()
            .map_err(|_| format!("invalid float literal `{raw}`"))?;
        return Ok(Value::Float(if negative { -value } else { value }));
    }

    if digits.len() > 1 && digits.starts_with('0') && digits.contains(|c: char| c != '0') {
        return Err(format!(
            "leading zeros are not allowed in integer literal `{raw}`"
        ));
    }

    // parse with the sign attached so i64::MIN round-trips
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    signed
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|_| format!("integer literal `{raw}` does not fit in 64 bits"))
}
