//! Binding an invocation to a command signature
//!
//! Keyword arguments are matched first; positional arguments then fill the
//! remaining declared parameters in order. Whatever is left over goes to the
//! `*` and `**` parameters, or is an error when the signature has none.

mod args;

pub use args::CallArgs;

use crate::ast::{Invocation, ParamKind, Parameter, Value};
use crate::error::BindError;

/// Bind the arguments of `invocation` to `params`.
///
/// # Errors
///
/// Returns `Err` if:
/// - A keyword is given twice
/// - A keyword matches no parameter and there is no `**` parameter
/// - More positional arguments are given than can be bound and there is no `*` parameter
/// - A parameter without a default receives no value
pub fn bind(params: &[Parameter], invocation: &Invocation) -> Result<CallArgs, BindError> {
    let named: Vec<&Parameter> = params
        .iter()
        .filter(|p| p.kind == ParamKind::Positional)
        .collect();
    let var_positional = params.iter().find(|p| p.kind == ParamKind::VarPositional);
    let var_keyword = params.iter().find(|p| p.kind == ParamKind::VarKeyword);

    let mut slots: Vec<Option<Value>> = vec![None; named.len()];
    let mut extra: Vec<(String, Value)> = Vec::new();

    for (idx, (key, value)) in invocation.keywords.iter().enumerate() {
        if invocation.keywords[..idx].iter().any(|(k, _)| k == key) {
            return Err(BindError::DuplicateKeyword(key.clone()));
        }

        match named.iter().position(|p| &p.name == key) {
            Some(idx) => slots[idx] = Some(value.clone()),
            None if var_keyword.is_some() => extra.push((key.clone(), value.clone())),
            None => return Err(BindError::UnexpectedKeyword(key.clone())),
        }
    }

    let bound_by_keyword = slots.iter().filter(|s| s.is_some()).count();
    let mut positional = invocation.positional.iter();
    for slot in slots.iter_mut().filter(|s| s.is_none()) {
        match positional.next() {
            Some(value) => *slot = Some(value.clone()),
            None => break,
        }
    }

    let rest: Vec<Value> = positional.cloned().collect();
    if !rest.is_empty() && var_positional.is_none() {
        // keyword-bound parameters count as filled positional slots
        return Err(BindError::TooManyPositional {
            expected: named.len(),
            given: bound_by_keyword + invocation.positional.len(),
        });
    }

    let mut values = Vec::with_capacity(named.len());
    let mut missing = Vec::new();
    for (param, slot) in named.iter().zip(slots) {
        match slot.or_else(|| param.default.clone()) {
            Some(value) => values.push((param.name.clone(), value)),
            None => missing.push(param.name.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(BindError::MissingArguments(missing));
    }

    Ok(CallArgs::new(
        values,
        var_positional.map(|p| (p.name.clone(), rest)),
        var_keyword.map(|p| (p.name.clone(), extra)),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::parse_invocation;

    fn bar_params() -> Vec<Parameter> {
        vec![
            Parameter::required("arg"),
            Parameter::with_default("darg", Value::Int(1)),
            Parameter::var_positional("star"),
            Parameter::var_keyword("stars"),
        ]
    }

    fn foo_params() -> Vec<Parameter> {
        vec![Parameter::with_default("msg", Value::from("hello"))]
    }

    #[test]
    fn test_bar_mixed_call() {
        let inv = parse_invocation("bar(1, darg=88, -1, -2, fan=False)").unwrap();
        let args = bind(&bar_params(), &inv).unwrap();
        assert_eq!(args.get("arg"), Some(&Value::Int(1)));
        assert_eq!(args.get("darg"), Some(&Value::Int(88)));
        assert_eq!(args.rest(), &[Value::Int(-1), Value::Int(-2)]);
        assert_eq!(
            args.extra(),
            &[("fan".to_string(), Value::Bool(false))]
        );
    }

    #[test]
    fn test_positional_fills_in_order() {
        let inv = parse_invocation("bar(1, 2, 3)").unwrap();
        let args = bind(&bar_params(), &inv).unwrap();
        assert_eq!(args.get("arg"), Some(&Value::Int(1)));
        assert_eq!(args.get("darg"), Some(&Value::Int(2)));
        assert_eq!(args.rest(), &[Value::Int(3)]);
        assert!(args.extra().is_empty());
    }

    #[test]
    fn test_defaults_apply() {
        let args = bind(&foo_params(), &Invocation::bare("foo")).unwrap();
        assert_eq!(args.get("msg"), Some(&Value::from("hello")));

        let inv = parse_invocation("foo(\"bye\")").unwrap();
        let args = bind(&foo_params(), &inv).unwrap();
        assert_eq!(args.get("msg"), Some(&Value::from("bye")));
    }

    #[test]
    fn test_keyword_binds_named_parameter() {
        let inv = parse_invocation("bar(darg=5, arg='x')").unwrap();
        let args = bind(&bar_params(), &inv).unwrap();
        assert_eq!(args.get("arg"), Some(&Value::from("x")));
        assert_eq!(args.get("darg"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_missing_required() {
        let err = bind(&bar_params(), &Invocation::bare("bar")).unwrap_err();
        assert_eq!(err, BindError::MissingArguments(vec!["arg".to_string()]));
    }

    #[test]
    fn test_too_many_positional() {
        let inv = parse_invocation("foo(1, 2)").unwrap();
        let err = bind(&foo_params(), &inv).unwrap_err();
        assert_eq!(
            err,
            BindError::TooManyPositional {
                expected: 1,
                given: 2
            }
        );
    }

    #[test]
    fn test_too_many_positional_counts_declared_parameters() {
        let inv = parse_invocation("foo(msg='x', 'y')").unwrap();
        let err = bind(&foo_params(), &inv).unwrap_err();
        assert_eq!(
            err,
            BindError::TooManyPositional {
                expected: 1,
                given: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "takes 1 positional argument(s) but 2 were given"
        );
    }

    #[test]
    fn test_unexpected_keyword() {
        let inv = parse_invocation("foo(loud=True)").unwrap();
        let err = bind(&foo_params(), &inv).unwrap_err();
        assert_eq!(err, BindError::UnexpectedKeyword("loud".to_string()));
    }

    #[test]
    fn test_duplicate_keyword() {
        let inv = parse_invocation("bar(1, fan=1, fan=2)").unwrap();
        let err = bind(&bar_params(), &inv).unwrap_err();
        assert_eq!(err, BindError::DuplicateKeyword("fan".to_string()));
    }

    #[test]
    fn test_no_parameters() {
        let args = bind(&[], &Invocation::bare("default")).unwrap();
        assert!(args.rest().is_empty());
        assert!(bind(&[], &parse_invocation("default(1)").unwrap()).is_err());
    }
}
