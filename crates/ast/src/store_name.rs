use crate::selection::FieldSelection;
use crate::value::ArgumentValue;
use graphcache_types::{CacheError, FieldStoreName, Variables};

/// Compute the field store name for `field` given the current variables.
///
/// For an argument-free field this is just the field's name (not its
/// alias — the alias only controls how the *response* addresses the
/// field, not how it is normalized into the graph). For a field with
/// arguments, each argument value is rendered syntactically: strings are
/// double-quoted, `null` is the literal token `null`, numbers/booleans/enums
/// use their literal form, and variable references are rendered as the JSON
/// encoding of the variable's bound value.
///
/// List- and object-valued *inline* arguments are rejected: this revision
/// has no canonical serialization for them (see the design notes on a
/// future sorted/stable encoding).
pub fn compute_store_name(
    field: &FieldSelection,
    variables: &Variables,
) -> Result<FieldStoreName, CacheError> {
    if field.arguments.is_empty() {
        return Ok(FieldStoreName::new(field.name.clone()));
    }

    let mut rendered = Vec::with_capacity(field.arguments.len());
    for (name, value) in &field.arguments {
        let v = render_argument_value(value, variables)?;
        rendered.push(format!("{name}: {v}"));
    }

    Ok(FieldStoreName::new(format!(
        "{}({})",
        field.name,
        rendered.join(", ")
    )))
}

fn render_argument_value(
    value: &ArgumentValue,
    variables: &Variables,
) -> Result<String, CacheError> {
    match value {
        ArgumentValue::Variable(name) => {
            let bound = variables
                .get(name)
                .ok_or_else(|| CacheError::UnresolvedVariable(name.clone()))?;
            Ok(serde_json::to_string(bound).expect("JSON values always serialize"))
        }
        ArgumentValue::Int(n) => Ok(n.to_string()),
        ArgumentValue::Float(f) => Ok(f.to_string()),
        ArgumentValue::String(s) => {
            Ok(serde_json::to_string(s).expect("strings always serialize"))
        }
        ArgumentValue::Boolean(b) => Ok(b.to_string()),
        ArgumentValue::Null => Ok("null".to_string()),
        ArgumentValue::Enum(e) => Ok(e.clone()),
        ArgumentValue::List(_) => Err(CacheError::ListArgumentUnsupported),
        ArgumentValue::Object(_) => Err(CacheError::ObjectArgumentUnsupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_with_args(name: &str, args: Vec<(&str, ArgumentValue)>) -> FieldSelection {
        FieldSelection {
            name: name.to_string(),
            alias: None,
            arguments: args.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            selection_set: None,
        }
    }

    #[test]
    fn no_arguments_uses_bare_name() {
        let field = field_with_args("name", vec![]);
        let store_name = compute_store_name(&field, &Variables::new()).unwrap();
        assert_eq!(store_name.as_str(), "name");
    }

    #[test]
    fn inline_arguments_render_literally() {
        let field = field_with_args(
            "zettelis",
            vec![("last", ArgumentValue::Int(2)), ("active", ArgumentValue::Boolean(true))],
        );
        let store_name = compute_store_name(&field, &Variables::new()).unwrap();
        assert_eq!(store_name.as_str(), "zettelis(last: 2, active: true)");
    }

    #[test]
    fn string_arguments_are_double_quoted() {
        let field = field_with_args("user", vec![("id", ArgumentValue::String("abc".into()))]);
        let store_name = compute_store_name(&field, &Variables::new()).unwrap();
        assert_eq!(store_name.as_str(), "user(id: \"abc\")");
    }

    #[test]
    fn variable_arguments_use_json_encoding_of_the_binding() {
        let field = field_with_args("someRandomKey", vec![("key", ArgumentValue::Variable("k".into()))]);
        let mut variables = Variables::new();
        variables.insert("k", serde_json::json!("X"));
        let store_name = compute_store_name(&field, &variables).unwrap();
        assert_eq!(store_name.as_str(), "someRandomKey(key: \"X\")");
    }

    #[test]
    fn unresolved_variable_is_an_error() {
        let field = field_with_args("user", vec![("id", ArgumentValue::Variable("missing".into()))]);
        let err = compute_store_name(&field, &Variables::new()).unwrap_err();
        assert_eq!(err, CacheError::UnresolvedVariable("missing".into()));
    }

    #[test]
    fn list_arguments_fail_fast() {
        let field = field_with_args("f", vec![("xs", ArgumentValue::List(vec![ArgumentValue::Int(1)]))]);
        let err = compute_store_name(&field, &Variables::new()).unwrap_err();
        assert_eq!(err, CacheError::ListArgumentUnsupported);
    }

    #[test]
    fn object_arguments_fail_fast() {
        let field = field_with_args(
            "f",
            vec![(
                "filter",
                ArgumentValue::Object(std::collections::BTreeMap::new()),
            )],
        );
        let err = compute_store_name(&field, &Variables::new()).unwrap_err();
        assert_eq!(err, CacheError::ObjectArgumentUnsupported);
    }

    #[test]
    fn distinct_argument_tuples_yield_distinct_store_names() {
        let a = field_with_args("zettelis", vec![("last", ArgumentValue::Int(1))]);
        let b = field_with_args("zettelis", vec![("last", ArgumentValue::Int(2))]);
        let na = compute_store_name(&a, &Variables::new()).unwrap();
        let nb = compute_store_name(&b, &Variables::new()).unwrap();
        assert_ne!(na, nb);
    }
}
