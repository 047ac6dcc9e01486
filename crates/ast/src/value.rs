use std::collections::BTreeMap;

/// An argument value, lowered out of `graphql_parser`'s borrowed AST into an
/// owned form so it can outlive the call that parsed the document.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Variable(String),
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<ArgumentValue>),
    Object(BTreeMap<String, ArgumentValue>),
}

impl ArgumentValue {
    pub(crate) fn lower(value: &graphql_parser::query::Value<'_, String>) -> Self {
        use graphql_parser::query::Value as GqlValue;
        match value {
            GqlValue::Variable(name) => ArgumentValue::Variable(name.clone()),
            GqlValue::Int(n) => ArgumentValue::Int(n.as_i64().unwrap_or_default()),
            GqlValue::Float(f) => ArgumentValue::Float(*f),
            GqlValue::String(s) => ArgumentValue::String(s.clone()),
            GqlValue::Boolean(b) => ArgumentValue::Boolean(*b),
            GqlValue::Null => ArgumentValue::Null,
            GqlValue::Enum(e) => ArgumentValue::Enum(e.clone()),
            GqlValue::List(items) => {
                ArgumentValue::List(items.iter().map(ArgumentValue::lower).collect())
            }
            GqlValue::Object(fields) => ArgumentValue::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), ArgumentValue::lower(v)))
                    .collect(),
            ),
        }
    }
}
