use crate::selection::{
    FieldSelection, FragmentDefinition, FragmentSpread, InlineFragment, Selection, SelectionSet,
};
use crate::value::ArgumentValue;
use graphcache_types::CacheError;
use graphql_parser::query as gql;
use std::collections::HashMap;
use std::rc::Rc;

/// An adapted query document: the operation's root selection set plus the
/// fragment map needed to resolve named fragment spreads.
#[derive(Debug, Clone)]
pub struct Document {
    pub operation: Rc<SelectionSet>,
    pub fragments: Rc<HashMap<String, FragmentDefinition>>,
}

impl Document {
    /// Adapt an already-parsed `graphql_parser` document: extract the single
    /// operation selection and build the fragment name -> definition map.
    ///
    /// Fails with [`CacheError::NoOperationDefinition`] if the document has
    /// no operation, pretty-printing the document into the error per the
    /// error message convention.
    pub fn adapt(raw: &gql::Document<'_, String>) -> Result<Self, CacheError> {
        let mut operation = None;
        let mut fragments = HashMap::new();

        for definition in &raw.definitions {
            match definition {
                gql::Definition::Operation(op) => {
                    if operation.is_none() {
                        operation = Some(lower_operation(op));
                    }
                }
                gql::Definition::Fragment(frag) => {
                    let type_condition = match &frag.type_condition {
                        gql::TypeCondition::On(name) => Some(name.clone()),
                    };
                    fragments.insert(
                        frag.name.clone(),
                        FragmentDefinition {
                            type_condition,
                            selection_set: Rc::new(lower_selection_set(&frag.selection_set)),
                        },
                    );
                }
            }
        }

        let operation =
            operation.ok_or_else(|| CacheError::NoOperationDefinition(raw.to_string()))?;

        Ok(Self {
            operation: Rc::new(operation),
            fragments: Rc::new(fragments),
        })
    }

    /// Convenience: parse `src` with `graphql_parser` and adapt it in one
    /// step. Parsing itself is treated as an external collaborator's job;
    /// this just saves callers (tests, simple embedders) a line.
    pub fn parse(src: &str) -> Result<Self, CacheError> {
        let raw = gql::parse_query::<String>(src)
            .map_err(|e| CacheError::QueryParseFailed(e.to_string()))?;
        Self::adapt(&raw)
    }

    /// Look up a named fragment, failing with the same error prefix the
    /// write engine surfaces when a spread cannot be resolved.
    pub fn resolve_fragment(&self, name: &str) -> Result<&FragmentDefinition, CacheError> {
        self.fragments
            .get(name)
            .ok_or_else(|| CacheError::NoFragmentNamed(name.to_string()))
    }
}

fn lower_operation(op: &gql::OperationDefinition<'_, String>) -> SelectionSet {
    let selection_set = match op {
        gql::OperationDefinition::SelectionSet(set) => set,
        gql::OperationDefinition::Query(q) => &q.selection_set,
        gql::OperationDefinition::Mutation(m) => &m.selection_set,
        gql::OperationDefinition::Subscription(s) => &s.selection_set,
    };
    lower_selection_set(selection_set)
}

fn lower_selection_set(set: &gql::SelectionSet<'_, String>) -> SelectionSet {
    SelectionSet(set.items.iter().map(lower_selection).collect())
}

fn lower_selection(selection: &gql::Selection<'_, String>) -> Selection {
    match selection {
        gql::Selection::Field(field) => Selection::Field(lower_field(field)),
        gql::Selection::FragmentSpread(spread) => Selection::FragmentSpread(FragmentSpread {
            name: spread.fragment_name.clone(),
        }),
        gql::Selection::InlineFragment(inline) => {
            let type_condition = inline.type_condition.as_ref().map(|tc| match tc {
                gql::TypeCondition::On(name) => name.clone(),
            });
            Selection::InlineFragment(InlineFragment {
                type_condition,
                selection_set: Rc::new(lower_selection_set(&inline.selection_set)),
            })
        }
    }
}

fn lower_field(field: &gql::Field<'_, String>) -> FieldSelection {
    let arguments = field
        .arguments
        .iter()
        .map(|(name, value)| (name.clone(), ArgumentValue::lower(value)))
        .collect();

    let selection_set = if field.selection_set.items.is_empty() {
        None
    } else {
        Some(Rc::new(lower_selection_set(&field.selection_set)))
    };

    FieldSelection {
        name: field.name.clone(),
        alias: field.alias.clone(),
        arguments,
        selection_set,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_basic_query_into_field_selections() {
        let doc = Document::parse("{ allStacks { id name } }").unwrap();
        assert_eq!(doc.operation.0.len(), 1);
        let Selection::Field(field) = &doc.operation.0[0] else {
            panic!("expected a field selection");
        };
        assert_eq!(field.name, "allStacks");
        let nested = field.selection_set.as_ref().unwrap();
        assert_eq!(nested.0.len(), 2);
    }

    #[test]
    fn aliases_are_captured_separately_from_the_field_name() {
        let doc = Document::parse("{ myStacks: allStacks { id aName: name } }").unwrap();
        let Selection::Field(outer) = &doc.operation.0[0] else {
            panic!("expected a field");
        };
        assert_eq!(outer.name, "allStacks");
        assert_eq!(outer.alias.as_deref(), Some("myStacks"));
        assert_eq!(outer.response_key(), "myStacks");
    }

    #[test]
    fn named_fragment_spreads_resolve_through_the_fragment_map() {
        let doc = Document::parse(
            "{ stack(id: 5) { ...StackFields } } fragment StackFields on Stack { id name }",
        )
        .unwrap();
        let Selection::Field(field) = &doc.operation.0[0] else {
            panic!("expected a field");
        };
        let inner = field.selection_set.as_ref().unwrap();
        let Selection::FragmentSpread(spread) = &inner.0[0] else {
            panic!("expected a fragment spread");
        };
        let resolved = doc.resolve_fragment(&spread.name).unwrap();
        assert_eq!(resolved.type_condition.as_deref(), Some("Stack"));
        assert_eq!(resolved.selection_set.0.len(), 2);
    }

    #[test]
    fn unresolved_fragment_spread_is_an_error() {
        let doc = Document::parse("{ stack(id: 5) { ...Missing } }").unwrap();
        let Selection::Field(field) = &doc.operation.0[0] else {
            panic!("expected a field");
        };
        let inner = field.selection_set.as_ref().unwrap();
        let Selection::FragmentSpread(spread) = &inner.0[0] else {
            panic!("expected a fragment spread");
        };
        let err = doc.resolve_fragment(&spread.name).unwrap_err();
        assert_eq!(err, CacheError::NoFragmentNamed("Missing".to_string()));
    }

    #[test]
    fn document_with_only_fragments_has_no_operation() {
        let raw = gql::parse_query::<String>("fragment F on Stack { id }").unwrap();
        let err = Document::adapt(&raw).unwrap_err();
        assert!(matches!(err, CacheError::NoOperationDefinition(_)));
    }

    #[test]
    fn inline_fragments_carry_their_type_condition() {
        let doc = Document::parse(
            "{ inlineFragmentObj2 { ... on Horse { numLegs } ... on Camel { numBumps } } }",
        )
        .unwrap();
        let Selection::Field(field) = &doc.operation.0[0] else {
            panic!("expected a field");
        };
        let inner = field.selection_set.as_ref().unwrap();
        assert_eq!(inner.0.len(), 2);
        let Selection::InlineFragment(horse) = &inner.0[0] else {
            panic!("expected an inline fragment");
        };
        assert_eq!(horse.type_condition.as_deref(), Some("Horse"));
    }
}
