use crate::value::ArgumentValue;
use std::rc::Rc;

/// An ordered list of selections: field selections and fragment branches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionSet(pub Vec<Selection>);

impl SelectionSet {
    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One entry of a selection set.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Field(FieldSelection),
    InlineFragment(InlineFragment),
    FragmentSpread(FragmentSpread),
}

/// A named field, possibly aliased, possibly parameterized, possibly with a
/// nested selection set.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSelection {
    pub name: String,
    pub alias: Option<String>,
    pub arguments: Vec<(String, ArgumentValue)>,
    pub selection_set: Option<Rc<SelectionSet>>,
}

impl FieldSelection {
    /// The name this field is addressed by when reading a response object:
    /// the alias if present, else the field name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// `... on Type { ... }` or a bare `{ ... }` inline fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub selection_set: Rc<SelectionSet>,
}

/// `...FragmentName`, resolved later against the document's fragment map.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSpread {
    pub name: String,
}

/// A reusable, named selection subtree with an optional type condition.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentDefinition {
    pub type_condition: Option<String>,
    pub selection_set: Rc<SelectionSet>,
}
