use crate::context::ReadContext;
use graphcache_ast::{Document, FieldSelection, Selection, SelectionSet};
use graphcache_store::{FieldValue, NodeKind};
use graphcache_types::{CacheError, FieldStoreName, NodeId, ScalarValue};
use std::rc::Rc;

/// A lazily-resolved field: nothing is read from the store until a field is
/// actually requested through [`ObjectView::get`] or [`ArrayView::get`].
pub enum FieldAccess<'a> {
    Null,
    Scalar(&'a ScalarValue),
    Object(ObjectView<'a>),
    Array(ArrayView<'a>),
}

impl<'a> FieldAccess<'a> {
    /// Materialize this field (and everything reachable under it) into a
    /// plain JSON value shaped exactly like the selection that produced it.
    pub fn to_json(&self) -> Result<serde_json::Value, CacheError> {
        match self {
            FieldAccess::Null => Ok(serde_json::Value::Null),
            FieldAccess::Scalar(v) => Ok((*v).clone()),
            FieldAccess::Object(view) => view.to_json(),
            FieldAccess::Array(view) => view.to_json(),
        }
    }
}

/// A read-only, selection-shaped projection of one object node.
///
/// Only fields named by `selection_set` (through direct selections, inline
/// fragments, or named fragment spreads whose type condition matches this
/// object's `__typename`) are visible — asking for any other key is a
/// `MissingField` error. A field that *is* named by the selection but has no
/// value in the store yet is a different, non-fatal case: it logs and
/// projects as `null` rather than failing the read.
#[derive(Clone, Copy)]
pub struct ObjectView<'a> {
    ctx: ReadContext<'a>,
    node: NodeId,
    selection_set: &'a Rc<SelectionSet>,
}

impl<'a> ObjectView<'a> {
    pub(crate) fn new(ctx: ReadContext<'a>, node: NodeId, selection_set: &'a Rc<SelectionSet>) -> Self {
        Self {
            ctx,
            node,
            selection_set,
        }
    }

    pub fn typename(&self) -> Option<&'a str> {
        match self.ctx.store.get(self.node, &FieldStoreName::new("__typename")) {
            Some(FieldValue::Scalar(ScalarValue::String(s))) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Resolve one field by its response key (the alias, if aliased, else
    /// the field name).
    pub fn get(&self, response_key: &str) -> Result<FieldAccess<'a>, CacheError> {
        let typename = self.typename();
        let fields = flatten_fields(self.selection_set, self.ctx.document, typename)?;
        let field = fields
            .into_iter()
            .find(|f| f.response_key() == response_key)
            .ok_or_else(|| CacheError::MissingField(response_key.to_string()))?;
        self.resolve_field(field)
    }

    fn resolve_field(&self, field: &'a FieldSelection) -> Result<FieldAccess<'a>, CacheError> {
        let store_name = graphcache_ast::compute_store_name(field, self.ctx.variables)?;
        let value = match self.ctx.store.get(self.node, &store_name) {
            Some(value) => value,
            None => {
                tracing::debug!(
                    field = field.response_key(),
                    store_name = store_name.as_str(),
                    "field selected but never written; projecting as undefined"
                );
                return Ok(FieldAccess::Null);
            }
        };

        match value {
            FieldValue::Scalar(ScalarValue::Null) => Ok(FieldAccess::Null),
            FieldValue::Scalar(v) => Ok(FieldAccess::Scalar(v)),
            FieldValue::Node(child) => {
                let nested = field
                    .selection_set
                    .as_ref()
                    .expect("a field resolving to a node always carries a nested selection");
                match self.ctx.store.record(*child).kind {
                    NodeKind::Object => Ok(FieldAccess::Object(ObjectView::new(self.ctx, *child, nested))),
                    NodeKind::Array => Ok(FieldAccess::Array(ArrayView::new(self.ctx, *child, nested))),
                }
            }
        }
    }

    /// Rejects any attempt to write through the view: reads are the only
    /// supported operation here, writes go through the normalization path.
    pub fn set(&self, _response_key: &str, _value: ScalarValue) -> Result<(), CacheError> {
        Err(CacheError::ViewMutationRejected)
    }

    pub fn remove(&self, _response_key: &str) -> Result<(), CacheError> {
        Err(CacheError::ViewMutationRejected)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, CacheError> {
        let typename = self.typename();
        let fields = flatten_fields(self.selection_set, self.ctx.document, typename)?;
        let mut map = serde_json::Map::with_capacity(fields.len());
        for field in fields {
            let value = self.resolve_field(field)?.to_json()?;
            map.insert(field.response_key().to_string(), value);
        }
        Ok(serde_json::Value::Object(map))
    }
}

/// A read-only, selection-shaped projection of one array node. Every
/// element shares the same nested selection set (the field's own).
#[derive(Clone, Copy)]
pub struct ArrayView<'a> {
    ctx: ReadContext<'a>,
    node: NodeId,
    element_selection: &'a Rc<SelectionSet>,
}

impl<'a> ArrayView<'a> {
    pub(crate) fn new(ctx: ReadContext<'a>, node: NodeId, element_selection: &'a Rc<SelectionSet>) -> Self {
        Self {
            ctx,
            node,
            element_selection,
        }
    }

    pub fn len(&self) -> usize {
        let mut count = 0;
        while self
            .ctx
            .store
            .get(self.node, &FieldStoreName::index(count))
            .is_some()
        {
            count += 1;
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Result<FieldAccess<'a>, CacheError> {
        let key = FieldStoreName::index(index);
        let value = self
            .ctx
            .store
            .get(self.node, &key)
            .ok_or_else(|| CacheError::MissingField(key.as_str().to_string()))?;

        match value {
            FieldValue::Scalar(ScalarValue::Null) => Ok(FieldAccess::Null),
            FieldValue::Scalar(v) => Ok(FieldAccess::Scalar(v)),
            FieldValue::Node(child) => match self.ctx.store.record(*child).kind {
                NodeKind::Object => Ok(FieldAccess::Object(ObjectView::new(
                    self.ctx,
                    *child,
                    self.element_selection,
                ))),
                NodeKind::Array => Ok(FieldAccess::Array(ArrayView::new(
                    self.ctx,
                    *child,
                    self.element_selection,
                ))),
            },
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, CacheError> {
        let mut items = Vec::with_capacity(self.len());
        for i in 0..self.len() {
            items.push(self.get(i)?.to_json()?);
        }
        Ok(serde_json::Value::Array(items))
    }

    /// Rejects any attempt to write through the view, mirroring
    /// [`ObjectView::set`].
    pub fn set(&self, _index: usize, _value: ScalarValue) -> Result<(), CacheError> {
        Err(CacheError::ViewMutationRejected)
    }
}

/// Flatten a selection set into the field selections visible for an object
/// whose `__typename` is `typename`, expanding inline fragments and named
/// fragment spreads whose type condition matches.
fn flatten_fields<'a>(
    selection_set: &'a SelectionSet,
    document: &'a Document,
    typename: Option<&str>,
) -> Result<Vec<&'a FieldSelection>, CacheError> {
    let mut fields = Vec::new();
    flatten_fields_into(selection_set, document, typename, &mut fields)?;
    Ok(fields)
}

fn flatten_fields_into<'a>(
    selection_set: &'a SelectionSet,
    document: &'a Document,
    typename: Option<&str>,
    out: &mut Vec<&'a FieldSelection>,
) -> Result<(), CacheError> {
    for selection in selection_set.iter() {
        match selection {
            Selection::Field(field) => out.push(field),
            Selection::InlineFragment(inline) => {
                if graphcache_ast::is_matching_fragment(inline.type_condition.as_deref(), typename) {
                    flatten_fields_into(&inline.selection_set, document, typename, out)?;
                }
            }
            Selection::FragmentSpread(spread) => {
                let fragment = document.resolve_fragment(&spread.name)?;
                if graphcache_ast::is_matching_fragment(fragment.type_condition.as_deref(), typename) {
                    flatten_fields_into(&fragment.selection_set, document, typename, out)?;
                }
            }
        }
    }
    Ok(())
}
