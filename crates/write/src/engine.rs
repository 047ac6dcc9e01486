use crate::context::WriteContext;
use graphcache_ast::{FieldSelection, Selection, SelectionSet};
use graphcache_store::{FieldValue, NodeKind};
use graphcache_types::{CacheError, NodeId, ScalarValue, StoreKey, Visibility};

/// Normalize `data` against `selection_set`, writing it into the node
/// reachable at `existing_node` (reused in place when present, minted fresh
/// otherwise), and return the node's current head once every field in the
/// selection has been written.
///
/// `existing_node` is a hint, not a guarantee: a normalizable object (one
/// with a store key) always resolves identity through the key index first,
/// falling back to the hint only for anonymous objects that live solely
/// under their parent.
pub fn write_selection_set(
    ctx: &mut WriteContext<'_>,
    data: &ScalarValue,
    selection_set: &SelectionSet,
    existing_node: Option<NodeId>,
) -> Result<NodeId, CacheError> {
    let obj = data.as_object().cloned().unwrap_or_default();
    let typename = obj.get("__typename").and_then(|v| v.as_str());
    let store_key = derive_store_key(&obj, typename);

    let mut current = resolve_identity(ctx, store_key.as_ref(), existing_node);

    for_each_field(selection_set, ctx.document, typename, &mut |field| {
        let value = obj.get(field.response_key()).ok_or_else(|| {
            tracing::warn!(field = field.response_key(), "field missing from written data");
            CacheError::MissingField(field.response_key().to_string())
        })?;
        current = write_field(ctx, current, field, value)?;
        Ok(())
    })?;

    Ok(current)
}

/// Resolve the node a (possibly keyed) object should be written into: a
/// keyed object always goes through the identity index; an anonymous one
/// reuses `hint` if supplied, else gets a fresh node.
fn resolve_identity(
    ctx: &mut WriteContext<'_>,
    store_key: Option<&StoreKey>,
    hint: Option<NodeId>,
) -> NodeId {
    let visibility = Visibility::for_optimistic(ctx.transaction.is_optimistic);
    match store_key {
        Some(key) => match ctx.store.get_by_key(key, visibility) {
            Some(existing) => existing,
            None => {
                let id = ctx.store.new_node(&ctx.transaction, NodeKind::Object);
                ctx.store.register_key(key.clone(), id, &ctx.transaction);
                id
            }
        },
        None => hint.unwrap_or_else(|| ctx.store.new_node(&ctx.transaction, NodeKind::Object)),
    }
}

fn derive_store_key(
    obj: &serde_json::Map<String, ScalarValue>,
    typename: Option<&str>,
) -> Option<StoreKey> {
    if let Some(id) = obj.get("__id") {
        return Some(StoreKey::new(scalar_to_key_fragment(id)));
    }
    let id = obj.get("id")?;
    let typename = typename?;
    Some(StoreKey::new(format!(
        "{typename}:{}",
        scalar_to_key_fragment(id)
    )))
}

fn scalar_to_key_fragment(value: &ScalarValue) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Write one field of an already-resolved object node, recursing into
/// nested objects and list elements, and return the (possibly new, via
/// copy-on-write) head of `node`.
fn write_field(
    ctx: &mut WriteContext<'_>,
    node: NodeId,
    field: &FieldSelection,
    value: &ScalarValue,
) -> Result<NodeId, CacheError> {
    let store_name = graphcache_ast::compute_store_name(field, ctx.variables)?;

    let field_value = match (&field.selection_set, value) {
        (_, ScalarValue::Null) => FieldValue::Scalar(ScalarValue::Null),
        (Some(nested), ScalarValue::Object(_)) => {
            let existing_child = existing_child_node(ctx, node, &store_name);
            let child = write_selection_set(ctx, value, nested, existing_child)?;
            FieldValue::Node(child)
        }
        (Some(nested), ScalarValue::Array(items)) => {
            let existing_array = existing_child_node(ctx, node, &store_name);
            let array_node = write_array_node(ctx, items, nested, existing_array)?;
            FieldValue::Node(array_node)
        }
        _ => FieldValue::Scalar(value.clone()),
    };

    let next = ctx
        .store
        .set(node, store_name.clone(), field_value.clone(), &mut ctx.transaction);
    if let FieldValue::Node(child) = field_value {
        ctx.store.add_parent(child, next, store_name);
    }
    Ok(next)
}

fn existing_child_node(
    ctx: &WriteContext<'_>,
    node: NodeId,
    store_name: &graphcache_types::FieldStoreName,
) -> Option<NodeId> {
    match ctx.store.get(node, store_name) {
        Some(FieldValue::Node(id)) => Some(*id),
        _ => None,
    }
}

/// Normalize a list value whose field carries a nested selection set: one
/// child node per element, addressed at the array node by its integer
/// index. A list with no nested selection set is never reached here — it is
/// written as a single opaque scalar by the caller.
fn write_array_node(
    ctx: &mut WriteContext<'_>,
    items: &[ScalarValue],
    nested: &SelectionSet,
    existing_array: Option<NodeId>,
) -> Result<NodeId, CacheError> {
    let mut array_node = existing_array.unwrap_or_else(|| ctx.store.new_node(&ctx.transaction, NodeKind::Array));

    for (i, item) in items.iter().enumerate() {
        let index_key = graphcache_types::FieldStoreName::index(i);
        let element_value = match item {
            ScalarValue::Null => FieldValue::Scalar(ScalarValue::Null),
            ScalarValue::Array(nested_items) => {
                let existing_element = existing_child_node(ctx, array_node, &index_key);
                let child = write_array_node(ctx, nested_items, nested, existing_element)?;
                FieldValue::Node(child)
            }
            ScalarValue::Object(_) => {
                let existing_element = existing_child_node(ctx, array_node, &index_key);
                let child = write_selection_set(ctx, item, nested, existing_element)?;
                FieldValue::Node(child)
            }
            scalar => FieldValue::Scalar(scalar.clone()),
        };

        array_node = ctx
            .store
            .set(array_node, index_key.clone(), element_value.clone(), &mut ctx.transaction);
        if let FieldValue::Node(child) = element_value {
            ctx.store.add_parent(child, array_node, index_key);
        }
    }

    Ok(array_node)
}

/// Flatten a selection set into its field selections, expanding named and
/// inline fragments whose type condition matches `typename`.
fn for_each_field(
    selection_set: &SelectionSet,
    document: &graphcache_ast::Document,
    typename: Option<&str>,
    f: &mut dyn FnMut(&FieldSelection) -> Result<(), CacheError>,
) -> Result<(), CacheError> {
    for selection in selection_set.iter() {
        match selection {
            Selection::Field(field) => f(field)?,
            Selection::InlineFragment(inline) => {
                if graphcache_ast::is_matching_fragment(inline.type_condition.as_deref(), typename) {
                    for_each_field(&inline.selection_set, document, typename, f)?;
                }
            }
            Selection::FragmentSpread(spread) => {
                let fragment = document.resolve_fragment(&spread.name)?;
                if graphcache_ast::is_matching_fragment(fragment.type_condition.as_deref(), typename) {
                    for_each_field(&fragment.selection_set, document, typename, f)?;
                }
            }
        }
    }
    Ok(())
}
