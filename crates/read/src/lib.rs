//! Selection-shaped read projections: reconstructs the shape of a query
//! response by walking the same selection set that normalized it, pulling
//! each field's current value lazily out of the node store.

mod context;
mod view;

pub use context::ReadContext;
pub use view::{ArrayView, FieldAccess, ObjectView};

use graphcache_ast::Document;
use graphcache_store::NodeStore;
use graphcache_types::{Variables, Visibility};

/// Resolve `root_id` against `visibility` and return a view over it shaped
/// by `document`'s operation selection set. Returns `None` if nothing has
/// ever been written under that root — a cache miss, not an error.
pub fn read<'a>(
    store: &'a NodeStore,
    document: &'a Document,
    variables: &'a Variables,
    root_id: &str,
    visibility: Visibility,
) -> Option<ObjectView<'a>> {
    let node = store.resolve_root(root_id, visibility)?;
    let ctx = ReadContext {
        store,
        document,
        variables,
        visibility,
    };
    Some(ObjectView::new(ctx, node, &document.operation))
}
