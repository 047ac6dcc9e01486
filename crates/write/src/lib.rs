//! Selection-directed normalization: walks a query response alongside the
//! selection set that produced it, and writes each field into the node
//! store under its canonical store name, minting or reusing nodes as the
//! copy-on-write store requires.

mod context;
mod engine;

pub use context::WriteContext;

use graphcache_ast::Document;
use graphcache_store::NodeStore;
use graphcache_types::{CacheError, NodeId, SubscriberId, Variables};
use std::collections::HashSet;

/// The result of a single top-level write: the (possibly new) head of the
/// root node, and the set of subscribers whose pinned nodes this write
/// touched and who should be notified once the caller's current task turn
/// completes.
#[derive(Debug)]
pub struct WriteOutcome {
    pub root: NodeId,
    pub subscribers_to_notify: HashSet<SubscriberId>,
    pub is_optimistic: bool,
}

/// Write `data` into `store` under `root_id`, normalizing it against
/// `document`'s operation selection set.
///
/// This is the transaction boundary: everything written here shares one
/// transaction id, so repeated writes to the same freshly-created node
/// within this call mutate in place rather than cascading copy-on-write
/// versions.
pub fn write(
    store: &mut NodeStore,
    document: &Document,
    variables: &Variables,
    data: &serde_json::Value,
    root_id: &str,
    is_optimistic: bool,
) -> Result<WriteOutcome, CacheError> {
    let existing_root = store.resolve_root(
        root_id,
        graphcache_types::Visibility::for_optimistic(is_optimistic),
    );

    let mut ctx = WriteContext::new(store, document, variables, is_optimistic);
    let root = engine::write_selection_set(&mut ctx, data, &document.operation, existing_root)?;
    ctx.store.set_root(root_id, root, &ctx.transaction);

    Ok(WriteOutcome {
        root,
        subscribers_to_notify: ctx.transaction.subscribers_to_notify,
        is_optimistic,
    })
}
