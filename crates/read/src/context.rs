use graphcache_ast::Document;
use graphcache_store::NodeStore;
use graphcache_types::{Variables, Visibility};

/// The fixed parts of a read: the store to project from, the document
/// supplying selection sets and fragments, the variable bindings that
/// resolve field arguments, and which overlay to resolve against.
#[derive(Clone, Copy)]
pub struct ReadContext<'a> {
    pub store: &'a NodeStore,
    pub document: &'a Document,
    pub variables: &'a Variables,
    pub visibility: Visibility,
}
