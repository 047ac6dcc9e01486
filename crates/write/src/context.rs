use graphcache_ast::Document;
use graphcache_store::NodeStore;
use graphcache_store::Transaction;
use graphcache_types::Variables;

/// Everything a single top-level `write` call threads through its recursive
/// descent: the document being written, the variable bindings resolving its
/// arguments, a mutable handle on the store, and the in-flight transaction.
pub struct WriteContext<'a> {
    pub store: &'a mut NodeStore,
    pub document: &'a Document,
    pub variables: &'a Variables,
    pub transaction: Transaction,
}

impl<'a> WriteContext<'a> {
    pub fn new(
        store: &'a mut NodeStore,
        document: &'a Document,
        variables: &'a Variables,
        is_optimistic: bool,
    ) -> Self {
        let transaction = store.begin_transaction(is_optimistic);
        Self {
            store,
            document,
            variables,
            transaction,
        }
    }
}
