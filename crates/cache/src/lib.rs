//! Top-level cache facade.
//!
//! Owns the node store behind a single `Rc<RefCell<..>>` — the whole design
//! is single-threaded and cooperative, so there is no locking here, only
//! borrow checking at runtime. Writes queue the subscribers they touch
//! instead of notifying synchronously; [`Cache::process_pending`] delivers
//! them on the next cooperative yield point, mirroring a microtask-queue
//! style flush without requiring callers to run inside a `LocalSet`.

mod subscription;
mod transaction;

pub use subscription::SubscriptionHandle;
pub use transaction::TxHandle;

use graphcache_ast::Document;
use graphcache_store::NodeStore;
use graphcache_types::{CacheError, SubscriberId, Variables, Visibility};
use indexmap::IndexSet;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use subscription::SubscriptionRecord;

struct CacheInner {
    store: NodeStore,
    subscriptions: HashMap<SubscriberId, SubscriptionRecord>,
    pending: IndexSet<SubscriberId>,
}

/// A normalized, query-shaped object cache.
///
/// Cheap to clone: every clone shares the same underlying store through an
/// `Rc`, exactly like holding multiple handles to the same cache instance.
#[derive(Clone)]
pub struct Cache {
    inner: Rc<RefCell<CacheInner>>,
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(CacheInner {
                store: NodeStore::new(),
                subscriptions: HashMap::new(),
                pending: IndexSet::new(),
            })),
        }
    }

    /// Normalize `data` into the base graph under `root_id`.
    pub fn write_query(
        &self,
        document: &Document,
        variables: &Variables,
        data: &serde_json::Value,
        root_id: &str,
    ) -> Result<(), CacheError> {
        self.write(document, variables, data, root_id, false)
    }

    /// Normalize `data` into the optimistic overlay under `root_id`. Visible
    /// only to optimistic reads and optimistic subscribers until a matching
    /// base write settles it.
    pub fn write_query_optimistic(
        &self,
        document: &Document,
        variables: &Variables,
        data: &serde_json::Value,
        root_id: &str,
    ) -> Result<(), CacheError> {
        self.write(document, variables, data, root_id, true)
    }

    fn write(
        &self,
        document: &Document,
        variables: &Variables,
        data: &serde_json::Value,
        root_id: &str,
        is_optimistic: bool,
    ) -> Result<(), CacheError> {
        let mut inner = self.inner.borrow_mut();
        let outcome = graphcache_write::write(
            &mut inner.store,
            document,
            variables,
            data,
            root_id,
            is_optimistic,
        )?;
        tracing::debug!(
            root = root_id,
            optimistic = is_optimistic,
            notified = outcome.subscribers_to_notify.len(),
            "wrote query into cache"
        );
        inner.pending.extend(outcome.subscribers_to_notify);
        Ok(())
    }

    /// Read `root_id` shaped by `document`'s operation selection set. Returns
    /// `None` if nothing has ever been written under that root.
    pub fn read_query(
        &self,
        document: &Document,
        variables: &Variables,
        root_id: &str,
        optimistic: bool,
    ) -> Result<Option<serde_json::Value>, CacheError> {
        let inner = self.inner.borrow();
        let visibility = Visibility::for_optimistic(optimistic);
        match graphcache_read::read(&inner.store, document, variables, root_id, visibility) {
            Some(view) => Ok(Some(view.to_json()?)),
            None => Ok(None),
        }
    }

    /// Subscribe to future changes under `root_id`. The callback fires once
    /// per settled transaction that touches the subscribed data, delivered
    /// by [`Cache::process_pending`] rather than inline with the write.
    pub fn observe<F>(
        &self,
        document: Document,
        variables: Variables,
        root_id: &str,
        optimistic: bool,
        callback: F,
    ) -> Result<SubscriptionHandle, CacheError>
    where
        F: FnMut(Result<serde_json::Value, CacheError>) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let visibility = Visibility::for_optimistic(optimistic);
        let node = inner
            .store
            .resolve_root(root_id, visibility)
            .ok_or_else(|| CacheError::SubscribeToMissingNode(root_id.to_string()))?;

        let subscriber_id = inner.store.next_subscriber_id();
        inner.store.subscribe(node, subscriber_id, optimistic);
        inner.subscriptions.insert(
            subscriber_id,
            SubscriptionRecord {
                node,
                is_optimistic: optimistic,
                document,
                variables,
                root_id: root_id.to_string(),
                callback: Box::new(callback),
            },
        );

        Ok(SubscriptionHandle(subscriber_id))
    }

    /// Stop delivering notifications for `handle`. A best-effort operation:
    /// it only removes the subscriber from the node it was pinned to at
    /// subscribe time, since that is the only bucket it was ever added to.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        let mut inner = self.inner.borrow_mut();
        inner.pending.shift_remove(&handle.0);
        if let Some(record) = inner.subscriptions.remove(&handle.0) {
            inner.store.unsubscribe(record.node, handle.0, record.is_optimistic);
        }
    }

    /// Begin a grouped optimistic write. Optimistic data never leaks into
    /// the base graph on its own, so committing has nothing further to do,
    /// and rolling back has nothing to undo — both exist for API symmetry
    /// with a future multi-write batching story.
    pub fn tx(&self) -> TxHandle {
        TxHandle::new()
    }

    /// Deliver every notification queued by writes since the last call,
    /// after yielding once to the executor so callers seeing `write_query`
    /// return do not also see subscriber callbacks fire synchronously.
    pub async fn process_pending(&self) {
        tokio::task::yield_now().await;

        let due: Vec<SubscriberId> = {
            let mut inner = self.inner.borrow_mut();
            std::mem::take(&mut inner.pending).into_iter().collect()
        };
        if due.is_empty() {
            return;
        }

        let results: Vec<(SubscriberId, Result<serde_json::Value, CacheError>)> = {
            let inner = self.inner.borrow();
            due.into_iter()
                .filter_map(|id| {
                    let record = inner.subscriptions.get(&id)?;
                    let visibility = Visibility::for_optimistic(record.is_optimistic);
                    let result = match graphcache_read::read(
                        &inner.store,
                        &record.document,
                        &record.variables,
                        &record.root_id,
                        visibility,
                    ) {
                        Some(view) => view.to_json(),
                        None => Err(CacheError::NodeWasRemoved),
                    };
                    Some((id, result))
                })
                .collect()
        };

        let mut inner = self.inner.borrow_mut();
        for (id, result) in results {
            if let Some(record) = inner.subscriptions.get_mut(&id) {
                (record.callback)(result);
            }
        }
    }
}
