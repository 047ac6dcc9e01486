use crate::node::{FieldValue, NodeKind, NodeRecord};
use crate::transaction::Transaction;
use graphcache_types::{FieldStoreName, NodeId, StoreKey, SubscriberId, TransactionId, Visibility};
use std::collections::HashMap;

/// The node-indexed graph: an arena of node versions plus the base and
/// optimistic indices that map stable identities to the current head of
/// their version chain.
///
/// Node ids are never reused and history is never deleted — there is no
/// garbage collection (see the design notes on this being an accepted
/// non-goal). The store is single-owner and single-threaded: all mutation
/// goes through `&mut self`.
#[derive(Debug, Default)]
pub struct NodeStore {
    arena: Vec<NodeRecord>,
    base_index: HashMap<StoreKey, NodeId>,
    optimistic_index: HashMap<StoreKey, NodeId>,
    base_roots: HashMap<String, NodeId>,
    optimistic_roots: HashMap<String, NodeId>,
    next_transaction_id: u64,
    next_subscriber_id: u64,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- transactions ---------------------------------------------------

    pub fn begin_transaction(&mut self, is_optimistic: bool) -> Transaction {
        let id = TransactionId(self.next_transaction_id);
        self.next_transaction_id += 1;
        Transaction::new(id, is_optimistic)
    }

    pub fn next_subscriber_id(&mut self) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;
        id
    }

    // ---- node lifecycle ---------------------------------------------------

    pub fn new_node(&mut self, tx: &Transaction, kind: NodeKind) -> NodeId {
        let id = NodeId(self.arena.len() as u32);
        self.arena.push(NodeRecord::new(kind, tx.id, tx.is_optimistic));
        id
    }

    pub fn record(&self, id: NodeId) -> &NodeRecord {
        &self.arena[id.0 as usize]
    }

    fn record_mut(&mut self, id: NodeId) -> &mut NodeRecord {
        &mut self.arena[id.0 as usize]
    }

    /// Raw field lookup; no projection, no visibility resolution (the
    /// caller already has a concrete node id).
    pub fn get(&self, id: NodeId, key: &FieldStoreName) -> Option<&FieldValue> {
        self.arena[id.0 as usize].data.get(key)
    }

    // ---- index lookups ---------------------------------------------------

    /// Resolve a store key to its current head node. In optimistic mode,
    /// the optimistic index is consulted first, falling back to the base
    /// index.
    pub fn get_by_key(&self, key: &StoreKey, visibility: Visibility) -> Option<NodeId> {
        match visibility {
            Visibility::Base => self.base_index.get(key).copied(),
            Visibility::Optimistic => self
                .optimistic_index
                .get(key)
                .copied()
                .or_else(|| self.base_index.get(key).copied()),
        }
    }

    /// Resolve a root id (e.g. `"QUERY"`) to its current head node, with
    /// the same optimistic-then-base precedence as `get_by_key`.
    pub fn resolve_root(&self, root_id: &str, visibility: Visibility) -> Option<NodeId> {
        match visibility {
            Visibility::Base => self.base_roots.get(root_id).copied(),
            Visibility::Optimistic => self
                .optimistic_roots
                .get(root_id)
                .copied()
                .or_else(|| self.base_roots.get(root_id).copied()),
        }
    }

    /// Set the root pointer for `root_id` in the index matching the
    /// transaction's optimism, mirroring the store-key index update that
    /// `adopt_parents` performs for ordinary entities.
    pub fn set_root(&mut self, root_id: &str, node: NodeId, tx: &Transaction) {
        let roots = if tx.is_optimistic {
            &mut self.optimistic_roots
        } else {
            &mut self.base_roots
        };
        roots.insert(root_id.to_string(), node);
    }

    /// Register `node` under `key` in the index matching the transaction's
    /// optimism. Base writes always index in the base table; optimistic
    /// writes additionally index in the optimistic table.
    pub fn register_key(&mut self, key: StoreKey, node: NodeId, tx: &Transaction) {
        self.base_index.insert(key.clone(), node);
        if tx.is_optimistic {
            self.optimistic_index.insert(key.clone(), node);
        }
        self.record_mut(node).store_key = Some(key);
    }

    // ---- copy-on-write write path ------------------------------------------

    /// Follow the forward-pointer chain for `visibility` from `id` to its
    /// current head. A node with no forward pointer is its own head.
    pub fn head(&self, mut id: NodeId, is_optimistic: bool) -> NodeId {
        while let Some(next) = self.arena[id.0 as usize].forward(is_optimistic) {
            id = next;
        }
        id
    }

    /// Core copy-on-write write: see the node store contract for the
    /// exact four-step algorithm (redirect / short-circuit / in-place /
    /// copy-on-write).
    pub fn set(&mut self, id: NodeId, key: FieldStoreName, value: FieldValue, tx: &mut Transaction) -> NodeId {
        // 1. Redirect to the head of the relevant chain.
        let head = self.head(id, tx.is_optimistic);

        // 2. Referential short-circuit.
        if self.arena[head.0 as usize].data.get(&key) == Some(&value) {
            return head;
        }

        // 3. Same-transaction in-place mutation.
        if self.arena[head.0 as usize].transaction_id == tx.id {
            self.arena[head.0 as usize].data.insert(key, value);
            return head;
        }

        // 4. Copy-on-write: mint a new version, re-point parents and index.
        let mut next = self.arena[head.0 as usize].clone();
        next.transaction_id = tx.id;
        next.is_optimistic = tx.is_optimistic;
        next.parents = Vec::new();
        next.data.insert(key, value);
        let new_id = NodeId(self.arena.len() as u32);
        self.arena.push(next);

        tracing::trace!(old = %head, new = %new_id, transaction = %tx.id, "copy-on-write version minted");
        self.collect_notifications(head, tx);
        self.arena[head.0 as usize].set_forward(tx.is_optimistic, new_id);

        self.adopt_parents(head, new_id, tx);

        new_id
    }

    /// Queue the old node's subscribers for post-commit notification.
    /// Base subscribers only care about non-optimistic changes; optimistic
    /// subscribers want to see every change.
    fn collect_notifications(&mut self, old: NodeId, tx: &mut Transaction) {
        let record = &self.arena[old.0 as usize];
        if !tx.is_optimistic {
            tx.subscribers_to_notify.extend(record.subscribers.iter().copied());
        }
        tx.subscribers_to_notify
            .extend(record.optimistic_subscribers.iter().copied());
    }

    /// Propagate a copy-on-write replacement up to every parent, and
    /// re-point the relevant store-key index at the new head.
    fn adopt_parents(&mut self, previous: NodeId, new_node: NodeId, tx: &mut Transaction) {
        let parents = self.arena[previous.0 as usize].parents.clone();
        for (parent_id, key_in_parent) in parents {
            let updated_parent =
                self.set(parent_id, key_in_parent.clone(), FieldValue::Node(new_node), tx);
            self.arena[new_node.0 as usize]
                .parents
                .push((updated_parent, key_in_parent));
        }

        if let Some(store_key) = self.arena[previous.0 as usize].store_key.clone() {
            self.arena[new_node.0 as usize].store_key = Some(store_key.clone());
            if tx.is_optimistic {
                self.optimistic_index.insert(store_key, new_node);
            } else {
                self.base_index.insert(store_key, new_node);
            }
        }
    }

    pub fn add_parent(&mut self, child: NodeId, parent: NodeId, key_in_parent: FieldStoreName) {
        self.record_mut(child).parents.push((parent, key_in_parent));
    }

    // ---- subscriptions ---------------------------------------------------

    pub fn subscribe(&mut self, node: NodeId, subscriber: SubscriberId, optimistic: bool) {
        tracing::debug!(node = %node, subscriber = %subscriber, optimistic, "subscriber pinned to node");
        let record = self.record_mut(node);
        if optimistic {
            record.optimistic_subscribers.insert(subscriber);
        } else {
            record.subscribers.insert(subscriber);
        }
    }

    pub fn unsubscribe(&mut self, node: NodeId, subscriber: SubscriberId, optimistic: bool) {
        let record = self.record_mut(node);
        if optimistic {
            record.optimistic_subscribers.remove(&subscriber);
        } else {
            record.subscribers.remove(&subscriber);
        }
    }
}
