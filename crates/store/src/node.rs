use graphcache_types::{FieldStoreName, NodeId, ScalarValue, StoreKey, SubscriberId, TransactionId};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Whether a node represents a plain object or a dense integer-indexed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
}

/// A value stored under a field store name: either an inline scalar, or a
/// reference to another node (a child object or a nested array node — both
/// are graph nodes, distinguished by [`NodeKind`] at the referenced node).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(ScalarValue),
    Node(NodeId),
}

/// A single version of a graph node.
///
/// Nodes are never mutated across transactions: a write either mutates this
/// record in place (same transaction) or mints a new record and chains this
/// one forward via `newer_base_version`/`newer_optimistic_version`.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub kind: NodeKind,
    pub data: IndexMap<FieldStoreName, FieldValue>,
    /// Back-links: `(parent, key under which this node is reachable from it)`.
    pub parents: Vec<(NodeId, FieldStoreName)>,
    /// The store key this node is registered under, if it is normalizable.
    pub store_key: Option<StoreKey>,
    pub transaction_id: TransactionId,
    pub is_optimistic: bool,
    pub newer_base_version: Option<NodeId>,
    pub newer_optimistic_version: Option<NodeId>,
    pub subscribers: HashSet<SubscriberId>,
    pub optimistic_subscribers: HashSet<SubscriberId>,
}

impl NodeRecord {
    pub fn new(kind: NodeKind, transaction_id: TransactionId, is_optimistic: bool) -> Self {
        Self {
            kind,
            data: IndexMap::new(),
            parents: Vec::new(),
            store_key: None,
            transaction_id,
            is_optimistic,
            newer_base_version: None,
            newer_optimistic_version: None,
            subscribers: HashSet::new(),
            optimistic_subscribers: HashSet::new(),
        }
    }

    /// Forward pointer for the chain that a write under `is_optimistic`
    /// would follow.
    pub fn forward(&self, is_optimistic: bool) -> Option<NodeId> {
        if is_optimistic {
            self.newer_optimistic_version
        } else {
            self.newer_base_version
        }
    }

    pub fn set_forward(&mut self, is_optimistic: bool, next: NodeId) {
        if is_optimistic {
            self.newer_optimistic_version = Some(next);
        } else {
            self.newer_base_version = Some(next);
        }
    }
}
