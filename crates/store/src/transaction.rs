use graphcache_types::{SubscriberId, TransactionId};
use std::collections::HashSet;

/// A single logical write. Spans the full recursion of one top-level
/// `write` call; nodes stamped with this id may be mutated in place.
#[derive(Debug)]
pub struct Transaction {
    pub id: TransactionId,
    pub is_optimistic: bool,
    pub subscribers_to_notify: HashSet<SubscriberId>,
}

impl Transaction {
    pub fn new(id: TransactionId, is_optimistic: bool) -> Self {
        Self {
            id,
            is_optimistic,
            subscribers_to_notify: HashSet::new(),
        }
    }
}
