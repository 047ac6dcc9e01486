//! The node-indexed graph store.
//!
//! Holds every node version ever written, the base and optimistic indices
//! that map stable identities to current heads, and the subscriber buckets
//! attached to each node. Normalization, selection walking and view
//! projection live in the crates built on top of this one; this crate only
//! knows about nodes, keys and versions.

mod node;
mod store;
mod transaction;

pub use node::{FieldValue, NodeKind, NodeRecord};
pub use store::NodeStore;
pub use transaction::Transaction;

#[cfg(test)]
mod tests {
    use super::*;
    use graphcache_types::{FieldStoreName, NodeId, ScalarValue, StoreKey, Visibility};

    fn scalar(v: serde_json::Value) -> FieldValue {
        FieldValue::Scalar(v as ScalarValue)
    }

    #[test]
    fn in_place_mutation_within_one_transaction_reuses_the_node_id() {
        let mut store = NodeStore::new();
        let mut tx = store.begin_transaction(false);
        let node = store.new_node(&tx, NodeKind::Object);

        let name_key = FieldStoreName::new("name");
        let after_first = store.set(node, name_key.clone(), scalar(serde_json::json!("Alice")), &mut tx);
        assert_eq!(after_first, node);

        let after_second = store.set(node, name_key.clone(), scalar(serde_json::json!("Bob")), &mut tx);
        assert_eq!(after_second, node, "same transaction should mutate in place");
        assert_eq!(
            store.get(node, &name_key),
            Some(&scalar(serde_json::json!("Bob")))
        );
    }

    #[test]
    fn a_later_transaction_mints_a_new_version_and_chains_forward() {
        let mut store = NodeStore::new();
        let mut tx1 = store.begin_transaction(false);
        let node = store.new_node(&tx1, NodeKind::Object);
        let name_key = FieldStoreName::new("name");
        store.set(node, name_key.clone(), scalar(serde_json::json!("Alice")), &mut tx1);

        let mut tx2 = store.begin_transaction(false);
        let updated = store.set(node, name_key.clone(), scalar(serde_json::json!("Carol")), &mut tx2);

        assert_ne!(updated, node, "a second transaction must not reuse the old id");
        assert_eq!(store.head(node, false), updated);
        assert_eq!(
            store.get(updated, &name_key),
            Some(&scalar(serde_json::json!("Carol")))
        );
        assert_eq!(
            store.get(node, &name_key),
            Some(&scalar(serde_json::json!("Alice"))),
            "the old version keeps its original value"
        );
    }

    #[test]
    fn writing_the_same_value_again_is_a_referential_no_op() {
        let mut store = NodeStore::new();
        let mut tx1 = store.begin_transaction(false);
        let node = store.new_node(&tx1, NodeKind::Object);
        let name_key = FieldStoreName::new("name");
        store.set(node, name_key.clone(), scalar(serde_json::json!("Alice")), &mut tx1);

        let mut tx2 = store.begin_transaction(false);
        let result = store.set(node, name_key.clone(), scalar(serde_json::json!("Alice")), &mut tx2);
        assert_eq!(result, node, "identical value should short-circuit without a new version");
    }

    #[test]
    fn a_write_to_a_child_propagates_a_new_version_up_to_the_parent() {
        let mut store = NodeStore::new();
        let mut tx1 = store.begin_transaction(false);
        let parent = store.new_node(&tx1, NodeKind::Object);
        let child = store.new_node(&tx1, NodeKind::Object);
        let child_key = FieldStoreName::new("author");
        store.set(parent, child_key.clone(), FieldValue::Node(child), &mut tx1);
        store.add_parent(child, parent, child_key.clone());

        let mut tx2 = store.begin_transaction(false);
        let name_key = FieldStoreName::new("name");
        let new_child = store.set(child, name_key.clone(), scalar(serde_json::json!("Dave")), &mut tx2);

        assert_ne!(new_child, child);
        let new_parent = store.head(parent, false);
        assert_ne!(new_parent, parent, "parent must also get a new version");
        assert_eq!(store.get(new_parent, &child_key), Some(&FieldValue::Node(new_child)));
    }

    #[test]
    fn optimistic_writes_are_isolated_from_the_base_index() {
        let mut store = NodeStore::new();
        let mut base_tx = store.begin_transaction(false);
        let node = store.new_node(&base_tx, NodeKind::Object);
        let key = StoreKey::new("Stack:1");
        store.register_key(key.clone(), node, &base_tx);
        let name_key = FieldStoreName::new("name");
        store.set(node, name_key.clone(), scalar(serde_json::json!("base")), &mut base_tx);

        let mut opt_tx = store.begin_transaction(true);
        let base_head = store.get_by_key(&key, Visibility::Base).unwrap();
        store.set(base_head, name_key.clone(), scalar(serde_json::json!("optimistic")), &mut opt_tx);

        let base_view = store.get_by_key(&key, Visibility::Base).unwrap();
        let optimistic_view = store.get_by_key(&key, Visibility::Optimistic).unwrap();
        assert_ne!(base_view, optimistic_view);
        assert_eq!(
            store.get(base_view, &name_key),
            Some(&scalar(serde_json::json!("base")))
        );
        assert_eq!(
            store.get(optimistic_view, &name_key),
            Some(&scalar(serde_json::json!("optimistic")))
        );
    }

    #[test]
    fn optimistic_reads_fall_back_to_base_when_no_optimistic_overlay_exists() {
        let mut store = NodeStore::new();
        let mut tx = store.begin_transaction(false);
        let node = store.new_node(&tx, NodeKind::Object);
        let key = StoreKey::new("Stack:2");
        store.register_key(key.clone(), node, &tx);
        let name_key = FieldStoreName::new("name");
        store.set(node, name_key, scalar(serde_json::json!("only base")), &mut tx);

        let base_view = store.get_by_key(&key, Visibility::Base).unwrap();
        let optimistic_view = store.get_by_key(&key, Visibility::Optimistic).unwrap();
        assert_eq!(base_view, optimistic_view);
    }

    #[test]
    fn a_base_subscriber_is_queued_for_non_optimistic_writes_only() {
        let mut store = NodeStore::new();
        let mut tx1 = store.begin_transaction(false);
        let node = store.new_node(&tx1, NodeKind::Object);
        let sub = store.next_subscriber_id();
        store.subscribe(node, sub, false);

        let mut opt_tx = store.begin_transaction(true);
        let key = FieldStoreName::new("name");
        store.set(node, key.clone(), scalar(serde_json::json!("optimistic")), &mut opt_tx);
        assert!(
            !opt_tx.subscribers_to_notify.contains(&sub),
            "base subscribers must not fire on optimistic writes"
        );

        let mut base_tx = store.begin_transaction(false);
        store.set(node, key, scalar(serde_json::json!("settled")), &mut base_tx);
        assert!(base_tx.subscribers_to_notify.contains(&sub));
        let _ = tx1;
    }

    #[test]
    fn an_optimistic_subscriber_is_queued_for_every_write() {
        let mut store = NodeStore::new();
        let mut tx1 = store.begin_transaction(false);
        let node = store.new_node(&tx1, NodeKind::Object);
        let sub = store.next_subscriber_id();
        store.subscribe(node, sub, true);

        let mut opt_tx = store.begin_transaction(true);
        let key = FieldStoreName::new("name");
        store.set(node, key.clone(), scalar(serde_json::json!("optimistic")), &mut opt_tx);
        assert!(opt_tx.subscribers_to_notify.contains(&sub));

        let mut base_tx = store.begin_transaction(false);
        store.set(node, key, scalar(serde_json::json!("settled")), &mut base_tx);
        assert!(base_tx.subscribers_to_notify.contains(&sub));
        let _ = tx1;
    }

    #[test]
    fn unsubscribe_removes_only_from_the_pinned_node_bucket() {
        let mut store = NodeStore::new();
        let tx = store.begin_transaction(false);
        let node = store.new_node(&tx, NodeKind::Object);
        let sub = store.next_subscriber_id();
        store.subscribe(node, sub, false);
        store.unsubscribe(node, sub, false);
        assert!(!store.record(node).subscribers.contains(&sub));
    }

    #[test]
    fn resolving_an_unknown_root_returns_none() {
        let store = NodeStore::new();
        assert!(store.resolve_root("QUERY", Visibility::Base).is_none());
    }
}
