use graphcache_ast::Document;
use graphcache_types::{CacheError, NodeId, SubscriberId, Variables};

/// Identifies one live subscription so a caller can later unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub(crate) SubscriberId);

/// Everything needed to re-read a subscription's query when it is notified:
/// the pinned node (so unsubscribing removes it from the right bucket), and
/// the document/variables/root needed to shape a fresh read.
pub struct SubscriptionRecord {
    pub node: NodeId,
    pub is_optimistic: bool,
    pub document: Document,
    pub variables: Variables,
    pub root_id: String,
    pub callback: Box<dyn FnMut(Result<serde_json::Value, CacheError>)>,
}
