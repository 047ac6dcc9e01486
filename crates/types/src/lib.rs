//! Core value and identity types shared by every layer of the cache.
//!
//! This crate has no knowledge of the query language, the graph, or the
//! store. It only defines the small vocabulary of identifiers and error
//! cases that the AST adapter, node store, write engine, and read engine
//! all need to agree on.

mod error;
mod ids;
mod key;
mod scalar;
mod variables;

pub use error::CacheError;
pub use ids::{NodeId, SubscriberId, TransactionId};
pub use key::{FieldStoreName, StoreKey};
pub use scalar::ScalarValue;
pub use variables::Variables;

/// Default root identifier used when a caller does not supply one.
pub const DEFAULT_ROOT_ID: &str = "QUERY";

/// Which overlay a read or write should be resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Only the committed, non-speculative graph.
    Base,
    /// The optimistic overlay, falling back to the base graph.
    Optimistic,
}

impl Visibility {
    pub fn for_optimistic(is_optimistic: bool) -> Self {
        if is_optimistic {
            Visibility::Optimistic
        } else {
            Visibility::Base
        }
    }

    pub fn is_optimistic(self) -> bool {
        matches!(self, Visibility::Optimistic)
    }
}
