use graphcache_types::CacheError;

/// A handle over a grouped optimistic write, returned by [`crate::Cache::tx`].
///
/// Optimistic writes are isolated to the optimistic overlay by construction
/// — nothing a `tx` does is ever visible to a base read — so committing and
/// rolling back are both no-ops today, kept around for symmetry with a
/// future batching story rather than for any effect they currently have.
pub struct TxHandle {
    _private: (),
}

impl TxHandle {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }

    pub fn commit(self) -> Result<(), CacheError> {
        Ok(())
    }

    pub fn rollback(self) -> Result<(), CacheError> {
        Ok(())
    }
}
