use thiserror::Error;

/// Errors surfaced synchronously at the write/read/subscribe boundaries.
///
/// Message text intentionally matches the prefixes callers are allowed to
/// match on: `"Missing field <name>"`, `"No fragment named <name>"`,
/// `"Cannot subscribe to non-existent node with id <rootId>"`,
/// `"No operation definition found"`, `"List argument serialization not
/// implemented"`, `"Object argument serialization not implemented"`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CacheError {
    /// A selection required a field that is absent from the data tree.
    #[error("Missing field {0}")]
    MissingField(String),

    /// A named fragment spread referenced a fragment not present in the
    /// document's fragment map.
    #[error("No fragment named {0}")]
    NoFragmentNamed(String),

    /// The query document contained no operation definition.
    #[error("No operation definition found in query:\n{0}")]
    NoOperationDefinition(String),

    /// Convenience parsing of a raw query string failed. Not part of the
    /// core contract (parsing a document is an external collaborator's
    /// job) but surfaced for callers that use the adapter's `parse` helper.
    #[error("Failed to parse query: {0}")]
    QueryParseFailed(String),

    /// `observe` was called against a root id with no indexed node.
    #[error("Cannot subscribe to non-existent node with id {0}")]
    SubscribeToMissingNode(String),

    /// A field argument was a list, which this revision cannot serialize
    /// into a canonical store-name suffix.
    #[error("List argument serialization not implemented")]
    ListArgumentUnsupported,

    /// A field argument was an object, which this revision cannot serialize
    /// into a canonical store-name suffix.
    #[error("Object argument serialization not implemented")]
    ObjectArgumentUnsupported,

    /// A field argument referenced a variable not present in the supplied
    /// variables map.
    #[error("Unresolved variable ${0}")]
    UnresolvedVariable(String),

    /// Any attempt to mutate a view: assignment, deletion, property
    /// definition, or extensibility toggling.
    #[error("Cannot mutate a read-only cache view")]
    ViewMutationRejected,

    /// A re-read scheduled for a subscriber found the pinned root gone.
    #[error("node was removed")]
    NodeWasRemoved,
}
