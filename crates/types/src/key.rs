use std::fmt;

/// Stable identity under which a normalizable entity is stored.
///
/// Derived from incoming data by, in order: an explicit `__id`, else
/// `"<__typename>:<id>"` when both are present. Objects that have neither
/// are not normalizable and live only under their parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey(String);

impl StoreKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StoreKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StoreKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// The canonical key under which a field is stored on its parent node.
///
/// For an argument-free field this is just the field's name. For a field
/// with arguments it is `"<name>(<arg1>: <v1>, ...)"`, so that two reads
/// with different arguments address distinct cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldStoreName(String);

impl FieldStoreName {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The store name for array index `i` within an array node.
    pub fn index(i: usize) -> Self {
        Self(i.to_string())
    }
}

impl fmt::Display for FieldStoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FieldStoreName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FieldStoreName {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
