use crate::ScalarValue;
use std::collections::HashMap;

/// Variable bindings supplied alongside a query for a read, write, or
/// subscribe call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables(HashMap<String, ScalarValue>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ScalarValue> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ScalarValue) -> &mut Self {
        self.0.insert(name.into(), value);
        self
    }
}

impl From<HashMap<String, ScalarValue>> for Variables {
    fn from(map: HashMap<String, ScalarValue>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, ScalarValue)> for Variables {
    fn from_iter<T: IntoIterator<Item = (String, ScalarValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
