//! Expanded-row tracking.

use std::collections::HashSet;

use crate::key::RowKey;

/// Keys of the rows whose detail area is open. Independent of selection.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    keys: Vec<RowKey>,
    index: HashSet<RowKey>,
}

impl Expansion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.index.contains(key)
    }

    /// Expanded keys in the order they were opened.
    pub fn keys(&self) -> &[RowKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Flip one row. Returns whether it is expanded now.
    pub fn toggle(&mut self, key: RowKey) -> bool {
        if self.index.remove(&key) {
            self.keys.retain(|k| *k != key);
            false
        } else {
            self.index.insert(key.clone());
            self.keys.push(key);
            true
        }
    }

    /// Make `keys` the expanded set. Returns `false` when nothing changed.
    pub fn set(&mut self, keys: impl IntoIterator<Item = RowKey>) -> bool {
        let mut next = Vec::new();
        let mut index = HashSet::new();
        for key in keys {
            if index.insert(key.clone()) {
                next.push(key);
            }
        }
        if index == self.index {
            return false;
        }
        self.keys = next;
        self.index = index;
        true
    }
}
