//! Row selection tracking.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::key::RowKey;

/// How many rows may be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Selection disabled.
    #[default]
    None,
    /// At most one row.
    Single,
    /// Any number of rows.
    Multiple,
}

/// Keys removed from and added to a selection by one mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDelta {
    pub removed: Vec<RowKey>,
    pub added: Vec<RowKey>,
}

impl SelectionDelta {
    /// Whether the mutation changed nothing.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Set of selected row keys, kept in selection order.
///
/// In `Single` mode selecting a key replaces the previous one in one step:
/// the delta reports both the removal and the addition, and there is never an
/// intermediate state holding two keys.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    mode: SelectionMode,
    keys: Vec<RowKey>,
    index: HashSet<RowKey>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            keys: Vec::new(),
            index: HashSet::new(),
        }
    }

    pub fn none() -> Self {
        Self::new(SelectionMode::None)
    }

    pub fn single() -> Self {
        Self::new(SelectionMode::Single)
    }

    pub fn multiple() -> Self {
        Self::new(SelectionMode::Multiple)
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the mode, dropping keys the new mode cannot hold.
    pub fn set_mode(&mut self, mode: SelectionMode) -> SelectionDelta {
        self.mode = mode;
        match mode {
            SelectionMode::None => self.clear_keys(),
            SelectionMode::Single if self.keys.len() > 1 => {
                let keep = self.keys.len() - 1;
                let removed: Vec<RowKey> = self.keys.drain(..keep).collect();
                for key in &removed {
                    self.index.remove(key);
                }
                SelectionDelta {
                    removed,
                    added: Vec::new(),
                }
            }
            _ => SelectionDelta::default(),
        }
    }

    /// Selected keys in selection order.
    pub fn keys(&self) -> &[RowKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.index.contains(key)
    }

    /// Select `key` if unselected, deselect it otherwise.
    pub fn toggle(&mut self, key: RowKey) -> SelectionDelta {
        if self.is_selected(&key) {
            self.deselect(&key)
        } else {
            self.select(key)
        }
    }

    /// Like [`toggle`](Self::toggle), but reports disabled selection.
    pub fn try_toggle(&mut self, key: RowKey) -> Result<SelectionDelta> {
        if self.mode == SelectionMode::None {
            return Err(Error::SelectionDisabled);
        }
        Ok(self.toggle(key))
    }

    /// Add `key`. In `Single` mode the previous key is replaced.
    pub fn select(&mut self, key: RowKey) -> SelectionDelta {
        match self.mode {
            SelectionMode::None => SelectionDelta::default(),
            _ if self.is_selected(&key) => SelectionDelta::default(),
            SelectionMode::Single => {
                let removed = std::mem::take(&mut self.keys);
                self.index.clear();
                self.insert(key.clone());
                SelectionDelta {
                    removed,
                    added: vec![key],
                }
            }
            SelectionMode::Multiple => {
                self.insert(key.clone());
                SelectionDelta {
                    removed: Vec::new(),
                    added: vec![key],
                }
            }
        }
    }

    /// Remove `key`.
    pub fn deselect(&mut self, key: &RowKey) -> SelectionDelta {
        if !self.index.remove(key) {
            return SelectionDelta::default();
        }
        self.keys.retain(|k| k != key);
        SelectionDelta {
            removed: vec![key.clone()],
            added: Vec::new(),
        }
    }

    /// Add several keys. In `Single` mode only the last one stays selected.
    pub fn select_many(&mut self, keys: impl IntoIterator<Item = RowKey>) -> SelectionDelta {
        match self.mode {
            SelectionMode::None => SelectionDelta::default(),
            SelectionMode::Single => match keys.into_iter().last() {
                Some(key) => self.select(key),
                None => SelectionDelta::default(),
            },
            SelectionMode::Multiple => {
                let mut added = Vec::new();
                for key in keys {
                    if self.insert(key.clone()) {
                        added.push(key);
                    }
                }
                SelectionDelta {
                    removed: Vec::new(),
                    added,
                }
            }
        }
    }

    /// Remove several keys.
    pub fn deselect_many<'a>(&mut self, keys: impl IntoIterator<Item = &'a RowKey>) -> SelectionDelta {
        let mut removed = Vec::new();
        for key in keys {
            if self.index.remove(key) {
                removed.push(key.clone());
            }
        }
        if !removed.is_empty() {
            self.keys.retain(|k| !removed.contains(k));
        }
        SelectionDelta {
            removed,
            added: Vec::new(),
        }
    }

    /// Make `keys` the whole selection.
    pub fn replace(&mut self, keys: impl IntoIterator<Item = RowKey>) -> SelectionDelta {
        let mut wanted: Vec<RowKey> = Vec::new();
        let mut seen = HashSet::new();
        for key in keys {
            if seen.insert(key.clone()) {
                wanted.push(key);
            }
        }
        match self.mode {
            SelectionMode::None => return SelectionDelta::default(),
            SelectionMode::Single => {
                let last = wanted.pop();
                wanted = last.into_iter().collect();
                seen = wanted.iter().cloned().collect();
            }
            SelectionMode::Multiple => {}
        }

        let removed: Vec<RowKey> = self
            .keys
            .iter()
            .filter(|k| !seen.contains(*k))
            .cloned()
            .collect();
        let added: Vec<RowKey> = wanted
            .iter()
            .filter(|k| !self.index.contains(*k))
            .cloned()
            .collect();

        self.keys = wanted;
        self.index = seen;
        SelectionDelta { removed, added }
    }

    /// Deselect everything.
    pub fn clear(&mut self) -> SelectionDelta {
        self.clear_keys()
    }

    fn clear_keys(&mut self) -> SelectionDelta {
        self.index.clear();
        SelectionDelta {
            removed: std::mem::take(&mut self.keys),
            added: Vec::new(),
        }
    }

    fn insert(&mut self, key: RowKey) -> bool {
        if self.index.insert(key.clone()) {
            self.keys.push(key);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> RowKey {
        RowKey::from(s)
    }

    #[test]
    fn test_none_mode_ignores_mutations() {
        let mut selection = Selection::none();
        assert!(selection.toggle(key("a")).is_empty());
        assert!(selection.select_many([key("a"), key("b")]).is_empty());
        assert!(!selection.is_selected(&key("a")));
        assert_eq!(selection.try_toggle(key("a")), Err(Error::SelectionDisabled));
    }

    #[test]
    fn test_single_replaces() {
        let mut selection = Selection::single();
        selection.select(key("a"));
        let delta = selection.select(key("b"));
        assert_eq!(delta.removed, vec![key("a")]);
        assert_eq!(delta.added, vec![key("b")]);
        assert_eq!(selection.keys(), &[key("b")]);
    }

    #[test]
    fn test_single_toggle_off() {
        let mut selection = Selection::single();
        selection.toggle(key("a"));
        let delta = selection.toggle(key("a"));
        assert_eq!(delta.removed, vec![key("a")]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_multiple_keeps_order() {
        let mut selection = Selection::multiple();
        selection.toggle(key("c"));
        selection.toggle(key("a"));
        selection.toggle(key("b"));
        selection.toggle(key("a"));
        assert_eq!(selection.keys(), &[key("c"), key("b")]);
    }

    #[test]
    fn test_replace_reports_difference() {
        let mut selection = Selection::multiple();
        selection.select_many([key("a"), key("b")]);
        let delta = selection.replace([key("b"), key("c"), key("c")]);
        assert_eq!(delta.removed, vec![key("a")]);
        assert_eq!(delta.added, vec![key("c")]);
        assert_eq!(selection.keys(), &[key("b"), key("c")]);
    }

    #[test]
    fn test_switch_to_single_keeps_last() {
        let mut selection = Selection::multiple();
        selection.select_many([key("a"), key("b"), key("c")]);
        let delta = selection.set_mode(SelectionMode::Single);
        assert_eq!(delta.removed, vec![key("a"), key("b")]);
        assert_eq!(selection.keys(), &[key("c")]);
    }
}
