//! Window, scroll target and event types.

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// Inclusive range of item indices that must be materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VirtualWindow {
    /// First index in the window.
    pub from: usize,
    /// Last index in the window (inclusive).
    pub to: usize,
}

impl VirtualWindow {
    /// Number of items in the window.
    pub fn len(&self) -> usize {
        self.to - self.from + 1
    }

    /// A window always holds at least one item.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `index` falls inside the window.
    pub fn contains(&self, index: usize) -> bool {
        (self.from..=self.to).contains(&index)
    }

    /// The window as an inclusive range.
    pub fn range(&self) -> RangeInclusive<usize> {
        self.from..=self.to
    }
}

/// Viewport edge an item is aligned to by `scroll_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    #[default]
    Start,
    Center,
    End,
}

/// Where `scroll_to` should place an item.
///
/// Without `force` the scroll offset is left alone when the item is already
/// fully visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollTarget {
    pub edge: Edge,
    pub force: bool,
}

impl ScrollTarget {
    pub fn start() -> Self {
        Self {
            edge: Edge::Start,
            force: false,
        }
    }

    pub fn center() -> Self {
        Self {
            edge: Edge::Center,
            force: false,
        }
    }

    pub fn end() -> Self {
        Self {
            edge: Edge::End,
            force: false,
        }
    }

    /// Always scroll, even when the item is already visible.
    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }
}

impl From<Edge> for ScrollTarget {
    fn from(edge: Edge) -> Self {
        Self { edge, force: false }
    }
}

impl FromStr for ScrollTarget {
    type Err = Error;

    /// Parses `start`, `center`, `end`, each optionally suffixed with `-force`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (edge, force) = match s.strip_suffix("-force") {
            Some(edge) => (edge, true),
            None => (s, false),
        };
        let edge = match edge {
            "start" => Edge::Start,
            "center" => Edge::Center,
            "end" => Edge::End,
            _ => return Err(Error::UnknownEdge(s.to_string())),
        };
        Ok(Self { edge, force })
    }
}

/// Direction of travel relative to the previous leading index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

/// Emitted whenever a recomputation changes the window or the leading index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VirtualScrollEvent {
    /// Leading index: the first visible item, or the `scroll_to` target.
    pub index: usize,
    /// First index of the new window.
    pub from: usize,
    /// Last index of the new window (inclusive).
    pub to: usize,
    pub direction: Direction,
}
