//! Virtual scroll configuration

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::error::{Error, Result};

/// Largest accepted slice ratio.
pub const MAX_SLICE_RATIO: f32 = 100.0;

/// Configuration for a [`VirtualScroll`](crate::VirtualScroll).
///
/// Sizes are in pixels (or terminal rows; the engine does not care about the
/// unit as long as it is used consistently).
///
/// # Example
///
/// ```
/// use vscroll::VirtualScrollConfig;
///
/// let config = VirtualScrollConfig::default()
///     .with_item_size(48)
///     .with_slice_ratios(1.5, 2.0)
///     .with_sticky_sizes(32, 0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualScrollConfig {
    /// Estimated size of one item, used until real sizes are measured.
    ///
    /// Default: 24
    pub item_size: u32,

    /// Minimum number of items in the render window.
    ///
    /// Default: 10
    pub slice_size: usize,

    /// Slack before the viewport, as a multiple of the items that fit it.
    /// At most [`MAX_SLICE_RATIO`].
    ///
    /// Default: 1.0
    pub slice_ratio_before: f32,

    /// Slack after the viewport, as a multiple of the items that fit it.
    /// At most [`MAX_SLICE_RATIO`].
    ///
    /// Default: 1.0
    pub slice_ratio_after: f32,

    /// Size of a sticky region (e.g. a header) at the start of the scroll
    /// container. Excluded from the item area.
    ///
    /// Default: 0
    pub sticky_size_start: u32,

    /// Size of a sticky region (e.g. a footer) at the end of the scroll
    /// container. Excluded from the item area.
    ///
    /// Default: 0
    pub sticky_size_end: u32,

    /// Delay used to coalesce scroll events, in milliseconds.
    ///
    /// Default: 35
    pub debounce_ms: u64,
}

impl Default for VirtualScrollConfig {
    fn default() -> Self {
        Self {
            item_size: 24,
            slice_size: 10,
            slice_ratio_before: 1.0,
            slice_ratio_after: 1.0,
            sticky_size_start: 0,
            sticky_size_end: 0,
            debounce_ms: 35,
        }
    }
}

impl VirtualScrollConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the estimated item size.
    pub fn with_item_size(mut self, size: u32) -> Self {
        self.item_size = size;
        self
    }

    /// Sets the minimum window size.
    pub fn with_slice_size(mut self, size: usize) -> Self {
        self.slice_size = size;
        self
    }

    /// Sets the slack ratios before and after the viewport.
    pub fn with_slice_ratios(mut self, before: f32, after: f32) -> Self {
        self.slice_ratio_before = before;
        self.slice_ratio_after = after;
        self
    }

    /// Sets the sticky start/end region sizes.
    pub fn with_sticky_sizes(mut self, start: u32, end: u32) -> Self {
        self.sticky_size_start = start;
        self.sticky_size_end = end;
        self
    }

    /// Sets the scroll debounce delay.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Scroll debounce delay.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Checks that every field holds a usable value.
    pub fn validate(&self) -> Result<()> {
        if self.item_size == 0 {
            return Err(Error::InvalidConfig {
                field: "item_size",
                reason: "must be greater than zero".into(),
            });
        }
        if self.slice_size == 0 {
            return Err(Error::InvalidConfig {
                field: "slice_size",
                reason: "must be greater than zero".into(),
            });
        }
        for (field, ratio) in [
            ("slice_ratio_before", self.slice_ratio_before),
            ("slice_ratio_after", self.slice_ratio_after),
        ] {
            if !ratio.is_finite() || !(0.0..=MAX_SLICE_RATIO).contains(&ratio) {
                return Err(Error::InvalidConfig {
                    field,
                    reason: format!("must be between 0 and {}, got {}", MAX_SLICE_RATIO, ratio),
                });
            }
        }
        Ok(())
    }

    /// Returns a copy with every invalid field replaced by a usable value.
    pub(crate) fn sanitized(&self) -> Self {
        let ratio = |r: f32| {
            if r.is_finite() && r >= 0.0 {
                r.min(MAX_SLICE_RATIO)
            } else {
                0.0
            }
        };
        Self {
            item_size: self.item_size.max(1),
            slice_size: self.slice_size.max(1),
            slice_ratio_before: ratio(self.slice_ratio_before),
            slice_ratio_after: ratio(self.slice_ratio_after),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(VirtualScrollConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_item_size_rejected() {
        let err = VirtualScrollConfig::default()
            .with_item_size(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "item_size", .. }));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: VirtualScrollConfig =
            serde_json::from_str(r#"{"item_size": 48, "sticky_size_start": 32}"#).unwrap();
        assert_eq!(config.item_size, 48);
        assert_eq!(config.sticky_size_start, 32);
        assert_eq!(config.debounce_ms, 35);
    }

    #[test]
    fn test_negative_ratio_sanitized() {
        let config = VirtualScrollConfig::default().with_slice_ratios(-1.0, f32::NAN);
        assert!(config.validate().is_err());
        let clean = config.sanitized();
        assert_eq!(clean.slice_ratio_before, 0.0);
        assert_eq!(clean.slice_ratio_after, 0.0);
        assert!(clean.validate().is_ok());
    }

    #[test]
    fn test_huge_ratio_capped() {
        let config = VirtualScrollConfig::default().with_slice_ratios(0.0, 1e30);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "slice_ratio_after", .. }));

        let clean = config.sanitized();
        assert_eq!(clean.slice_ratio_after, MAX_SLICE_RATIO);
        assert!(clean.validate().is_ok());
        assert!(
            VirtualScrollConfig::default()
                .with_slice_ratios(MAX_SLICE_RATIO, 0.0)
                .validate()
                .is_ok()
        );
    }
}
