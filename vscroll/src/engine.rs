//! The virtual scroll engine.

use crate::config::VirtualScrollConfig;
use crate::debounce::Debounce;
use crate::sizes::ItemSizes;
use crate::window::{Direction, Edge, ScrollTarget, VirtualScrollEvent, VirtualWindow};

/// Maps a scroll offset to the window of items that must be rendered.
///
/// The engine is headless: the host reports the viewport size, scroll
/// offsets and (optionally) measured item sizes, and reads back the window
/// plus the padding to place before and after the rendered items.
///
/// Offsets are expressed in the coordinates of the scroll container. The
/// sticky start region sits before the first item, so offset 0 shows item 0
/// directly below it.
///
/// # Example
///
/// ```
/// use vscroll::{VirtualScroll, VirtualScrollConfig};
///
/// let mut vs = VirtualScroll::new(VirtualScrollConfig::default().with_item_size(20), 1_000);
/// vs.set_viewport(200);
/// vs.trigger(true);
///
/// let window = vs.window().unwrap();
/// assert_eq!(window.from, 0);
/// assert!(window.to >= 9);
/// ```
#[derive(Debug, Clone)]
pub struct VirtualScroll {
    config: VirtualScrollConfig,
    sizes: ItemSizes,
    viewport: u32,
    /// Offset the current window was computed for.
    offset: u32,
    window: Option<VirtualWindow>,
    /// Leading index of the last recomputation.
    index: Option<usize>,
    pending: Debounce<u32>,
    events: Vec<VirtualScrollEvent>,
}

impl VirtualScroll {
    /// Create an engine for `len` items.
    ///
    /// An invalid config is logged and replaced by sanitized values.
    pub fn new(config: VirtualScrollConfig, len: usize) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{}; using sanitized values", err);
                config.sanitized()
            }
        };

        let mut engine = Self {
            sizes: ItemSizes::new(len, config.item_size),
            pending: Debounce::new(config.debounce()),
            config,
            viewport: 0,
            offset: 0,
            window: None,
            index: None,
            events: Vec::new(),
        };
        engine.apply(0, None);
        engine
    }

    pub fn config(&self) -> &VirtualScrollConfig {
        &self.config
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Change the item count. Measured sizes of surviving items are kept.
    pub fn set_len(&mut self, len: usize) {
        if len == self.sizes.len() {
            return;
        }
        log::trace!("virtual scroll: item count {} -> {}", self.sizes.len(), len);
        self.sizes.resize(len);
        self.apply(self.offset, None);
    }

    /// Viewport size of the scroll container, sticky regions included.
    pub fn viewport(&self) -> u32 {
        self.viewport
    }

    /// Report the viewport size.
    pub fn set_viewport(&mut self, size: u32) {
        if size == self.viewport {
            return;
        }
        self.viewport = size;
        self.apply(self.offset, None);
    }

    /// Part of the viewport available to items.
    pub fn view_size(&self) -> u32 {
        self.viewport
            .saturating_sub(self.config.sticky_size_start)
            .saturating_sub(self.config.sticky_size_end)
    }

    /// Scroll offset the current window was computed for.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Total scrollable size: sticky regions plus all items.
    pub fn content_size(&self) -> u64 {
        u64::from(self.config.sticky_size_start)
            + self.sizes.total()
            + u64::from(self.config.sticky_size_end)
    }

    /// Largest valid scroll offset.
    pub fn max_offset(&self) -> u32 {
        let max = self.content_size().saturating_sub(u64::from(self.viewport));
        u32::try_from(max).unwrap_or(u32::MAX)
    }

    /// The current window, `None` when there are no items.
    pub fn window(&self) -> Option<VirtualWindow> {
        self.window
    }

    /// Leading index of the last recomputation.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Size of the items before the window (spacer above rendered items).
    pub fn padding_before(&self) -> u64 {
        self.window
            .map(|w| self.sizes.offset_of(w.from))
            .unwrap_or(0)
    }

    /// Size of the items after the window (spacer below rendered items).
    pub fn padding_after(&self) -> u64 {
        self.window
            .map(|w| self.sizes.total() - self.sizes.offset_of(w.to + 1))
            .unwrap_or(0)
    }

    /// Offset of an item relative to the first item.
    pub fn item_offset(&self, index: usize) -> u64 {
        self.sizes.offset_of(index)
    }

    /// Current size of an item (measured or estimated).
    pub fn item_size(&self, index: usize) -> u32 {
        self.sizes.get(index)
    }

    /// Record the measured size of one item.
    ///
    /// The window is not recomputed until the next scroll or `refresh`.
    pub fn set_item_size(&mut self, index: usize, size: u32) {
        self.sizes.set(index, size);
    }

    /// Record measured sizes for consecutive items starting at `from`.
    pub fn measure(&mut self, from: usize, sizes: &[u32]) {
        for (i, &size) in sizes.iter().enumerate() {
            self.sizes.set(from + i, size);
        }
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    /// Report a scroll position from the host container.
    ///
    /// The window is recomputed once the debounce delay has passed without a
    /// newer offset; until then the previous window stays authoritative.
    pub fn on_scroll(&mut self, offset: u32) {
        if self.pending.delay().is_zero() {
            self.apply(offset, None);
        } else {
            self.pending.schedule(offset);
        }
    }

    /// Whether a debounced scroll is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Apply the pending scroll if its debounce delay has elapsed.
    ///
    /// Returns `true` if a recomputation happened.
    pub fn poll(&mut self) -> bool {
        match self.pending.take_due() {
            Some(offset) => {
                self.apply(offset, None);
                true
            }
            None => false,
        }
    }

    /// Wait for the pending scroll to become due and apply it.
    ///
    /// Returns `false` immediately when nothing is pending.
    pub async fn settle(&mut self) -> bool {
        match self.pending.wait().await {
            Some(offset) => {
                self.apply(offset, None);
                true
            }
            None => false,
        }
    }

    /// Request a recomputation at the latest known offset.
    ///
    /// `immediately` bypasses the debounce.
    pub fn trigger(&mut self, immediately: bool) {
        let offset = self.pending.flush().unwrap_or(self.offset);
        if immediately || self.pending.delay().is_zero() {
            self.apply(offset, None);
        } else {
            self.pending.schedule(offset);
        }
    }

    /// Scroll so that `index` sits at the requested edge of the viewport.
    ///
    /// The index is clamped into the item range. Any pending debounced
    /// scroll is superseded. Returns the new offset.
    pub fn scroll_to(&mut self, index: usize, target: ScrollTarget) -> u32 {
        let len = self.sizes.len();
        if len == 0 {
            return self.offset;
        }
        let index = index.min(len - 1);

        self.pending.cancel();
        let offset = self.offset_for(index, target);
        self.apply(offset, Some(index));
        self.offset
    }

    /// Like [`scroll_to`](Self::scroll_to), picking the edge from the
    /// direction of travel: moving forward aligns to the end, moving back
    /// aligns to the start.
    pub fn scroll_into_view(&mut self, index: usize) -> u32 {
        let target = match self.index {
            Some(prev) if index > prev => ScrollTarget::end(),
            _ => ScrollTarget::start(),
        };
        self.scroll_to(index, target)
    }

    /// Recompute the window, keeping measured sizes.
    ///
    /// With an index, the view is re-anchored so that item starts the
    /// viewport.
    pub fn refresh(&mut self, index: Option<usize>) {
        self.pending.cancel();
        match index {
            Some(index) => {
                self.scroll_to(index, ScrollTarget::start().forced());
            }
            None => self.apply(self.offset, None),
        }
    }

    /// Discard measured sizes and return to the top of the list.
    pub fn reset(&mut self) {
        self.pending.cancel();
        self.sizes.reset();
        self.index = None;
        self.apply(0, None);
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<VirtualScrollEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn offset_for(&self, index: usize, target: ScrollTarget) -> u32 {
        let view = u64::from(self.view_size());
        let start = self.sizes.offset_of(index);
        let size = u64::from(self.sizes.get(index));
        let end = start + size;
        let current = u64::from(self.offset);

        let visible = start >= current && end <= current + view;
        let offset = if visible && !target.force {
            current
        } else {
            match target.edge {
                Edge::Start => start,
                Edge::End => end.saturating_sub(view),
                Edge::Center => start.saturating_sub(view.saturating_sub(size).div_ceil(2)),
            }
        };
        u32::try_from(offset).unwrap_or(u32::MAX)
    }

    /// First visible item and the window for a scroll offset.
    fn window_at(&self, offset: u32) -> Option<(usize, VirtualWindow)> {
        let len = self.sizes.len();
        if len == 0 {
            return None;
        }

        let view = self.view_size();
        let offset = u64::from(offset);
        let first = self.sizes.index_at(offset);
        let last = if view == 0 {
            first
        } else {
            self.sizes.index_at(offset + u64::from(view) - 1)
        };

        // Items fitting the viewport: whatever is visible right now, but at
        // least what the estimate predicts so unmeasured lists get slack too.
        let estimated = view.div_ceil(self.config.item_size) as usize;
        let base = (last - first + 1).max(estimated).max(1) as f32;

        // Float casts saturate; both counts are capped at the list length.
        let before = ((base * self.config.slice_ratio_before).ceil() as usize).min(len);
        let multiplier = 1.0 + self.config.slice_ratio_before + self.config.slice_ratio_after;
        let total = ((base * multiplier).ceil() as usize)
            .max(self.config.slice_size)
            .max(last - first + 1)
            .min(len);

        let mut from = first.saturating_sub(before);
        let mut to = from.saturating_add(total);
        if to > len {
            to = len;
            from = len.saturating_sub(total);
        }

        Some((first, VirtualWindow { from, to: to - 1 }))
    }

    fn apply(&mut self, offset: u32, leading: Option<usize>) {
        self.offset = offset.min(self.max_offset());

        let Some((first, window)) = self.window_at(self.offset) else {
            self.window = None;
            self.index = None;
            return;
        };
        let index = leading.unwrap_or(first);

        if self.window != Some(window) || self.index != Some(index) {
            let direction = match self.index {
                Some(prev) if index < prev => Direction::Decrease,
                _ => Direction::Increase,
            };
            log::trace!(
                "virtual scroll: index {} window {}..={} ({:?})",
                index,
                window.from,
                window.to,
                direction
            );
            self.events.push(VirtualScrollEvent {
                index,
                from: window.from,
                to: window.to,
                direction,
            });
        }

        self.window = Some(window);
        self.index = Some(index);
    }
}
