//! Headless virtual scrolling.
//!
//! `vscroll` computes which slice of a long list has to be rendered for a
//! given scroll position. It knows nothing about tables or widgets: the host
//! feeds it viewport sizes, scroll offsets and measured item sizes, and reads
//! back a [`VirtualWindow`] plus spacer sizes.
//!
//! - [`VirtualScroll`] - the window engine
//! - [`VirtualScrollConfig`] - item size estimate, slack ratios, sticky regions, debounce
//! - [`ItemSizes`] - measured/estimated item sizes with logarithmic lookups
//! - [`Debounce`] - trailing-edge coalescing of scroll bursts

mod config;
mod debounce;
mod engine;
mod error;
mod sizes;
mod window;

pub use config::{MAX_SLICE_RATIO, VirtualScrollConfig};
pub use debounce::Debounce;
pub use engine::VirtualScroll;
pub use error::{Error, Result};
pub use sizes::ItemSizes;
pub use window::{Direction, Edge, ScrollTarget, VirtualScrollEvent, VirtualWindow};
