use std::time::Duration;

use vscroll::{ScrollTarget, VirtualScroll, VirtualScrollConfig, VirtualWindow};

fn engine() -> VirtualScroll {
    // Default debounce of 35ms.
    let mut vs = VirtualScroll::new(VirtualScrollConfig::default().with_item_size(20), 100);
    vs.set_viewport(200);
    vs
}

#[tokio::test(start_paused = true)]
async fn test_scroll_waits_for_quiet_period() {
    let mut vs = engine();
    vs.on_scroll(1000);

    assert!(vs.is_pending());
    assert!(!vs.poll());
    assert_eq!(vs.window(), Some(VirtualWindow { from: 0, to: 29 }));

    tokio::time::advance(Duration::from_millis(35)).await;
    assert!(vs.poll());
    assert_eq!(vs.window(), Some(VirtualWindow { from: 40, to: 69 }));
    assert!(!vs.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_burst_applies_last_offset_once() {
    let mut vs = engine();
    vs.drain_events();

    vs.on_scroll(400);
    tokio::time::advance(Duration::from_millis(20)).await;
    vs.on_scroll(600);
    tokio::time::advance(Duration::from_millis(20)).await;
    assert!(!vs.poll());

    tokio::time::advance(Duration::from_millis(15)).await;
    assert!(vs.poll());
    assert_eq!(vs.offset(), 600);
    assert_eq!(vs.drain_events().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_settle_sleeps_until_due() {
    let mut vs = engine();
    assert!(!vs.settle().await);

    vs.on_scroll(1000);
    assert!(vs.settle().await);
    assert_eq!(vs.index(), Some(50));
}

#[tokio::test(start_paused = true)]
async fn test_trigger_immediately_bypasses_debounce() {
    let mut vs = engine();
    vs.on_scroll(1000);
    vs.trigger(true);

    assert!(!vs.is_pending());
    assert_eq!(vs.offset(), 1000);
}

#[tokio::test(start_paused = true)]
async fn test_scroll_to_supersedes_pending_scroll() {
    let mut vs = engine();
    vs.on_scroll(1000);
    vs.scroll_to(10, ScrollTarget::start());

    assert!(!vs.is_pending());
    tokio::time::advance(Duration::from_millis(100)).await;
    assert!(!vs.poll());
    assert_eq!(vs.offset(), 200);
}
