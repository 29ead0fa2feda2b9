//! Trailing-edge debounce for coalescing bursts of updates.

use std::time::Duration;

use tokio::time::Instant;

/// Holds the newest value of a burst until the burst has been quiet for
/// `delay`.
///
/// Every [`schedule`](Debounce::schedule) replaces the pending value and
/// restarts the delay (last write wins). Nothing runs in the background: the
/// owner asks for the value with [`take_due`](Debounce::take_due) or waits for
/// it with [`wait`](Debounce::wait).
///
/// Uses `tokio::time::Instant`, so paused tokio time drives it in tests.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debounce<T> {
    /// Create a debounce with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the quiet period.
    pub fn schedule(&mut self, value: T) {
        self.pending = Some((Instant::now() + self.delay, value));
    }

    /// Whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Take the pending value if its quiet period has elapsed.
    pub fn take_due(&mut self) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= Instant::now() => {
                self.pending.take().map(|(_, value)| value)
            }
            _ => None,
        }
    }

    /// Take the pending value regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Sleep until the pending value is due and take it.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn wait(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(deadline).await;
        self.take_due()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_last_write_wins() {
        let mut debounce = Debounce::new(Duration::from_millis(30));
        debounce.schedule(1);
        tokio::time::advance(Duration::from_millis(20)).await;
        debounce.schedule(2);
        tokio::time::advance(Duration::from_millis(20)).await;
        assert_eq!(debounce.take_due(), None);
        tokio::time::advance(Duration::from_millis(10)).await;
        assert_eq!(debounce.take_due(), Some(2));
        assert!(!debounce.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait() {
        let mut debounce = Debounce::new(Duration::from_millis(30));
        assert_eq!(debounce.wait().await, None);
        debounce.schedule("a");
        assert_eq!(debounce.wait().await, Some("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_and_cancel() {
        let mut debounce = Debounce::new(Duration::from_millis(30));
        debounce.schedule(7);
        assert_eq!(debounce.flush(), Some(7));
        debounce.schedule(8);
        debounce.cancel();
        assert_eq!(debounce.flush(), None);
    }
}
