//! Single-slot broadcast cell
//!
//! Holds only the most recently published value. Publishing overwrites the
//! slot and wakes every subscriber; a subscriber that falls behind skips
//! straight to the newest value instead of replaying what it missed.

use tokio::sync::watch;

/// Latest-value cell with any number of subscribers
#[derive(Debug)]
pub struct LatestValue<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T> LatestValue<T>
where
    T: Clone + Send + Sync,
{
    /// Empty cell; subscribers wait until the first publish
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the current value and notify all subscribers.
    ///
    /// Never blocks and succeeds even with zero subscribers.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    /// Most recently published value, if any
    pub fn latest(&self) -> Option<T> {
        self.tx.borrow().clone()
    }

    /// Subscribe; the first `recv` yields the current value if one exists
    pub fn subscribe(&self) -> Subscription<T> {
        let mut rx = self.tx.subscribe();
        if rx.borrow().is_some() {
            rx.mark_changed();
        }
        Subscription { rx }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T> Default for LatestValue<T>
where
    T: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half of a [`LatestValue`]
#[derive(Debug)]
pub struct Subscription<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T> Subscription<T>
where
    T: Clone,
{
    /// Wait for a value this subscription has not seen yet.
    ///
    /// Returns `None` once the cell has been dropped and everything
    /// published before that has been observed.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(value) = self.rx.borrow_and_update().clone() {
                return Some(value);
            }
        }
    }

    /// Current value without waiting or marking it seen
    pub fn latest(&self) -> Option<T> {
        self.rx.borrow().clone()
    }
}
