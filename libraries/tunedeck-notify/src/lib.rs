//! Tunedeck Notify
//!
//! In-process publish/subscribe for playlist changes.
//!
//! Each event kind has a single slot holding the latest value, and every
//! owner gets their own slots through [`NotifierRegistry`]. Subscribers are
//! woken synchronously on publish, and a subscriber that joins late receives
//! the most recent value only, never the history.
//!
//! # Example
//!
//! ```rust
//! use tunedeck_notify::LatestValue;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cell = LatestValue::new();
//! cell.publish("v1");
//! cell.publish("v2");
//!
//! let mut late = cell.subscribe();
//! assert_eq!(late.recv().await, Some("v2"));
//! # }
//! ```

mod events;
mod registry;
mod slot;

pub use events::{EventSubscription, PlaylistEvent, PlaylistNotifier};
pub use registry::NotifierRegistry;
pub use slot::{LatestValue, Subscription};
