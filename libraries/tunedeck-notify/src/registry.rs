//! Per-owner notifiers
//!
//! Each owner gets their own pair of slots, so one user's edits can never
//! overwrite another user's latest value before it is delivered.

use crate::events::{EventSubscription, PlaylistNotifier};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tunedeck_core::{Playlist, UserId};

/// Routes playlist events to the notifier of the playlist's owner
#[derive(Debug, Default)]
pub struct NotifierRegistry {
    owners: RwLock<HashMap<UserId, PlaylistNotifier>>,
}

impl NotifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a freshly created playlist to its owner's listeners
    pub fn notify_created(&self, playlist: Playlist) {
        let owner = playlist.owner_id.clone();
        self.with_owner(&owner, |notifier| notifier.notify_created(playlist));
    }

    /// Publish the new state of an edited playlist to its owner's listeners
    pub fn notify_updated(&self, playlist: Playlist) {
        let owner = playlist.owner_id.clone();
        self.with_owner(&owner, |notifier| notifier.notify_updated(playlist));
    }

    /// Subscribe to one owner's events, starting with their latest values
    pub fn subscribe(&self, owner: &UserId) -> EventSubscription {
        self.with_owner(owner, PlaylistNotifier::subscribe)
    }

    /// Last playlist created by `owner`, if any
    pub fn latest_created(&self, owner: &UserId) -> Option<Playlist> {
        self.read_owner(owner, PlaylistNotifier::latest_created)
    }

    /// Last playlist of `owner` that was updated, if any
    pub fn latest_updated(&self, owner: &UserId) -> Option<Playlist> {
        self.read_owner(owner, PlaylistNotifier::latest_updated)
    }

    /// Drop the owner's slots once nobody is listening any more.
    ///
    /// Call after a subscription ends. Values published later start a new
    /// entry, so only already-delivered values are forgotten.
    pub fn release(&self, owner: &UserId) {
        let mut owners = self.owners.write().unwrap_or_else(PoisonError::into_inner);
        if owners
            .get(owner)
            .is_some_and(|notifier| notifier.subscriber_count() == 0)
        {
            owners.remove(owner);
            tracing::debug!(owner = %owner, "Released idle notifier");
        }
    }

    /// Number of owners currently holding slots
    pub fn owner_count(&self) -> usize {
        self.owners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // Runs under the lock so a concurrent `release` cannot orphan the notifier
    fn with_owner<R>(&self, owner: &UserId, f: impl FnOnce(&PlaylistNotifier) -> R) -> R {
        {
            let owners = self.owners.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(notifier) = owners.get(owner) {
                return f(notifier);
            }
        }

        let mut owners = self.owners.write().unwrap_or_else(PoisonError::into_inner);
        f(owners.entry(owner.clone()).or_default())
    }

    fn read_owner<R>(
        &self,
        owner: &UserId,
        f: impl FnOnce(&PlaylistNotifier) -> Option<R>,
    ) -> Option<R> {
        self.owners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(owner)
            .and_then(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlaylistEvent;
    use tunedeck_core::PlaylistId;

    fn playlist(id: &str, owner: &str, name: &str) -> Playlist {
        Playlist {
            id: PlaylistId::new(id),
            name: name.to_string(),
            owner_id: UserId::new(owner),
            songs: vec![],
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn other_owner_cannot_overwrite_pending_update() {
        let registry = NotifierRegistry::new();
        let alice = UserId::new("alice");
        let mut events = registry.subscribe(&alice);

        registry.notify_updated(playlist("p1", "alice", "Alice list"));
        registry.notify_updated(playlist("p2", "bob", "Bob list"));

        let event = events.recv().await.unwrap();
        assert_eq!(event, PlaylistEvent::Updated(playlist("p1", "alice", "Alice list")));
    }

    #[tokio::test]
    async fn late_subscriber_gets_own_latest_values() {
        let registry = NotifierRegistry::new();
        registry.notify_created(playlist("p1", "alice", "Mine"));
        registry.notify_created(playlist("p2", "bob", "Not mine"));

        let mut events = registry.subscribe(&UserId::new("alice"));
        let event = events.recv().await.unwrap();
        assert_eq!(event.playlist().id.as_str(), "p1");
    }

    #[test]
    fn latest_values_are_per_owner() {
        let registry = NotifierRegistry::new();
        registry.notify_updated(playlist("p1", "alice", "v1"));
        registry.notify_updated(playlist("p2", "bob", "v1"));

        let alice = UserId::new("alice");
        assert_eq!(registry.latest_updated(&alice).unwrap().id.as_str(), "p1");
        assert!(registry.latest_created(&alice).is_none());
        assert!(registry.latest_updated(&UserId::new("carol")).is_none());
    }

    #[test]
    fn release_only_drops_idle_owners() {
        let registry = NotifierRegistry::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        let events = registry.subscribe(&alice);
        registry.notify_created(playlist("p2", "bob", "Bob list"));
        assert_eq!(registry.owner_count(), 2);

        registry.release(&alice);
        registry.release(&bob);
        assert_eq!(registry.owner_count(), 1);

        drop(events);
        registry.release(&alice);
        assert_eq!(registry.owner_count(), 0);
    }
}
