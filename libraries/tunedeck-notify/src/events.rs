//! Playlist change notifications
//!
//! One latest-value slot per event kind. Views that render the same playlist
//! subscribe here instead of re-fetching after every edit.

use crate::slot::{LatestValue, Subscription};
use serde::{Deserialize, Serialize};
use tunedeck_core::Playlist;

/// Change notification as delivered to listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "playlist", rename_all = "lowercase")]
pub enum PlaylistEvent {
    /// A playlist was created
    Created(Playlist),
    /// A playlist's songs or name changed
    Updated(Playlist),
}

impl PlaylistEvent {
    /// Playlist carried by the event
    pub fn playlist(&self) -> &Playlist {
        match self {
            PlaylistEvent::Created(playlist) | PlaylistEvent::Updated(playlist) => playlist,
        }
    }
}

/// Creation and update slots for playlists
#[derive(Debug, Default)]
pub struct PlaylistNotifier {
    created: LatestValue<Playlist>,
    updated: LatestValue<Playlist>,
}

impl PlaylistNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a freshly created playlist
    pub fn notify_created(&self, playlist: Playlist) {
        tracing::debug!(playlist_id = %playlist.id, "Playlist created");
        self.created.publish(playlist);
    }

    /// Publish the new state of an edited playlist
    pub fn notify_updated(&self, playlist: Playlist) {
        tracing::debug!(playlist_id = %playlist.id, songs = playlist.songs.len(), "Playlist updated");
        self.updated.publish(playlist);
    }

    pub fn subscribe_created(&self) -> Subscription<Playlist> {
        self.created.subscribe()
    }

    pub fn subscribe_updated(&self) -> Subscription<Playlist> {
        self.updated.subscribe()
    }

    /// Last created playlist, if any
    pub fn latest_created(&self) -> Option<Playlist> {
        self.created.latest()
    }

    /// Last updated playlist, if any
    pub fn latest_updated(&self) -> Option<Playlist> {
        self.updated.latest()
    }

    /// Live merged subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.created.subscriber_count()
    }

    /// Both slots merged into a single event stream
    pub fn subscribe(&self) -> EventSubscription {
        EventSubscription {
            created: self.subscribe_created(),
            updated: self.subscribe_updated(),
        }
    }
}

/// Merged view over the creation and update slots
#[derive(Debug)]
pub struct EventSubscription {
    created: Subscription<Playlist>,
    updated: Subscription<Playlist>,
}

impl EventSubscription {
    /// Next unseen event from either slot; `None` once the notifier is gone
    pub async fn recv(&mut self) -> Option<PlaylistEvent> {
        tokio::select! {
            biased;
            Some(playlist) = self.created.recv() => Some(PlaylistEvent::Created(playlist)),
            Some(playlist) = self.updated.recv() => Some(PlaylistEvent::Updated(playlist)),
            else => None,
        }
    }
}
