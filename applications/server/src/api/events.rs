/// Playlist change feed over WebSocket
use crate::{middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use std::sync::Arc;
use tunedeck_core::UserId;
use tunedeck_notify::{NotifierRegistry, PlaylistEvent};

/// GET /api/music/playlists/events
/// Streams `{type, playlist}` messages for the caller's own playlists,
/// starting with the latest created and updated values
pub async fn playlist_events(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Response {
    let notifier = Arc::clone(&app_state.notifier);
    let user_id = auth.0;
    ws.on_upgrade(move |socket| forward_events(socket, notifier, user_id))
}

async fn forward_events(mut socket: WebSocket, notifier: Arc<NotifierRegistry>, user_id: UserId) {
    let mut events = notifier.subscribe(&user_id);
    tracing::debug!(user = %user_id, "Playlist event listener connected");

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                if send_event(&mut socket, &event).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    drop(events);
    notifier.release(&user_id);
    tracing::debug!(user = %user_id, "Playlist event listener disconnected");
}

async fn send_event(socket: &mut WebSocket, event: &PlaylistEvent) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(event) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Failed to encode playlist event: {}", e);
            return Ok(());
        }
    };
    socket.send(Message::Text(text)).await
}
