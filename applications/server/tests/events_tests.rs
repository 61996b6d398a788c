/// Playlist event feed tests
/// Drives the WebSocket route over a real socket, with playlists edited through the HTTP API
mod common;

use axum::http::{header, HeaderValue, StatusCode};
use common::{body_json, fixtures, TestApp};
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{client::IntoClientRequest, Message},
    MaybeTlsStream, WebSocketStream,
};
use tunedeck_core::UserId;

type EventSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

async fn serve(app: &TestApp) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

async fn connect(app: &TestApp, addr: SocketAddr, user_id: &str) -> EventSocket {
    let mut request = format!("ws://{}/api/music/playlists/events", addr)
        .into_client_request()
        .unwrap();
    request.headers_mut().insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", app.token_for(user_id))).unwrap(),
    );

    let (socket, _) = connect_async(request).await.unwrap();
    socket
}

async fn next_event(socket: &mut EventSocket) -> Value {
    loop {
        let message = tokio::time::timeout(EVENT_TIMEOUT, socket.next())
            .await
            .expect("no event within timeout")
            .expect("socket closed")
            .unwrap();

        match message {
            Message::Text(text) => return serde_json::from_str(&text).unwrap(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected message: {:?}", other),
        }
    }
}

async fn create_playlist(app: &TestApp, user_id: &str, name: &str) -> String {
    let response = app
        .call(
            "POST",
            "/api/music/playlists",
            user_id,
            Some(json!({ "name": name })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_events_require_token() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;

    let request = format!("ws://{}/api/music/playlists/events", addr)
        .into_client_request()
        .unwrap();
    assert!(connect_async(request).await.is_err());
}

#[tokio::test]
async fn test_socket_delivers_only_own_changes() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;

    let alice_playlist = create_playlist(&app, fixtures::ALICE, "Alice mix").await;
    let mut socket = connect(&app, addr, fixtures::ALICE).await;

    // Latest creation is replayed on connect
    let event = next_event(&mut socket).await;
    assert_eq!(event["type"], "created");
    assert_eq!(event["playlist"]["id"], alice_playlist.as_str());

    // Another user's activity in between must not displace Alice's update
    let bob_playlist = create_playlist(&app, fixtures::BOB, "Bob mix").await;
    let response = app
        .call(
            "PUT",
            &format!("/api/music/playlists/{}", bob_playlist),
            fixtures::BOB,
            Some(json!({ "name": "Bob renamed" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .call(
            "PUT",
            &format!("/api/music/playlists/{}", alice_playlist),
            fixtures::ALICE,
            Some(json!({ "name": "Alice renamed" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let event = next_event(&mut socket).await;
    assert_eq!(event["type"], "updated");
    assert_eq!(event["playlist"]["name"], "Alice renamed");
    assert_eq!(event["playlist"]["ownerId"], fixtures::ALICE);

    let songs_uri = format!("/api/music/playlists/{}/songs", alice_playlist);
    let response = app
        .call(
            "POST",
            &songs_uri,
            fixtures::ALICE,
            Some(fixtures::song("s1", "One")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let event = next_event(&mut socket).await;
    assert_eq!(event["type"], "updated");
    assert_eq!(event["playlist"]["songs"][0]["id"], "s1");

    let response = app
        .call("DELETE", &format!("{}/s1", songs_uri), fixtures::ALICE, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let event = next_event(&mut socket).await;
    assert_eq!(event["type"], "updated");
    assert_eq!(event["playlist"]["songs"], json!([]));
}

#[tokio::test]
async fn test_closing_socket_releases_owner_slots() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;
    let alice = UserId::new(fixtures::ALICE);

    create_playlist(&app, fixtures::ALICE, "Short lived").await;
    let mut socket = connect(&app, addr, fixtures::ALICE).await;
    assert_eq!(next_event(&mut socket).await["type"], "created");

    socket.send(Message::Close(None)).await.unwrap();

    let released = tokio::time::timeout(EVENT_TIMEOUT, async {
        while app.notifier.latest_created(&alice).is_some() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    assert!(released.is_ok(), "owner slots were not released after close");
}
