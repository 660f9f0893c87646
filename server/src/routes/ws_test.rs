use std::net::SocketAddr;

use futures::StreamExt;
use tokio::time::{Duration, sleep, timeout};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use wire::{DrawEvent, LiveMessage};

use crate::state::{AppState, test_helpers};

async fn serve(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = crate::routes::api_routes(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

fn live_request(addr: SocketAddr, token: Option<&str>) -> tokio_tungstenite::tungstenite::handshake::client::Request {
    let mut request = format!("ws://{addr}/api/place/board-bitmap/ws").into_client_request().expect("request");
    if let Some(token) = token {
        let cookie = HeaderValue::from_str(&format!("theme=dark; token={token}")).expect("cookie header");
        request.headers_mut().insert("cookie", cookie);
    }
    request
}

async fn wait_for_subscribers(state: &AppState, count: usize) {
    timeout(Duration::from_secs(2), async {
        while state.live.receiver_count() < count {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("subscriber never registered");
}

fn event(x: u32, y: u32, color: u8) -> DrawEvent {
    DrawEvent { x, y, color, user: "ada".to_owned(), timestamp: "2024-01-01T00:00:00Z".to_owned() }
}

#[tokio::test]
async fn missing_cookie_closes_with_policy_violation() {
    let state = test_helpers::test_app_state();
    let addr = serve(state).await;

    let (mut socket, _) = tokio_tungstenite::connect_async(live_request(addr, None)).await.expect("upgrade");
    let msg = timeout(Duration::from_secs(2), socket.next()).await.expect("close in time");
    match msg {
        Some(Ok(WsMessage::Close(Some(frame)))) => assert_eq!(frame.code, CloseCode::Policy),
        other => panic!("expected close frame, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_cookie_closes_with_policy_violation() {
    let state = test_helpers::test_app_state();
    let addr = serve(state).await;

    let (mut socket, _) =
        tokio_tungstenite::connect_async(live_request(addr, Some("not-a-jwt"))).await.expect("upgrade");
    let msg = timeout(Duration::from_secs(2), socket.next()).await.expect("close in time");
    assert!(matches!(msg, Some(Ok(WsMessage::Close(Some(ref frame)))) if frame.code == CloseCode::Policy));
}

#[tokio::test]
async fn draw_events_reach_every_connected_client() {
    let state = test_helpers::test_app_state();
    let token = test_helpers::token_for(&state, "ada");
    let addr = serve(state.clone()).await;

    let (mut first, _) = tokio_tungstenite::connect_async(live_request(addr, Some(&token))).await.expect("upgrade");
    let (mut second, _) = tokio_tungstenite::connect_async(live_request(addr, Some(&token))).await.expect("upgrade");
    wait_for_subscribers(&state, 2).await;

    let sent = event(4, 5, 6);
    state.live.send(LiveMessage::Draw(sent.clone())).expect("subscribers");

    for socket in [&mut first, &mut second] {
        let msg = timeout(Duration::from_secs(2), socket.next()).await.expect("event in time");
        let Some(Ok(WsMessage::Text(text))) = msg else {
            panic!("expected text frame, got {msg:?}");
        };
        assert_eq!(LiveMessage::from_json(text.as_str()).expect("decode"), LiveMessage::Draw(sent.clone()));
    }
}

#[tokio::test]
async fn disconnect_drops_subscription() {
    let state = test_helpers::test_app_state();
    let token = test_helpers::token_for(&state, "ada");
    let addr = serve(state.clone()).await;

    let (mut socket, _) = tokio_tungstenite::connect_async(live_request(addr, Some(&token))).await.expect("upgrade");
    wait_for_subscribers(&state, 1).await;
    socket.close(None).await.expect("close");

    timeout(Duration::from_secs(2), async {
        while state.live.receiver_count() > 0 {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("subscription dropped");
}
