use super::*;

#[test]
fn live_socket_url_uses_ws_for_http() {
    assert_eq!(
        live_socket_url("http://localhost:3000/canvas", "localhost:3000"),
        "ws://localhost:3000/api/place/board-bitmap/ws"
    );
}

#[test]
fn live_socket_url_uses_wss_for_https() {
    assert_eq!(
        live_socket_url("https://place.example/canvas", "place.example"),
        "wss://place.example/api/place/board-bitmap/ws"
    );
}

#[test]
fn parse_live_message_reads_draw() {
    let text = r#"{"type":"draw","x":5,"y":6,"color":2,"user":"ada","timestamp":"2024-01-01T00:00:00Z"}"#;
    let event = parse_live_message(text).expect("draw event");
    assert_eq!((event.x, event.y, event.color), (5, 6, 2));
}

#[test]
fn parse_live_message_drops_unknown_and_malformed() {
    assert!(parse_live_message(r#"{"type":"hello"}"#).is_none());
    assert!(parse_live_message("not json").is_none());
    assert!(parse_live_message(r#"{"type":"draw","x":1}"#).is_none());
}

#[test]
fn backoff_doubles_then_caps() {
    assert_eq!(next_backoff_ms(1000), 2000);
    assert_eq!(next_backoff_ms(8000), 10_000);
    assert_eq!(next_backoff_ms(10_000), 10_000);
    assert_eq!(next_backoff_ms(u32::MAX), 10_000);
}
