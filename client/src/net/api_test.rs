use super::*;

#[test]
fn bearer_prefixes_scheme() {
    assert_eq!(bearer("abc.def"), "Bearer abc.def");
}

#[test]
fn pixel_endpoint_formats_query() {
    assert_eq!(pixel_endpoint(3, 97), "/api/place/board-bitmap/pixel/?x=3&y=97");
}

#[test]
fn login_form_body_encodes_fields() {
    let body = login_form_body("ada lovelace", "p&ss=word").expect("encode");
    assert_eq!(body, "grant_type=password&username=ada+lovelace&password=p%26ss%3Dword");
}

// =============================================================
// error_detail
// =============================================================

#[test]
fn error_detail_prefers_json_detail() {
    assert_eq!(error_detail(400, r#"{"detail":"Invalid color value"}"#), "Invalid color value");
}

#[test]
fn error_detail_falls_back_to_plain_text() {
    assert_eq!(error_detail(401, "Your token is invalid.\n"), "Your token is invalid.");
}

#[test]
fn error_detail_falls_back_to_status() {
    assert_eq!(error_detail(502, "   "), "request failed: 502");
}

// =============================================================
// classify_draw_failure
// =============================================================

#[test]
fn classify_429_with_wait_is_cooldown() {
    let failure = classify_draw_failure(429, "Please wait 0.50 seconds before drawing again".to_owned());
    assert_eq!(failure, DrawFailure::Cooldown { remaining_secs: 0.5 });
}

#[test]
fn classify_429_without_wait_is_rejected() {
    let failure = classify_draw_failure(429, "slow down".to_owned());
    assert_eq!(failure, DrawFailure::Rejected("slow down".to_owned()));
}

#[test]
fn classify_401_is_unauthorized() {
    assert_eq!(classify_draw_failure(401, "nope".to_owned()), DrawFailure::Unauthorized);
}

#[test]
fn classify_400_keeps_detail() {
    let failure = classify_draw_failure(400, "Coordinates out of bounds".to_owned());
    assert_eq!(failure, DrawFailure::Rejected("Coordinates out of bounds".to_owned()));
}

// =============================================================
// username_from_greeting
// =============================================================

#[test]
fn username_from_greeting_strips_prefix() {
    assert_eq!(username_from_greeting("Hello ada"), Some("ada".to_owned()));
}

#[test]
fn username_from_greeting_rejects_other_text() {
    assert_eq!(username_from_greeting("Welcome"), None);
    assert_eq!(username_from_greeting("Hello "), None);
}
