use super::*;

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_token() {
    let state = AuthState::default();
    assert!(state.token.is_none());
    assert!(state.username.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn restored_drops_empty_token() {
    let state = AuthState::restored(Some(String::new()));
    assert!(state.token.is_none());
    assert!(!state.loading);
}

#[test]
fn restored_keeps_token_without_username() {
    let state = AuthState::restored(Some("abc".to_owned()));
    assert_eq!(state.token.as_deref(), Some("abc"));
    assert!(state.username.is_none());
    assert!(state.is_authenticated());
}

#[test]
fn signed_in_sets_both_fields() {
    let state = AuthState::signed_in("t".to_owned(), "ada".to_owned());
    assert_eq!(state.token.as_deref(), Some("t"));
    assert_eq!(state.username.as_deref(), Some("ada"));
}

// =============================================================
// should_redirect_unauth
// =============================================================

#[test]
fn redirects_when_loaded_without_token() {
    assert!(should_redirect_unauth(&AuthState::restored(None)));
}

#[test]
fn does_not_redirect_while_loading() {
    let state = AuthState { loading: true, ..AuthState::default() };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn does_not_redirect_with_token() {
    assert!(!should_redirect_unauth(&AuthState::restored(Some("t".to_owned()))));
}
