use super::*;

#[test]
fn find_cookie_reads_single_pair() {
    assert_eq!(find_cookie("token=abc", "token"), Some("abc"));
}

#[test]
fn find_cookie_skips_other_names_and_whitespace() {
    assert_eq!(find_cookie("theme=dark;  token=xyz.123 ; other=1", "token"), Some("xyz.123"));
}

#[test]
fn find_cookie_does_not_match_prefix() {
    assert_eq!(find_cookie("tokenish=1", "token"), None);
}

#[test]
fn find_cookie_keeps_equals_in_value() {
    assert_eq!(find_cookie("token=a=b", "token"), Some("a=b"));
}

#[test]
fn find_cookie_treats_empty_value_as_missing() {
    assert_eq!(find_cookie("token=", "token"), None);
    assert_eq!(find_cookie("", "token"), None);
}

#[test]
fn expired_cookie_targets_root_path() {
    let cookie = expired_token_cookie();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("path=/"));
    assert!(cookie.contains("max-age=0"));
}

#[test]
fn read_token_is_none_outside_browser() {
    assert_eq!(read_token(), None);
}
