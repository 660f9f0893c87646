use super::*;

#[test]
fn validate_login_input_trims_username() {
    assert_eq!(
        validate_login_input("  ada  ", "hunter22"),
        Ok(("ada".to_owned(), "hunter22".to_owned()))
    );
}

#[test]
fn validate_login_input_keeps_password_verbatim() {
    assert_eq!(
        validate_login_input("ada", " spaced "),
        Ok(("ada".to_owned(), " spaced ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "pw"), Err("Enter both username and password."));
    assert_eq!(validate_login_input("ada", ""), Err("Enter both username and password."));
}

#[test]
fn registered_notice_only_for_flag_one() {
    assert!(registered_notice(Some("1")).is_some());
    assert_eq!(registered_notice(Some("0")), None);
    assert_eq!(registered_notice(None), None);
}

#[test]
fn registered_redirect_resolves_to_connection_view() {
    let target = registered_redirect();
    assert_eq!(target, "/?registered=1");
    assert_eq!(AppRoute::resolve(&target), Some(AppRoute::Connection));
}
