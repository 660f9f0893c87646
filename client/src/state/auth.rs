#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

/// Authentication state: the bearer token from the `token` cookie and the
/// username the server confirmed for it.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub username: Option<String>,
    pub loading: bool,
}

impl AuthState {
    /// State after reading the cookie on startup.
    #[must_use]
    pub fn restored(token: Option<String>) -> Self {
        Self { token: token.filter(|t| !t.is_empty()), username: None, loading: false }
    }

    /// State after a successful sign-in.
    #[must_use]
    pub fn signed_in(token: String, username: String) -> Self {
        Self { token: Some(token), username: Some(username), loading: false }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Whether a protected view should send the user back to the connection view.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.token.is_none()
}
