//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected views apply identical unauthenticated redirect behavior.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::routes::AppRoute;
use crate::state::auth::{AuthState, should_redirect_unauth};

/// Redirect to the connection view whenever auth has loaded and no token is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if auth.with(should_redirect_unauth) {
            navigate(AppRoute::Connection.path(), NavigateOptions::default());
        }
    });
}

/// Drop the stored token and mark the session signed out.
pub fn sign_out(auth: RwSignal<AuthState>) {
    crate::util::cookie::clear_token();
    auth.set(AuthState::restored(None));
}
