//! Connection view: sign in with username and password.
//!
//! SYSTEM CONTEXT
//! ==============
//! `POST /auth/token` returns the JWT and also sets the `token` cookie, so a
//! successful sign-in only has to update `AuthState` and move to the canvas.

#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::routes::AppRoute;
use crate::state::auth::AuthState;

/// Query parameter the register view sets after creating an account.
pub const REGISTERED_PARAM: &str = "registered";

/// Trim the username and require both fields.
///
/// # Errors
///
/// Returns the inline message to show when either field is empty.
pub fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Banner text for `?registered=1`.
#[must_use]
pub fn registered_notice(flag: Option<&str>) -> Option<&'static str> {
    (flag == Some("1")).then_some("Account created. Sign in to start drawing.")
}

/// Where the register view sends the user after success.
#[must_use]
pub fn registered_redirect() -> String {
    format!("{}?{REGISTERED_PARAM}=1", AppRoute::Connection.path())
}

#[component]
pub fn ConnectionPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let notice = move || query.with(|q| registered_notice(q.get(REGISTERED_PARAM).as_deref()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (name, pass) = match validate_login_input(&username.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Connecting...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&name, &pass).await {
                    Ok(token) => {
                        auth.set(AuthState::signed_in(token.access_token, name));
                        password.set(String::new());
                        info.set(String::new());
                        busy.set(false);
                        navigate(AppRoute::Canvas.path(), leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        info.set(format!("Sign-in failed: {e}"));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (name, pass, &navigate);
    };

    view! {
        <Title text=AppRoute::Connection.title()/>
        <div class="login-page">
            <div class="login-card">
                <h1>"Place"</h1>
                <p class="login-card__subtitle">"One pixel at a time"</p>
                {move || notice().map(|text| view! { <p class="login-message login-message--ok">{text}</p> })}
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <Show when=move || auth.with(AuthState::is_authenticated)>
                    <a href=AppRoute::Canvas.path() class="login-link">
                        "Continue to canvas"
                    </a>
                </Show>
                <div class="login-divider"></div>
                <a href=AppRoute::Register.path() class="login-link">
                    "Create an account"
                </a>
            </div>
        </div>
    }
}
