//! Register view: create an account, then return to the connection view.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;

use crate::routes::AppRoute;

/// Check the form before it reaches the server. Returns the trimmed
/// username and the password on success.
///
/// # Errors
///
/// Returns the inline message for the first rule that fails.
pub fn validate_registration(username: &str, password: &str, confirm: &str) -> Result<(String, String), String> {
    let username = username.trim();
    wire::validate_username(username).map_err(|e| e.to_string())?;
    wire::validate_password(password).map_err(|e| e.to_string())?;
    if password != confirm {
        return Err("Passwords do not match.".to_owned());
    }
    Ok((username.to_owned(), password.to_owned()))
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (name, pass) = match validate_registration(&username.get(), &password.get(), &confirm.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg);
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::register(&name, &pass).await {
                    Ok(()) => {
                        busy.set(false);
                        navigate(
                            &super::connection::registered_redirect(),
                            leptos_router::NavigateOptions::default(),
                        );
                    }
                    Err(e) => {
                        info.set(format!("Registration failed: {e}"));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (name, pass, &navigate);
    };

    view! {
        <Title text=AppRoute::Register.title()/>
        <div class="login-page">
            <div class="login-card">
                <h1>"Place"</h1>
                <p class="login-card__subtitle">"Create an account"</p>
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
                        autocomplete="new-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="new-password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Register"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <a href=AppRoute::Connection.path() class="login-link">
                    "Already have an account? Sign in"
                </a>
            </div>
        </div>
    }
}
