//! Access to the `token` cookie.
//!
//! The server sets the cookie on sign-in; the browser then sends it with the
//! live WebSocket upgrade, and REST calls read it back for the `Authorization`
//! header. Requires a browser environment; other targets see no cookie.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

pub use wire::TOKEN_COOKIE;

/// Find a cookie value in a `document.cookie` style string.
#[must_use]
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Assignment string that expires the token cookie.
#[must_use]
pub fn expired_token_cookie() -> String {
    format!("{TOKEN_COOKIE}=; path=/; max-age=0; SameSite=Lax")
}

#[cfg(feature = "hydrate")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

/// Read the access token from the browser cookie jar.
pub fn read_token() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let cookies = html_document()?.cookie().ok()?;
        find_cookie(&cookies, TOKEN_COOKIE).map(str::to_owned)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Remove the access token cookie (sign-out).
pub fn clear_token() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(doc) = html_document() {
            let _ = doc.set_cookie(&expired_token_cookie());
        }
    }
}
