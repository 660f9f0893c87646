//! Cooldown text helpers for the canvas view.

#[cfg(test)]
#[path = "cooldown_test.rs"]
mod cooldown_test;

/// Pull the remaining seconds out of the server's 429 detail,
/// e.g. `"Please wait 1.25 seconds before drawing again"`.
#[must_use]
pub fn parse_wait_seconds(detail: &str) -> Option<f64> {
    let rest = detail.trim().strip_prefix("Please wait ")?;
    let (number, _) = rest.split_once(' ')?;
    number.parse::<f64>().ok().filter(|secs| secs.is_finite() && *secs >= 0.0)
}

/// Short label for the cooldown badge: `"Ready"` or seconds with one decimal.
#[must_use]
pub fn format_cooldown(remaining_ms: f64) -> String {
    if remaining_ms <= 0.0 {
        "Ready".to_owned()
    } else {
        format!("{:.1}s", remaining_ms / 1000.0)
    }
}

/// Inline message shown when a click lands during the cooldown.
#[must_use]
pub fn wait_message(remaining_ms: f64) -> String {
    format!("Wait {} before placing another pixel.", format_cooldown(remaining_ms))
}

/// Browser wall clock in milliseconds. `0.0` off the browser.
#[must_use]
pub fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}

/// Parse an RFC 3339 timestamp from the server into epoch milliseconds.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn timestamp_ms(timestamp: &str) -> Option<f64> {
    let ms = js_sys::Date::parse(timestamp);
    ms.is_finite().then_some(ms)
}
