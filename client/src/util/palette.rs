//! The 16-entry board palette.
//!
//! Index 0 is white so a freshly created (all-zero) board renders blank.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use wire::MAX_COLORS;

pub const PALETTE: [&str; MAX_COLORS as usize] = [
    "#FFFFFF", "#E4E4E4", "#888888", "#222222", "#FFA7D1", "#E50000", "#E59500", "#A06A42",
    "#E5D900", "#94E044", "#02BE01", "#00D3DD", "#0083C7", "#0000EA", "#CF6EE4", "#820080",
];

/// CSS color for a palette index; out-of-range indices fall back to white.
#[must_use]
pub fn color_hex(index: u8) -> &'static str {
    PALETTE.get(usize::from(index)).copied().unwrap_or(PALETTE[0])
}

/// Every palette index, for rendering swatches.
pub fn indices() -> impl Iterator<Item = u8> {
    0..MAX_COLORS
}
