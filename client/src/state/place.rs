//! Local projection of the shared pixel board.
//!
//! SYSTEM CONTEXT
//! ==============
//! The canvas view loads the full bitmap once, then keeps it current from
//! live draw events. Cooldown bookkeeping lives here too so the view can
//! refuse a click before the server has to.

#[cfg(test)]
#[path = "place_test.rs"]
mod place_test;

use wire::{DEFAULT_DRAW_DELAY_SECS, DrawEvent, MAX_COLORS, PIXEL_COUNT, pixel_index};

/// Board-level state for the canvas view.
#[derive(Clone, Debug)]
pub struct PlaceState {
    /// Row-major color indices, always `PIXEL_COUNT` long.
    pub pixels: Vec<u8>,
    /// True once the initial bitmap fetch has completed.
    pub loaded: bool,
    /// Palette index used for the next draw.
    pub selected_color: u8,
    /// Server-side cooldown between draws, in seconds.
    pub delay_secs: u64,
    /// Client clock (ms) of this user's most recent accepted draw.
    pub last_draw_ms: Option<f64>,
    /// Live socket lifecycle.
    pub connection_status: ConnectionStatus,
    /// Inline feedback for the last action, if any.
    pub message: Option<String>,
    /// Bumped on every pixel change so the canvas knows to repaint.
    pub revision: u64,
    /// Live events received before the first bitmap load, replayed after it.
    pub pending: Vec<DrawEvent>,
}

/// Live WebSocket connection status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl Default for PlaceState {
    fn default() -> Self {
        Self {
            pixels: vec![0; PIXEL_COUNT],
            loaded: false,
            selected_color: 0,
            delay_secs: DEFAULT_DRAW_DELAY_SECS,
            last_draw_ms: None,
            connection_status: ConnectionStatus::Disconnected,
            message: None,
            revision: 0,
            pending: Vec::new(),
        }
    }
}

impl PlaceState {
    /// Replace the board with a freshly fetched bitmap.
    ///
    /// Short payloads are padded with color 0, long ones truncated, and
    /// values are masked to the 4-bit palette range.
    pub fn load_bitmap(&mut self, colors: Vec<u8>) {
        let mut pixels = colors;
        pixels.resize(PIXEL_COUNT, 0);
        for c in &mut pixels {
            *c &= 0x0F;
        }
        self.pixels = pixels;
        self.loaded = true;
        self.revision += 1;
        for event in std::mem::take(&mut self.pending) {
            self.set_pixel(event.x, event.y, event.color);
        }
    }

    /// Mark the board stale after the live socket reconnects. Pixels stay on
    /// screen; live events queue until the next [`Self::load_bitmap`], which
    /// replays them over the fresh fetch.
    pub fn begin_resync(&mut self) {
        self.loaded = false;
        self.pending.clear();
    }

    /// Forget the board when the canvas view unmounts. Palette choice,
    /// delay, and cooldown survive.
    pub fn reset_board(&mut self) {
        self.pixels = vec![0; PIXEL_COUNT];
        self.loaded = false;
        self.pending.clear();
        self.message = None;
        self.connection_status = ConnectionStatus::Disconnected;
        self.revision += 1;
    }

    #[must_use]
    pub fn color_at(&self, x: u32, y: u32) -> Option<u8> {
        pixel_index(x, y).and_then(|i| self.pixels.get(i).copied())
    }

    /// Set one pixel. Returns `true` when the stored color changed.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: u8) -> bool {
        if color >= MAX_COLORS {
            return false;
        }
        let Some(slot) = pixel_index(x, y).and_then(|i| self.pixels.get_mut(i)) else {
            return false;
        };
        if *slot == color {
            return false;
        }
        *slot = color;
        self.revision += 1;
        true
    }

    /// Apply a live draw event from any user. Before the first bitmap load
    /// the event is queued instead and this returns `false`.
    pub fn apply_draw(&mut self, event: &DrawEvent) -> bool {
        if !self.loaded {
            self.pending.push(event.clone());
            return false;
        }
        self.set_pixel(event.x, event.y, event.color)
    }

    pub fn select_color(&mut self, color: u8) {
        if color < MAX_COLORS {
            self.selected_color = color;
        }
    }

    /// Milliseconds left before the next draw is allowed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cooldown_remaining_ms(&self, now_ms: f64) -> f64 {
        let Some(last) = self.last_draw_ms else {
            return 0.0;
        };
        let delay_ms = self.delay_secs as f64 * 1000.0;
        (delay_ms - (now_ms - last)).clamp(0.0, delay_ms)
    }

    #[must_use]
    pub fn can_draw(&self, now_ms: f64) -> bool {
        self.cooldown_remaining_ms(now_ms) <= 0.0
    }

    pub fn record_draw(&mut self, now_ms: f64) {
        self.last_draw_ms = Some(now_ms);
    }

    /// Rebuild `last_draw_ms` from the server's "please wait" answer.
    #[allow(clippy::cast_precision_loss)]
    pub fn restore_cooldown(&mut self, remaining_secs: f64, now_ms: f64) {
        let delay_ms = self.delay_secs as f64 * 1000.0;
        let remaining_ms = (remaining_secs * 1000.0).clamp(0.0, delay_ms);
        self.last_draw_ms = Some(now_ms - (delay_ms - remaining_ms));
    }
}
