//! Pixel grid rendered onto an HTML `<canvas>`.
//!
//! ARCHITECTURE
//! ============
//! The board is repainted in full whenever `PlaceState::revision` moves;
//! at 100 × 100 cells that is cheaper than tracking dirty regions. Clicks are
//! mapped back to board cells from the element's on-screen rectangle, so CSS
//! scaling of the canvas does not affect picking.

#[cfg(test)]
#[path = "pixel_canvas_test.rs"]
mod pixel_canvas_test;

use leptos::prelude::*;
use wire::BOARD_SIZE;

use crate::state::place::PlaceState;

/// Backing-store pixels per board cell.
pub const CELL_PX: u32 = 6;

/// Board cell under a point, given offsets inside the element and its size.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cell_at(offset_x: f64, offset_y: f64, width: f64, height: f64) -> Option<(u32, u32)> {
    if width <= 0.0 || height <= 0.0 || offset_x < 0.0 || offset_y < 0.0 {
        return None;
    }
    let size = f64::from(BOARD_SIZE);
    let x = (offset_x / width * size).floor();
    let y = (offset_y / height * size).floor();
    if x >= size || y >= size {
        return None;
    }
    Some((x as u32, y as u32))
}

/// Canvas showing the whole board. `on_pick` receives the clicked cell.
#[component]
pub fn PixelCanvas(on_pick: Callback<(u32, u32)>) -> impl IntoView {
    let place = expect_context::<RwSignal<PlaceState>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let side = (BOARD_SIZE * CELL_PX).to_string();

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        place.with(|state| paint(&canvas, &state.pixels));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = place;

    let on_click = move |ev: leptos::ev::MouseEvent| {
        #[cfg(feature = "hydrate")]
        {
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            let rect = canvas.get_bounding_client_rect();
            let offset_x = f64::from(ev.client_x()) - rect.left();
            let offset_y = f64::from(ev.client_y()) - rect.top();
            if let Some(cell) = cell_at(offset_x, offset_y, rect.width(), rect.height()) {
                on_pick.run(cell);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ev, on_pick);
        }
    };

    view! {
        <canvas
            node_ref=canvas_ref
            class="pixel-canvas"
            width=side.clone()
            height=side
            on:click=on_click
        ></canvas>
    }
}

#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation)]
fn paint(canvas: &web_sys::HtmlCanvasElement, pixels: &[u8]) {
    use wasm_bindgen::JsCast;

    let Ok(Some(ctx)) = canvas.get_context("2d") else {
        return;
    };
    let Ok(ctx) = ctx.dyn_into::<web_sys::CanvasRenderingContext2d>() else {
        return;
    };
    let cell = f64::from(CELL_PX);
    for (i, &color) in pixels.iter().enumerate() {
        let i = i as u32;
        let x = f64::from(i % BOARD_SIZE) * cell;
        let y = f64::from(i / BOARD_SIZE) * cell;
        ctx.set_fill_style_str(crate::util::palette::color_hex(color));
        ctx.fill_rect(x, y, cell, cell);
    }
}
