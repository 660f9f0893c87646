//! Row of palette swatches; clicking one selects the draw color.

#[cfg(test)]
#[path = "color_palette_test.rs"]
mod color_palette_test;

use leptos::prelude::*;

use crate::state::place::PlaceState;
use crate::util::palette::{color_hex, indices};

fn swatch_class(active: bool) -> &'static str {
    if active { "color-palette__swatch color-palette__swatch--active" } else { "color-palette__swatch" }
}

fn swatch_style(index: u8) -> String {
    format!("background-color: {}", color_hex(index))
}

#[component]
pub fn ColorPalette() -> impl IntoView {
    let place = expect_context::<RwSignal<PlaceState>>();

    view! {
        <div class="color-palette">
            {indices()
                .map(|index| {
                    let active = move || place.with(|p| p.selected_color == index);
                    view! {
                        <button
                            class=move || swatch_class(active())
                            style=swatch_style(index)
                            title=format!("Color {index}")
                            on:click=move |_| place.update(|p| p.select_color(index))
                        ></button>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
