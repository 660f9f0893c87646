//! Reusable UI components for the canvas view.
//!
//! DESIGN
//! ======
//! Components read shared state from context signals and keep their pure
//! formatting/geometry helpers free of browser types so they stay testable.

pub mod color_palette;
pub mod pixel_canvas;
pub mod status_bar;
