//! Packed in-memory pixel board.
//!
//! DESIGN
//! ======
//! Two pixels per byte: the pixel at an even index lives in the upper nibble,
//! the following odd index in the lower nibble. A fresh board is all zeros
//! (color 0 everywhere). The REST API never exposes the packed form; readers
//! get one color index per pixel from `to_colors`.

#[cfg(test)]
#[path = "bitmap_test.rs"]
mod tests;

use wire::{MAX_COLORS, PIXEL_COUNT, pixel_index};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    bytes: Vec<u8>,
}

impl Bitmap {
    #[must_use]
    pub fn new() -> Self {
        Self { bytes: vec![0; PIXEL_COUNT.div_ceil(2)] }
    }

    /// Build a board from `(x, y, color)` tiles applied in order.
    /// Tiles outside the board or palette are skipped.
    pub fn from_tiles<I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32, u8)>,
    {
        let mut bitmap = Self::new();
        for (x, y, color) in tiles {
            if let Some(index) = pixel_index(x, y) {
                bitmap.set(index, color);
            }
        }
        bitmap
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        if index >= PIXEL_COUNT {
            return None;
        }
        let byte = self.bytes[index / 2];
        Some(if index % 2 == 0 { byte >> 4 } else { byte & 0x0F })
    }

    /// Store `color` at `index`. Returns `false` if either is out of range.
    pub fn set(&mut self, index: usize, color: u8) -> bool {
        if index >= PIXEL_COUNT || color >= MAX_COLORS {
            return false;
        }
        let byte = &mut self.bytes[index / 2];
        *byte = if index % 2 == 0 { (*byte & 0x0F) | (color << 4) } else { (*byte & 0xF0) | color };
        true
    }

    /// One color index per pixel, row-major.
    #[must_use]
    pub fn to_colors(&self) -> Vec<u8> {
        self.bytes.iter().flat_map(|b| [b >> 4, b & 0x0F]).take(PIXEL_COUNT).collect()
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        Self::new()
    }
}
