//! The canonical pixel word, and helpers to build frame buffers out of it.
//!
//! Every decoder in this crate outputs pixels as `u32` values laid out as
//! `0xAARRGGBB`. Stored little-endian, that's the bytes `[b, g, r, a]`, which
//! is the BGRA8888 layout that the rendering side wants.

use alloc::vec::Vec;

use crate::{DecodeError, MAX_TOTAL_PIXELS};

/// A fully transparent black pixel.
pub const TRANSPARENT: u32 = 0;

/// Packs channel values into a canonical pixel word.
#[inline]
#[must_use]
pub const fn pack_bgra(r: u8, g: u8, b: u8, a: u8) -> u32 {
  u32::from_be_bytes([a, r, g, b])
}

/// Splits a canonical pixel word into `[r, g, b, a]`.
#[inline]
#[must_use]
pub const fn unpack_rgba(px: u32) -> [u8; 4] {
  let [a, r, g, b] = px.to_be_bytes();
  [r, g, b, a]
}

/// Allocates a `width * height` buffer of transparent pixels.
pub(crate) fn try_canvas(width: u32, height: u32) -> Result<Vec<u32>, DecodeError> {
  let count = (width as usize).checked_mul(height as usize).ok_or(DecodeError::DimensionsTooLarge)?;
  let mut v: Vec<u32> = Vec::new();
  v.try_reserve(count)?;
  // ferris plz make this into a memset
  v.resize(count, TRANSPARENT);
  Ok(v)
}

/// Checks that `frames` canvases of `width * height` stay within
/// [`MAX_TOTAL_PIXELS`].
pub(crate) fn check_frame_budget(width: u32, height: u32, frames: usize) -> Result<(), DecodeError> {
  let total = u64::from(width).saturating_mul(u64::from(height)).saturating_mul(frames as u64);
  if total > MAX_TOTAL_PIXELS {
    Err(DecodeError::DimensionsTooLarge)
  } else {
    Ok(())
  }
}

/// Copies a `sub_width` wide block of pixels onto the canvas at `(x, y)`.
///
/// Anything that would land outside the canvas is dropped.
pub(crate) fn place_on_canvas(
  canvas: &mut [u32], canvas_width: u32, sub: &[u32], sub_width: u32, x: u32, y: u32,
) {
  if sub_width == 0 || canvas_width == 0 || x >= canvas_width {
    return;
  }
  let copy_width = (sub_width.min(canvas_width - x)) as usize;
  let canvas_rows = canvas.chunks_exact_mut(canvas_width as usize).skip(y as usize);
  for (dst_row, src_row) in canvas_rows.zip(sub.chunks_exact(sub_width as usize)) {
    let start = x as usize;
    dst_row[start..start + copy_width].copy_from_slice(&src_row[..copy_width]);
  }
}
