//! From the PNG spec:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.

use super::*;

const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // Note(Lokathor): The PNG spec is extremely specific that you shall not,
  // under any circumstances, alter the order of evaluation of this
  // expression's tests.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Reverses the scanline filters, in place.
///
/// The `filtered` data is a series of lines, each a filter type byte followed
/// by `bytes_per_scanline` bytes. `filter_unit` is the byte distance back to
/// the "left" byte (see [`IHDR::filter_unit`]).
///
/// Each filter byte is reset to 0 ("None") as its line is reconstructed, so
/// afterwards the data reads as if it had never been filtered.
///
/// ## Failure
/// * The data isn't a whole number of lines.
/// * A line uses a filter type other than 0 through 4.
pub fn unfilter_in_place(
  filtered: &mut [u8], bytes_per_scanline: usize, filter_unit: usize,
) -> Result<(), DecodeError> {
  let line_len = bytes_per_scanline + 1;
  if filtered.len() % line_len != 0 {
    return Err(DecodeError::MalformedContainer("image data isn't a whole number of lines"));
  }
  let unit = filter_unit.max(1);
  // For the first line the "previous line" is an implied zero.
  let mut b_line: &[u8] = &[];
  for line in filtered.chunks_exact_mut(line_len) {
    let (f, x_line) = line.split_at_mut(1);
    match f[0] {
      0 => (),
      1 => {
        // Sub
        for i in unit..x_line.len() {
          x_line[i] = x_line[i].wrapping_add(x_line[i - unit]);
        }
      }
      2 => {
        // Up
        x_line.iter_mut().zip(b_line.iter().copied()).for_each(|(x, b)| *x = x.wrapping_add(b));
      }
      3 => {
        // Average
        for i in 0..x_line.len() {
          let a = if i >= unit { u32::from(x_line[i - unit]) } else { 0 };
          let b = u32::from(b_line.get(i).copied().unwrap_or(0));
          x_line[i] = x_line[i].wrapping_add(((a + b) / 2) as u8);
        }
      }
      4 => {
        // Paeth
        for i in 0..x_line.len() {
          let a = if i >= unit { x_line[i - unit] } else { 0 };
          let b = b_line.get(i).copied().unwrap_or(0);
          let c = if i >= unit { b_line.get(i - unit).copied().unwrap_or(0) } else { 0 };
          x_line[i] = x_line[i].wrapping_add(paeth_predict(a, b, c));
        }
      }
      _ => return Err(DecodeError::UnsupportedFeature("unknown PNG filter type")),
    }
    f[0] = 0;
    b_line = x_line;
  }
  Ok(())
}
