use super::*;

/// The Logical Screen Descriptor, which comes right after the signature.
///
/// It gives the size of the canvas that every image in the file is drawn
/// onto, and says if there's a global color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenDescriptor {
  pub width: u16,
  pub height: u16,
  pub global_color_table_flag: bool,
  /// Bits per primary color of the original source, 1 through 8.
  pub color_resolution: u8,
  pub sort_flag: bool,
  /// The raw 3-bit size field. See
  /// [`color_table_len`](Self::color_table_len) for the entry count.
  pub global_color_table_size: u8,
  pub background_color_index: u8,
  pub pixel_aspect_ratio: u8,
}
impl ScreenDescriptor {
  /// Reads the 7 bytes of the descriptor.
  ///
  /// On failure the cursor doesn't move.
  pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
    let [w0, w1, h0, h1, packed, background_color_index, pixel_aspect_ratio] = cursor.array()?;
    Ok(Self {
      width: u16::from_le_bytes([w0, w1]),
      height: u16::from_le_bytes([h0, h1]),
      global_color_table_flag: packed & 0b1000_0000 != 0,
      color_resolution: ((packed >> 4) & 0b111) + 1,
      sort_flag: packed & 0b0000_1000 != 0,
      global_color_table_size: packed & 0b111,
      background_color_index,
      pixel_aspect_ratio,
    })
  }

  /// Entries in the global color table, or 0 if there isn't one.
  #[inline]
  #[must_use]
  pub const fn color_table_len(&self) -> usize {
    if self.global_color_table_flag {
      table_len(self.global_color_table_size)
    } else {
      0
    }
  }
}
