use super::*;

/// Describes one image (frame) within the screen.
///
/// This is read after the `0x2C` separator byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageDescriptor {
  pub left: u16,
  pub top: u16,
  pub width: u16,
  pub height: u16,
  pub local_color_table_flag: bool,
  pub interlace_flag: bool,
  pub sort_flag: bool,
  /// The raw 3-bit size field.
  pub local_color_table_size: u8,
}
impl ImageDescriptor {
  /// Image separator byte.
  pub const SEPARATOR: u8 = 0x2C;

  /// Reads the 9 bytes of the descriptor.
  pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
    let [l0, l1, t0, t1, w0, w1, h0, h1, packed] = cursor.array()?;
    Ok(Self {
      left: u16::from_le_bytes([l0, l1]),
      top: u16::from_le_bytes([t0, t1]),
      width: u16::from_le_bytes([w0, w1]),
      height: u16::from_le_bytes([h0, h1]),
      local_color_table_flag: packed & 0b1000_0000 != 0,
      interlace_flag: packed & 0b0100_0000 != 0,
      sort_flag: packed & 0b0010_0000 != 0,
      local_color_table_size: packed & 0b111,
    })
  }

  /// Entries in the local color table, or 0 if there isn't one.
  #[inline]
  #[must_use]
  pub const fn color_table_len(&self) -> usize {
    if self.local_color_table_flag {
      table_len(self.local_color_table_size)
    } else {
      0
    }
  }
}
