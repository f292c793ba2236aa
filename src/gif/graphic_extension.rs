use super::*;

/// Graphic Control Extension.
///
/// Applies to the next image in the file. This is where GIF keeps frame
/// delays and the transparent color index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphicExtension {
  /// The raw 3-bit disposal method.
  pub disposal_method: u8,
  pub user_input_flag: bool,
  pub transparent_color_flag: bool,
  /// In 1/100ths of a second.
  pub delay_time: u16,
  pub transparent_color_index: u8,
}
impl GraphicExtension {
  /// Extension label, after the `0x21` introducer.
  pub const LABEL: u8 = 0xF9;

  /// Reads the extension body, which starts after the label byte.
  ///
  /// The body is a single 4 byte sub-block and then the block terminator.
  pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
    let mut c = *cursor;
    if c.u8()? != 4 {
      return Err(DecodeError::MalformedContainer("graphic control extension must be 4 bytes"));
    }
    let [packed, d0, d1, transparent_color_index] = c.array()?;
    if c.u8()? != 0 {
      return Err(DecodeError::MalformedContainer("graphic control extension not terminated"));
    }
    *cursor = c;
    Ok(Self {
      disposal_method: (packed >> 2) & 0b111,
      user_input_flag: packed & 0b10 != 0,
      transparent_color_flag: packed & 0b1 != 0,
      delay_time: u16::from_le_bytes([d0, d1]),
      transparent_color_index,
    })
  }

  /// The delay in milliseconds.
  #[inline]
  #[must_use]
  pub const fn delay_ms(&self) -> u64 {
    self.delay_time as u64 * 10
  }

  /// The transparent index, if the flag is set.
  #[inline]
  #[must_use]
  pub const fn transparent_index(&self) -> Option<u8> {
    if self.transparent_color_flag {
      Some(self.transparent_color_index)
    } else {
      None
    }
  }
}
