use super::*;

/// A GIF color table, stored as opaque pixel words.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorTable(pub Vec<u32>);
impl ColorTable {
  /// The most entries a table can have.
  pub const MAX_LEN: usize = 256;

  /// Reads `size` RGB entries.
  ///
  /// On failure the cursor doesn't move.
  pub fn read(cursor: &mut ByteCursor<'_>, size: usize) -> Result<Self, DecodeError> {
    if size > Self::MAX_LEN {
      return Err(DecodeError::MalformedContainer("color table over 256 entries"));
    }
    let bytes = cursor.peek(size * 3).ok_or(DecodeError::InsufficientData)?;
    let rgb: &[[u8; 3]] = bytemuck::cast_slice(bytes);
    let mut entries = Vec::new();
    entries.try_reserve(size)?;
    entries.extend(rgb.iter().map(|&[r, g, b]| pack_bgra(r, g, b, u8::MAX)));
    cursor.skip(size * 3)?;
    Ok(Self(entries))
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Gets an entry, or `None` when the index is past the end.
  #[inline]
  #[must_use]
  pub fn get(&self, index: u8) -> Option<u32> {
    self.0.get(usize::from(index)).copied()
  }
}
