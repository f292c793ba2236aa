use super::*;

/// The 4-byte type tag of a chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngRawChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngRawChunkType {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const bKGD: Self = Self(*b"bKGD");
  pub const acTL: Self = Self(*b"acTL");
  pub const fcTL: Self = Self(*b"fcTL");
  pub const fdAT: Self = Self(*b"fdAT");

  /// Critical chunks have an uppercase first letter. A decoder that doesn't
  /// know a critical chunk can't decode the image correctly.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    self.0[0].is_ascii_uppercase()
  }
}
impl Debug for PngRawChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}

/// An unparsed chunk from a PNG.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunk<'b> {
  pub type_: PngRawChunkType,
  pub data: &'b [u8],
  pub declared_crc: u32,
}
impl Debug for PngRawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("type_", &self.type_)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> PngRawChunk<'b> {
  /// The largest length a chunk is allowed to declare.
  pub const MAX_LENGTH: u32 = (1 << 31) - 1;

  /// Reads one chunk: length, type, data, then CRC.
  ///
  /// This only checks the framing. Call [`corrupted`](Self::corrupted) to
  /// check the CRC. On failure the cursor is left where it was.
  pub fn read(cursor: &mut ByteCursor<'b>) -> Result<Self, DecodeError> {
    let mut c = *cursor;
    let length = c.u32_be()?;
    if length > Self::MAX_LENGTH {
      return Err(DecodeError::MalformedContainer("chunk length over 2^31-1"));
    }
    let type_ = PngRawChunkType(c.array()?);
    let data = c.take(length as usize)?;
    let declared_crc = c.u32_be()?;
    *cursor = c;
    Ok(Self { type_, data, declared_crc })
  }

  /// The CRC of the type and data bytes.
  #[inline]
  #[must_use]
  pub fn actual_crc(&self) -> u32 {
    png_crc(self.type_.0.iter().copied().chain(self.data.iter().copied()))
  }

  /// If the declared CRC doesn't match the actual CRC.
  #[inline]
  #[must_use]
  pub fn corrupted(&self) -> bool {
    self.actual_crc() != self.declared_crc
  }
}

/// Appends a complete chunk (length, type, data, CRC) to `out`.
///
/// ## Panics
/// * If the data is longer than [`PngRawChunk::MAX_LENGTH`].
pub fn push_png_chunk(out: &mut Vec<u8>, type_: PngRawChunkType, data: &[u8]) {
  let length = u32::try_from(data.len()).unwrap_or(u32::MAX);
  assert!(length <= PngRawChunk::MAX_LENGTH, "chunk data is too long");
  out.extend_from_slice(&length.to_be_bytes());
  out.extend_from_slice(&type_.0);
  out.extend_from_slice(data);
  let crc = png_crc(type_.0.iter().copied().chain(data.iter().copied()));
  out.extend_from_slice(&crc.to_be_bytes());
}
