use super::*;

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  Greyscale = 0,
  /// Red, Green, Blue
  Truecolor = 2,
  /// Index into a palette.
  ///
  /// The palette will have RGB8 data. There may optionally be a transparency
  /// chunk.
  Indexed = 3,
  GreyscaleAlpha = 4,
  TruecolorAlpha = 6,
}
impl PngColorType {
  /// The number of samples (channels) in this type of color.
  #[inline]
  #[must_use]
  pub const fn samples_per_pixel(self) -> usize {
    match self {
      Self::Greyscale => 1,
      Self::Truecolor => 3,
      Self::Indexed => 1,
      Self::GreyscaleAlpha => 2,
      Self::TruecolorAlpha => 4,
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = DecodeError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Greyscale,
      2 => PngColorType::Truecolor,
      3 => PngColorType::Indexed,
      4 => PngColorType::GreyscaleAlpha,
      6 => PngColorType::TruecolorAlpha,
      _ => return Err(DecodeError::UnsupportedFeature("unknown PNG color type")),
    })
  }
}

/// Image Header
///
/// Spec: [IHDR](https://www.w3.org/TR/png/#11IHDR)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per sample
  pub bit_depth: u8,
  pub color_type: PngColorType,
  /// Always 0 (zlib) in a valid PNG.
  pub compression_method: u8,
  /// Always 0 (adaptive filtering) in a valid PNG.
  pub filter_method: u8,
  /// if the image data is stored interlaced.
  ///
  /// please don't make new interlaced images, they're terrible.
  pub is_interlaced: bool,
}
impl TryFrom<&[u8]> for IHDR {
  type Error = DecodeError;
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match *value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] => {
        let color_type = PngColorType::try_from(color_type)?;
        let depth_ok = match color_type {
          PngColorType::Greyscale => [1, 2, 4, 8, 16].contains(&bit_depth),
          PngColorType::Indexed => [1, 2, 4, 8].contains(&bit_depth),
          _ => [8, 16].contains(&bit_depth),
        };
        if !depth_ok {
          return Err(DecodeError::UnsupportedFeature("illegal bit depth for the color type"));
        }
        if compression_method != 0 {
          return Err(DecodeError::UnsupportedFeature("unknown PNG compression method"));
        }
        if filter_method != 0 {
          return Err(DecodeError::UnsupportedFeature("unknown PNG filter method"));
        }
        Ok(Self {
          width: u32::from_be_bytes([w0, w1, w2, w3]),
          height: u32::from_be_bytes([h0, h1, h2, h3]),
          bit_depth,
          color_type,
          compression_method,
          filter_method,
          is_interlaced: match interlace_method {
            0 => false,
            1 => true,
            _ => return Err(DecodeError::UnsupportedFeature("unknown PNG interlace method")),
          },
        })
      }
      _ => Err(DecodeError::MalformedContainer("IHDR must be 13 bytes")),
    }
  }
}
impl IHDR {
  #[inline]
  #[must_use]
  pub const fn samples_per_pixel(&self) -> usize {
    self.color_type.samples_per_pixel()
  }

  #[inline]
  #[must_use]
  pub const fn has_alpha(&self) -> bool {
    matches!(self.color_type, PngColorType::GreyscaleAlpha | PngColorType::TruecolorAlpha)
  }

  #[inline]
  #[must_use]
  pub const fn is_indexed(&self) -> bool {
    matches!(self.color_type, PngColorType::Indexed)
  }

  #[inline]
  #[must_use]
  pub const fn is_greyscale(&self) -> bool {
    matches!(self.color_type, PngColorType::Greyscale | PngColorType::GreyscaleAlpha)
  }

  #[inline]
  #[must_use]
  pub const fn is_truecolor(&self) -> bool {
    matches!(self.color_type, PngColorType::Truecolor | PngColorType::TruecolorAlpha)
  }

  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.samples_per_pixel()
  }

  /// The byte distance that filters look back to find the "left" byte.
  ///
  /// Filtering is per byte within a pixel when pixels are more than 1 byte
  /// each, and per byte when pixels are 1 byte or less.
  #[inline]
  #[must_use]
  pub const fn filter_unit(&self) -> usize {
    let bytes = self.bits_per_pixel() / 8;
    if bytes == 0 {
      1
    } else {
      bytes
    }
  }

  /// Bytes of pixel data in one row of the given width, not counting the
  /// filter byte.
  ///
  /// When pixels are less than 8 bits it's possible to end up with partial
  /// bytes on the end, so this rounds up.
  #[inline]
  #[must_use]
  pub const fn bytes_per_scanline(&self, width: u32) -> usize {
    (self.bits_per_pixel() * (width as usize) + 7) / 8
  }

  /// Bytes of decompressed (filtered) data for an image of the given size.
  #[inline]
  #[must_use]
  pub const fn filtered_len(&self, width: u32, height: u32) -> usize {
    (self.bytes_per_scanline(width) + 1).saturating_mul(height as usize)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ihdr_bytes(bit_depth: u8, color_type: u8) -> [u8; 13] {
    [0, 0, 0, 3, 0, 0, 0, 2, bit_depth, color_type, 0, 0, 0]
  }

  #[test]
  fn test_ihdr_parse() {
    let ihdr = IHDR::try_from(&ihdr_bytes(8, 6)[..]).unwrap();
    assert_eq!((ihdr.width, ihdr.height), (3, 2));
    assert!(ihdr.has_alpha() && ihdr.is_truecolor());
    assert!(!ihdr.is_indexed() && !ihdr.is_greyscale());
    assert_eq!(ihdr.samples_per_pixel(), 4);
    assert_eq!(ihdr.filter_unit(), 4);
    assert_eq!(ihdr.filtered_len(3, 2), 26);
  }

  #[test]
  fn test_ihdr_low_depth_sizes() {
    let ihdr = IHDR::try_from(&ihdr_bytes(1, 0)[..]).unwrap();
    assert_eq!(ihdr.filter_unit(), 1);
    assert_eq!(ihdr.bytes_per_scanline(9), 2);
    let ihdr = IHDR::try_from(&ihdr_bytes(16, 4)[..]).unwrap();
    assert_eq!(ihdr.filter_unit(), 4);
  }

  #[test]
  fn test_ihdr_rejects() {
    assert!(matches!(IHDR::try_from(&ihdr_bytes(16, 3)[..]), Err(DecodeError::UnsupportedFeature(_))));
    assert!(matches!(IHDR::try_from(&ihdr_bytes(8, 5)[..]), Err(DecodeError::UnsupportedFeature(_))));
    assert!(matches!(IHDR::try_from(&[0_u8; 12][..]), Err(DecodeError::MalformedContainer(_))));
  }
}
