use super::*;

/// `tRNS`: Transparency
///
/// Spec: [tRNS](https://www.w3.org/TR/png/#11tRNS)
///
/// * `Y` and `RGB` each store a single color. All samples of that color in the
///   image are fully transparent (alpha 0), while the rest are fully opaque
///   (alpha maximum). The `tRNS` chunk always uses a `u16` to store the value,
///   even if the image's bit depth is less than 16.
/// * `Index` has an alpha value that goes along with the rest of the palette
///   data. The tranparency slice length should be less than or equal to the
///   palette slice length. If the transparency slice is shorter, all missing
///   entries should be assumed to have an alpha value of 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub enum tRNS<'b> {
  Y { y: u16 },
  RGB { r: u16, g: u16, b: u16 },
  Index { alphas: &'b [u8] },
}
impl<'b> tRNS<'b> {
  /// Parses the chunk data, which is laid out differently for each color
  /// type.
  ///
  /// `palette_len` is used to check indexed transparency, pass the number of
  /// entries in the `PLTE` (if any).
  pub fn parse(
    data: &'b [u8], color_type: PngColorType, palette_len: usize,
  ) -> Result<Self, DecodeError> {
    Ok(match (color_type, data) {
      (PngColorType::Greyscale, [y0, y1]) => tRNS::Y { y: u16::from_be_bytes([*y0, *y1]) },
      (PngColorType::Truecolor, [r0, r1, g0, g1, b0, b1]) => tRNS::RGB {
        r: u16::from_be_bytes([*r0, *r1]),
        g: u16::from_be_bytes([*g0, *g1]),
        b: u16::from_be_bytes([*b0, *b1]),
      },
      (PngColorType::Indexed, alphas) if alphas.len() <= palette_len => tRNS::Index { alphas },
      (PngColorType::Indexed, _) => {
        return Err(DecodeError::MalformedContainer("tRNS has more entries than PLTE"))
      }
      (PngColorType::GreyscaleAlpha | PngColorType::TruecolorAlpha, _) => {
        return Err(DecodeError::MalformedContainer("tRNS not allowed with an alpha channel"))
      }
      _ => return Err(DecodeError::MalformedContainer("tRNS has the wrong length")),
    })
  }

  /// Alpha for a palette index. Indexes past the end of the table are opaque.
  #[inline]
  #[must_use]
  pub fn index_alpha(&self, i: u8) -> u8 {
    match self {
      Self::Index { alphas } => alphas.get(usize::from(i)).copied().unwrap_or(u8::MAX),
      _ => u8::MAX,
    }
  }
}

#[test]
fn test_trns_variants() {
  assert_eq!(tRNS::parse(&[1, 2], PngColorType::Greyscale, 0), Ok(tRNS::Y { y: 0x0102 }));
  assert_eq!(
    tRNS::parse(&[0, 1, 0, 2, 0, 3], PngColorType::Truecolor, 0),
    Ok(tRNS::RGB { r: 1, g: 2, b: 3 })
  );
  let t = tRNS::parse(&[0, 128], PngColorType::Indexed, 4).unwrap();
  assert_eq!((t.index_alpha(0), t.index_alpha(1), t.index_alpha(3)), (0, 128, 255));
  assert!(tRNS::parse(&[0, 0, 0], PngColorType::Indexed, 2).is_err());
  assert!(tRNS::parse(&[0], PngColorType::Greyscale, 0).is_err());
}
