use super::*;

/// `bKGD`: Background colour
///
/// Gives an intended background color for the image.
///
/// RGB and Greyscale colors are always given as `u16` values. The actual color
/// selected should stay within the bit depth range of the rest of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
#[allow(missing_docs)]
pub enum bKGD {
  Y { y: u16 },
  RGB { r: u16, g: u16, b: u16 },
  Index { i: u8 },
}
impl bKGD {
  /// Parses the chunk data for the given color type.
  pub fn parse(data: &[u8], color_type: PngColorType) -> Result<Self, DecodeError> {
    Ok(match (color_type, data) {
      (PngColorType::Indexed, [i]) => bKGD::Index { i: *i },
      (PngColorType::Greyscale | PngColorType::GreyscaleAlpha, [y0, y1]) => {
        bKGD::Y { y: u16::from_be_bytes([*y0, *y1]) }
      }
      (PngColorType::Truecolor | PngColorType::TruecolorAlpha, [r0, r1, g0, g1, b0, b1]) => {
        bKGD::RGB {
          r: u16::from_be_bytes([*r0, *r1]),
          g: u16::from_be_bytes([*g0, *g1]),
          b: u16::from_be_bytes([*b0, *b1]),
        }
      }
      _ => return Err(DecodeError::MalformedContainer("bKGD has the wrong length")),
    })
  }
}

#[test]
fn test_bkgd_variants() {
  assert_eq!(bKGD::parse(&[7], PngColorType::Indexed), Ok(bKGD::Index { i: 7 }));
  assert_eq!(bKGD::parse(&[0, 9], PngColorType::GreyscaleAlpha), Ok(bKGD::Y { y: 9 }));
  assert!(bKGD::parse(&[0, 9], PngColorType::Truecolor).is_err());
}
