use super::*;

/// `acTL`: Animation Control
///
/// Spec: [acTL](https://www.w3.org/TR/png/#acTL-chunk)
///
/// Marks a PNG as animated, as long as it appears before the first `IDAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
pub struct acTL {
  pub num_frames: u32,
  /// 0 means loop forever.
  pub num_plays: u32,
}
impl TryFrom<&[u8]> for acTL {
  type Error = DecodeError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    match *data {
      [f0, f1, f2, f3, p0, p1, p2, p3] => {
        let num_frames = u32::from_be_bytes([f0, f1, f2, f3]);
        if num_frames == 0 {
          return Err(DecodeError::MalformedContainer("acTL declares 0 frames"));
        }
        Ok(Self { num_frames, num_plays: u32::from_be_bytes([p0, p1, p2, p3]) })
      }
      _ => Err(DecodeError::MalformedContainer("acTL must be 8 bytes")),
    }
  }
}
impl acTL {
  /// The loop count as an [`Image`] repeat value.
  #[inline]
  #[must_use]
  pub fn repeat(&self) -> i32 {
    // 0 is "forever" in both systems
    i32::try_from(self.num_plays).unwrap_or(i32::MAX)
  }
}
