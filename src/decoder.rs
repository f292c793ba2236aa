//! The capability that every image format provides.

use crate::{ByteCursor, DecodeError, Image};

/// Decodes one image format.
///
/// A decoder holds no state between calls, so a single decoder can serve any
/// number of decode calls at once, as long as each call brings its own
/// [`ByteCursor`].
///
/// ## Backtracking
/// [`supported`](Self::supported) is allowed to move the cursor past the
/// format's magic bytes when it returns `true`, so that `decode` can carry on
/// from there. When it returns `false` the cursor **must** be left exactly
/// where it was, so the next decoder can look at the same bytes.
pub trait ImageDecoder: Send + Sync {
  /// Short name for log output, such as `"png"`.
  fn name(&self) -> &'static str;

  /// Checks the magic bytes at the cursor.
  fn supported(&self, cursor: &mut ByteCursor<'_>) -> bool;

  /// Decodes the image at the cursor.
  fn decode(&self, cursor: &mut ByteCursor<'_>) -> Result<Image, DecodeError>;

  /// Checks that everything this decoder needs at runtime is available.
  ///
  /// This is called once, when the decoder is registered. A decoder that
  /// fails its test is never used.
  fn test(&self) -> bool;
}

/// The delay rule for frame timings: no frame is shown for less than 1ms.
#[inline]
#[must_use]
pub(crate) fn clamp_delay(ms: u64) -> u32 {
  ms.clamp(1, u64::from(u32::MAX)) as u32
}
