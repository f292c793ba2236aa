use alloc::string::String;

/// A reason that an [`Image`](crate::Image) could not be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
  /// An image must have at least one frame.
  #[error("an image needs at least one frame")]
  NoFrames,

  /// The declared width and/or height of this image is 0.
  #[error("width and height must both be non-zero")]
  WidthOrHeightZero,

  /// There must be exactly one delay value per frame.
  #[error("{delays} delay values given for {frames} frames")]
  DelayCountMismatch { frames: usize, delays: usize },

  /// A frame buffer doesn't hold exactly `width * height` pixels.
  #[error("frame {frame} has {actual} pixels, expected {expected}")]
  FrameSizeMismatch { frame: usize, expected: usize, actual: usize },

  /// The total duration must be more than 0 milliseconds.
  #[error("total duration must be positive")]
  NonPositiveDuration,

  /// The repeat value was below [`Image::NO_REPEAT`](crate::Image::NO_REPEAT).
  #[error("repeat value {0} is below -1")]
  InvalidRepeat(i32),
}

/// An error from decoding image bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
  /// The container structure is wrong: a bad signature, a chunk or block
  /// where it can't be, or a record with the wrong size.
  #[error("malformed container: {0}")]
  MalformedContainer(&'static str),

  /// A PNG chunk's declared CRC doesn't match the CRC of its bytes.
  #[error("chunk {chunk:?} failed its CRC check")]
  Corruption { chunk: [u8; 4] },

  /// The data is probably valid, but uses something this crate doesn't
  /// decode (an unknown filter type, interlacing, an unknown critical chunk).
  #[error("unsupported feature: {0}")]
  UnsupportedFeature(&'static str),

  /// The decoder's runtime self-test failed, so it can't be registered.
  #[error("codec unavailable: {0}")]
  CodecUnavailable(&'static str),

  /// No registered decoder recognized the data.
  #[error("no registered decoder recognized the data")]
  NoDecoderMatched,

  /// The data ended before a record was complete.
  #[error("not enough data")]
  InsufficientData,

  /// An external codec reported a failure.
  #[error("codec error: {0}")]
  Codec(String),

  /// The decoded data didn't form a valid image.
  #[error(transparent)]
  InvalidImage(#[from] ImageError),

  /// The image is too large.
  ///
  /// The decoders limit the width and height of images they process to be
  /// [`MAX_DIMENSION`](crate::MAX_DIMENSION) or less, and all frames together
  /// to [`MAX_TOTAL_PIXELS`](crate::MAX_TOTAL_PIXELS), to prevent accidental
  /// out-of-memory problems.
  #[error("image dimensions are too large")]
  DimensionsTooLarge,

  /// The allocator couldn't give us enough space.
  #[error("allocation failed")]
  Alloc,
}
impl DecodeError {
  /// If this is the "nothing recognized the input" outcome, rather than a
  /// decoder recognizing the input and then failing.
  #[inline]
  #[must_use]
  pub const fn is_decode_miss(&self) -> bool {
    matches!(self, Self::NoDecoderMatched)
  }
}
impl From<alloc::collections::TryReserveError> for DecodeError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}
