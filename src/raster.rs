#![forbid(unsafe_code)]

//! Provides the animated image type that every decoder produces.

use alloc::vec::Vec;

use crate::ImageError;

/// An animated raster image.
///
/// * Every frame is a full `width * height` buffer of pixel words, see the
///   [`pixels`](crate::pixels) module for the layout.
/// * There's one delay (in milliseconds) per frame.
/// * Still images are just an image with one frame that doesn't repeat.
///
/// The fields are private because [`Image::new`] checks that they all agree
/// with each other, so any `Image` you're holding is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Image {
  frames: Vec<Vec<u32>>,
  width: u32,
  height: u32,
  delays: Vec<u32>,
  duration: u64,
  repeat: i32,
}
impl Image {
  /// The animation plays once and stops on the last frame.
  pub const NO_REPEAT: i32 = -1;
  /// The animation loops forever.
  pub const REPEAT_FOREVER: i32 = 0;

  /// Builds an image.
  ///
  /// `repeat` is [`NO_REPEAT`](Self::NO_REPEAT),
  /// [`REPEAT_FOREVER`](Self::REPEAT_FOREVER), or a positive loop count.
  /// `duration` is in milliseconds.
  ///
  /// ## Failure
  /// * There's no frames, or a frame isn't `width * height` pixels.
  /// * The width or height is 0.
  /// * The number of delays isn't the number of frames.
  /// * The duration is 0.
  /// * The repeat value is less than -1.
  pub fn new(
    width: u32, height: u32, frames: Vec<Vec<u32>>, delays: Vec<u32>, duration: u64, repeat: i32,
  ) -> Result<Self, ImageError> {
    if frames.is_empty() {
      return Err(ImageError::NoFrames);
    }
    if width == 0 || height == 0 {
      return Err(ImageError::WidthOrHeightZero);
    }
    if delays.len() != frames.len() {
      return Err(ImageError::DelayCountMismatch { frames: frames.len(), delays: delays.len() });
    }
    if duration == 0 {
      return Err(ImageError::NonPositiveDuration);
    }
    if repeat < Self::NO_REPEAT {
      return Err(ImageError::InvalidRepeat(repeat));
    }
    let expected = (width as usize).saturating_mul(height as usize);
    if let Some((frame, f)) = frames.iter().enumerate().find(|(_, f)| f.len() != expected) {
      return Err(ImageError::FrameSizeMismatch { frame, expected, actual: f.len() });
    }
    Ok(Self { frames, width, height, delays, duration, repeat })
  }

  /// Builds an image, computing the duration from the delays.
  ///
  /// The duration is the sum of the delays, times the repeat count when the
  /// repeat count is positive.
  pub fn with_computed_duration(
    width: u32, height: u32, frames: Vec<Vec<u32>>, delays: Vec<u32>, repeat: i32,
  ) -> Result<Self, ImageError> {
    let duration = total_duration(&delays, repeat);
    Self::new(width, height, frames, delays, duration, repeat)
  }

  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// All the frames, in display order.
  #[inline]
  #[must_use]
  pub fn frames(&self) -> &[Vec<u32>] {
    &self.frames
  }

  /// Gets the frame at the index, or `None` if there's no such frame.
  #[inline]
  #[must_use]
  pub fn frame(&self, index: usize) -> Option<&[u32]> {
    self.frames.get(index).map(Vec::as_slice)
  }

  #[inline]
  #[must_use]
  pub fn frame_count(&self) -> usize {
    self.frames.len()
  }

  /// Per-frame delays, in milliseconds.
  #[inline]
  #[must_use]
  pub fn delays(&self) -> &[u32] {
    &self.delays
  }

  /// Total duration, in milliseconds.
  #[inline]
  #[must_use]
  pub const fn duration(&self) -> u64 {
    self.duration
  }

  #[inline]
  #[must_use]
  pub const fn repeat(&self) -> i32 {
    self.repeat
  }

  #[inline]
  #[must_use]
  pub fn is_animated(&self) -> bool {
    self.frames.len() > 1
  }

  /// The frame as BGRA8888 bytes, regardless of the platform's endianness.
  #[must_use]
  pub fn bgra8888_bytes(&self, index: usize) -> Option<Vec<u8>> {
    let frame = self.frames.get(index)?;
    Some(frame.iter().flat_map(|px| px.to_le_bytes()).collect())
  }

  /// Takes the frame buffers out of the image.
  #[inline]
  #[must_use]
  pub fn into_frames(self) -> Vec<Vec<u32>> {
    self.frames
  }
}

/// Sum of the delays, multiplied by `repeat` when `repeat` is positive.
#[must_use]
pub fn total_duration(delays: &[u32], repeat: i32) -> u64 {
  let once: u64 = delays.iter().map(|&d| u64::from(d)).sum();
  if repeat > 0 {
    once.saturating_mul(repeat as u64)
  } else {
    once
  }
}
