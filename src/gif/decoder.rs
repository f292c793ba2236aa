use super::*;

use alloc::string::ToString;
use std::io::Read;

use crate::{
  decoder::clamp_delay,
  pixels::{check_frame_budget, place_on_canvas, try_canvas},
  ImageDecoder, MAX_DIMENSION,
};

/// Decodes GIF87a and GIF89a data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GifDecoder;
impl ImageDecoder for GifDecoder {
  #[inline]
  fn name(&self) -> &'static str {
    "gif"
  }

  #[inline]
  fn supported(&self, cursor: &mut ByteCursor<'_>) -> bool {
    eat_gif_signature(cursor)
  }

  #[inline]
  fn decode(&self, cursor: &mut ByteCursor<'_>) -> Result<Image, DecodeError> {
    gif_decode(cursor)
  }

  /// Decodes a built-in 1x1 transparent GIF through the LZW codec.
  fn test(&self) -> bool {
    match gif_decode(&mut ByteCursor::new(TINY_GIF)) {
      Ok(img) => {
        img.frame_count() == 1 && img.frame(0).is_some_and(|f| f.len() == 1 && f[0] >> 24 == 0)
      }
      Err(e) => {
        log::warn!("GIF self-test failed: {e}");
        false
      }
    }
  }
}

fn codec_error(e: ::gif::DecodingError) -> DecodeError {
  DecodeError::Codec(e.to_string())
}

/// Decodes GIF data.
///
/// The cursor can be either at the signature or just after it. Every image in
/// the file becomes one frame, drawn at its offset onto a transparent canvas
/// the size of the logical screen.
pub fn gif_decode(cursor: &mut ByteCursor<'_>) -> Result<Image, DecodeError> {
  eat_gif_signature(cursor);
  let start = *cursor;
  let structure = GifStructure::read(cursor)?;
  let body = &start.remaining()[..cursor.position() - start.position()];

  let width = u32::from(structure.screen.width);
  let height = u32::from(structure.screen.height);
  if width == 0 || height == 0 {
    return Err(DecodeError::MalformedContainer("GIF screen width or height is 0"));
  }
  if width > MAX_DIMENSION || height > MAX_DIMENSION {
    return Err(DecodeError::DimensionsTooLarge);
  }
  if structure.images.is_empty() {
    return Err(DecodeError::MalformedContainer("GIF has no images"));
  }
  check_frame_budget(width, height, structure.images.len())?;
  log::debug!(
    "GIF {width}x{height} with {} images, loop count {:?}",
    structure.images.len(),
    structure.loop_count
  );

  let mut options = ::gif::DecodeOptions::new();
  options.set_color_output(::gif::ColorOutput::RGBA);
  // the signature was already eaten, and 89a is a superset of 87a
  // the codec needs a trailer even when the data left it off
  let trailer: &[u8] = if structure.has_trailer { &[] } else { &[TRAILER] };
  let stream = (&b"GIF89a"[..]).chain(body).chain(trailer);
  let mut reader = options.read_info(stream).map_err(codec_error)?;

  let mut frames = Vec::new();
  frames.try_reserve(structure.images.len())?;
  while let Some(frame) = reader.read_next_frame().map_err(codec_error)? {
    if frames.len() == structure.images.len() {
      return Err(DecodeError::MalformedContainer("GIF codec found extra images"));
    }
    let mut sub = Vec::new();
    sub.try_reserve(frame.buffer.len() / 4)?;
    sub.extend(frame.buffer.chunks_exact(4).map(|p| pack_bgra(p[0], p[1], p[2], p[3])));
    let mut canvas = try_canvas(width, height)?;
    place_on_canvas(
      &mut canvas,
      width,
      &sub,
      u32::from(frame.width),
      u32::from(frame.left),
      u32::from(frame.top),
    );
    frames.push(canvas);
  }
  if frames.len() != structure.images.len() {
    return Err(DecodeError::MalformedContainer("GIF codec found fewer images"));
  }

  let delays = structure.images.iter().map(|i| clamp_delay(i.delay_ms())).collect();
  Ok(Image::with_computed_duration(width, height, frames, delays, structure.repeat())?)
}
