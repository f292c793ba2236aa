//! JPEG support, through the `image` crate's JPEG codec.
//!
//! JPEG data has no animation, so the result is always a single frame that
//! doesn't repeat.

use alloc::{string::ToString, vec, vec::Vec};

use image::{codecs::jpeg::JpegDecoder as CodecJpegDecoder, DynamicImage, ImageFormat};

use crate::{pixels::pack_bgra, ByteCursor, DecodeError, Image, ImageDecoder, MAX_DIMENSION};

/// Start Of Image marker, which every JPEG begins with.
pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Decodes baseline and progressive JPEG data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct JpegDecoder;
impl ImageDecoder for JpegDecoder {
  #[inline]
  fn name(&self) -> &'static str {
    "jpeg"
  }

  /// Peeks for the SOI marker. The cursor is never moved, because the codec
  /// wants to see the marker itself.
  #[inline]
  fn supported(&self, cursor: &mut ByteCursor<'_>) -> bool {
    cursor.peek(2) == Some(&JPEG_SOI[..])
  }

  #[inline]
  fn decode(&self, cursor: &mut ByteCursor<'_>) -> Result<Image, DecodeError> {
    jpeg_decode(cursor)
  }

  /// Checks that the codec can read JPEG, by looking for a reading-enabled
  /// format with a `jpg` or `jpeg` extension.
  fn test(&self) -> bool {
    ImageFormat::all().filter(ImageFormat::reading_enabled).any(|format| {
      format.extensions_str().iter().any(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
    })
  }
}

fn codec_error(e: image::ImageError) -> DecodeError {
  DecodeError::Codec(e.to_string())
}

/// Decodes JPEG data starting at the cursor's SOI marker.
///
/// The codec reads to the end of the data, so the cursor is moved to the end.
pub fn jpeg_decode(cursor: &mut ByteCursor<'_>) -> Result<Image, DecodeError> {
  use image::ImageDecoder as _;

  let bytes = cursor.remaining();
  if !bytes.starts_with(&JPEG_SOI) {
    return Err(DecodeError::MalformedContainer("JPEG data must start with SOI"));
  }
  let codec = CodecJpegDecoder::new(std::io::Cursor::new(bytes)).map_err(codec_error)?;
  let (width, height) = codec.dimensions();
  if width == 0 || height == 0 {
    return Err(DecodeError::MalformedContainer("JPEG width or height is 0"));
  }
  if width > MAX_DIMENSION || height > MAX_DIMENSION {
    return Err(DecodeError::DimensionsTooLarge);
  }
  let dynamic = DynamicImage::from_decoder(codec).map_err(codec_error)?;
  log::debug!("JPEG {width}x{height} as {:?}", dynamic.color());
  let pixels = dynamic_to_pixels(dynamic)?;
  cursor.set_position(cursor.position() + bytes.len());
  Ok(Image::new(width, height, vec![pixels], vec![1], 1, Image::NO_REPEAT)?)
}

/// Converts the decoded buffer into pixel words.
fn dynamic_to_pixels(dynamic: DynamicImage) -> Result<Vec<u32>, DecodeError> {
  let mut out = Vec::new();
  out.try_reserve((dynamic.width() as usize).saturating_mul(dynamic.height() as usize))?;
  match dynamic {
    DynamicImage::ImageRgb8(buf) => {
      out.extend(buf.as_raw().chunks_exact(3).map(|p| pack_bgra(p[0], p[1], p[2], u8::MAX)))
    }
    DynamicImage::ImageLuma8(buf) => out.extend(buf.as_raw().iter().map(|&y| pack_bgra(y, y, y, u8::MAX))),
    DynamicImage::ImageLumaA8(buf) => {
      out.extend(buf.as_raw().chunks_exact(2).map(|p| pack_bgra(p[0], p[0], p[0], p[1])))
    }
    DynamicImage::ImageRgba8(buf) => {
      out.extend(buf.as_raw().chunks_exact(4).map(|p| pack_bgra(p[0], p[1], p[2], p[3])))
    }
    other => {
      log::trace!("converting JPEG from {:?}", other.color());
      out.extend(other.to_rgba8().as_raw().chunks_exact(4).map(|p| pack_bgra(p[0], p[1], p[2], p[3])))
    }
  }
  Ok(out)
}
