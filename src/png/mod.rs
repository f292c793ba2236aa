#![forbid(unsafe_code)]

//! Module for working with PNG and APNG data.
//!
//! * [Portable Network Graphics Specification (Third Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/png/
//!
//! The general format of a PNG is that the information is stored in "chunks".
//! After the 8 byte [signature](PNG_SIGNATURE) each chunk is a big-endian
//! length, a 4 byte type tag, the data, and a CRC-32 of the tag and data.
//!
//! * **Header** (`IHDR`) - The image's dimensions and pixel format. It must be
//!   the very first chunk.
//! * **Palette** (`PLTE`) - If an image uses indexed color it will have a
//!   palette of what index values map to what `RGB8` values.
//! * **Image Data** (`IDAT`) - One or more chunks of compressed data. All of the
//!   compressed data forms a single zlib data stream.
//! * **End** (`IEND`) - The last chunk, lets you know you had the full PNG and
//!   your data wasn't truncated accidentally.
//!
//! Animated PNG adds three more: `acTL` (before the first `IDAT`) gives the
//! frame count and loop count, then each frame has an `fcTL` giving its
//! region and delay, followed by its data. The first frame's data can be the
//! normal `IDAT` chunks, later frames use `fdAT` chunks, which are an `IDAT`
//! with a 4 byte sequence number on the front.
//!
//! To get pixels out, each frame's zlib stream is decompressed, giving
//! *filtered* scanlines, which are then [unfiltered](unfilter_in_place) and
//! converted to the crate's pixel words.
//!
//! ## Parsing Errors
//!
//! Every chunk's CRC is checked, and a mismatch fails the decode with
//! [`DecodeError::Corruption`]. The zlib stream's Adler-32 is also checked.
//! Interlaced images are reported as [`DecodeError::UnsupportedFeature`].

use core::fmt::{Debug, Write};

use alloc::{vec, vec::Vec};

use crate::{
  decoder::clamp_delay,
  pixels::{check_frame_budget, pack_bgra, place_on_canvas, try_canvas},
  ByteCursor, DecodeError, Image, ImageDecoder, MAX_DIMENSION,
};

mod crc32;
pub use crc32::*;

mod raw_chunk;
pub use raw_chunk::*;

mod ihdr;
pub use ihdr::*;

mod plte;
pub use plte::*;

mod trns;
pub use trns::*;

mod bkgd;
pub use bkgd::*;

mod actl;
pub use actl::*;

mod fctl;
pub use fctl::*;

mod unfilter;
pub use unfilter::*;

mod resolve;
use resolve::*;


/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Decodes PNG and APNG data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PngDecoder;
impl ImageDecoder for PngDecoder {
  #[inline]
  fn name(&self) -> &'static str {
    "png"
  }

  #[inline]
  fn supported(&self, cursor: &mut ByteCursor<'_>) -> bool {
    cursor.eat_prefix(&PNG_SIGNATURE)
  }

  #[inline]
  fn decode(&self, cursor: &mut ByteCursor<'_>) -> Result<Image, DecodeError> {
    png_decode(cursor)
  }

  /// Decodes a built-in 1x1 image, which checks zlib and unfiltering.
  fn test(&self) -> bool {
    let png = self_test_png();
    let mut cursor = ByteCursor::new(&png);
    self.supported(&mut cursor)
      && matches!(self.decode(&mut cursor), Ok(img) if img.frame(0) == Some(&[pack_bgra(0x80, 0x80, 0x80, 0xFF)][..]))
  }
}

/// A 1x1 8-bit greyscale image of value `0x80`, stored in an uncompressed
/// deflate block.
fn self_test_png() -> Vec<u8> {
  let mut out = Vec::from(PNG_SIGNATURE);
  push_png_chunk(&mut out, PngRawChunkType::IHDR, &[0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0, 0, 0]);
  push_png_chunk(
    &mut out,
    PngRawChunkType::IDAT,
    &[0x78, 0x01, 0x01, 0x02, 0x00, 0xFD, 0xFF, 0x00, 0x80, 0x00, 0x82, 0x00, 0x81],
  );
  push_png_chunk(&mut out, PngRawChunkType::IEND, &[]);
  out
}

/// Reads the next chunk and checks its CRC.
fn next_checked_chunk<'b>(cursor: &mut ByteCursor<'b>) -> Result<PngRawChunk<'b>, DecodeError> {
  let chunk = PngRawChunk::read(cursor).map_err(|e| match e {
    DecodeError::InsufficientData => DecodeError::MalformedContainer("PNG data ended before IEND"),
    e => e,
  })?;
  log::trace!("{chunk:?}");
  if chunk.corrupted() {
    return Err(DecodeError::Corruption { chunk: chunk.type_.0 });
  }
  Ok(chunk)
}

/// One APNG frame's control info and compressed data slices.
struct FrameParts<'b> {
  fctl: fcTL,
  zlib: Vec<&'b [u8]>,
}

/// Decodes PNG or APNG data.
///
/// The cursor can be either at the signature or just after it (which is where
/// [`PngDecoder::supported`] leaves it).
pub fn png_decode(cursor: &mut ByteCursor<'_>) -> Result<Image, DecodeError> {
  cursor.eat_prefix(&PNG_SIGNATURE);

  let first = next_checked_chunk(cursor)?;
  if first.type_ != PngRawChunkType::IHDR {
    return Err(DecodeError::MalformedContainer("first chunk must be IHDR"));
  }
  let ihdr = IHDR::try_from(first.data)?;
  if ihdr.width == 0 || ihdr.height == 0 {
    return Err(DecodeError::MalformedContainer("IHDR width or height is 0"));
  }
  if ihdr.width > MAX_DIMENSION || ihdr.height > MAX_DIMENSION {
    return Err(DecodeError::DimensionsTooLarge);
  }
  if ihdr.is_interlaced {
    return Err(DecodeError::UnsupportedFeature("interlaced PNG"));
  }

  let mut palette: &[[u8; 3]] = &[];
  let mut trns: Option<tRNS<'_>> = None;
  let mut actl: Option<acTL> = None;
  let mut frames: Vec<FrameParts<'_>> = Vec::new();
  let mut idat: Vec<&[u8]> = Vec::new();
  let mut idat_done = false;
  // if the default image is also the first animation frame
  let mut idat_is_frame = false;
  let mut next_sequence: u32 = 0;
  let mut check_sequence = |sequence_number: u32| {
    if sequence_number == next_sequence {
      next_sequence += 1;
      Ok(())
    } else {
      Err(DecodeError::MalformedContainer("APNG sequence numbers out of order"))
    }
  };

  loop {
    let chunk = next_checked_chunk(cursor)?;
    if !idat.is_empty() && chunk.type_ != PngRawChunkType::IDAT {
      idat_done = true;
    }
    match chunk.type_ {
      PngRawChunkType::IHDR => return Err(DecodeError::MalformedContainer("duplicate IHDR")),
      PngRawChunkType::PLTE => {
        if !idat.is_empty() {
          return Err(DecodeError::MalformedContainer("PLTE after IDAT"));
        }
        palette = PLTE::try_from(chunk.data)?.entries();
      }
      // a bad ancillary chunk is dropped, the image still decodes without it
      PngRawChunkType::tRNS => match tRNS::parse(chunk.data, ihdr.color_type, palette.len()) {
        Ok(t) => trns = Some(t),
        Err(e) => log::warn!("skipping bad tRNS: {e}"),
      },
      PngRawChunkType::bKGD => match bKGD::parse(chunk.data, ihdr.color_type) {
        Ok(bkgd) => log::trace!("background: {bkgd:?}"),
        Err(e) => log::warn!("skipping bad bKGD: {e}"),
      },
      PngRawChunkType::acTL => {
        if idat.is_empty() && actl.is_none() {
          actl = Some(acTL::try_from(chunk.data)?);
        } else {
          // an acTL after the image data doesn't make the PNG animated
          log::trace!("ignoring a late acTL");
        }
      }
      PngRawChunkType::fcTL if actl.is_some() => {
        let fctl = fcTL::try_from(chunk.data)?;
        check_sequence(fctl.sequence_number)?;
        fctl.check_region(&ihdr)?;
        if idat.is_empty() {
          if frames.is_empty() {
            if (fctl.x_offset, fctl.y_offset, fctl.width, fctl.height)
              != (0, 0, ihdr.width, ihdr.height)
            {
              return Err(DecodeError::MalformedContainer(
                "the default image frame must cover the whole canvas",
              ));
            }
            idat_is_frame = true;
          } else {
            return Err(DecodeError::MalformedContainer("fcTL without frame data"));
          }
        }
        frames.push(FrameParts { fctl, zlib: Vec::new() });
      }
      PngRawChunkType::IDAT => {
        if idat_done {
          return Err(DecodeError::MalformedContainer("IDAT chunks must be consecutive"));
        }
        idat.push(chunk.data);
      }
      PngRawChunkType::fdAT if actl.is_some() => {
        let (seq, data) = match chunk.data {
          [s0, s1, s2, s3, data @ ..] => (u32::from_be_bytes([*s0, *s1, *s2, *s3]), data),
          _ => return Err(DecodeError::MalformedContainer("fdAT shorter than 4 bytes")),
        };
        check_sequence(seq)?;
        // the default image frame's data is the IDAT, never fdAT
        let default_only = idat_is_frame && frames.len() == 1;
        match frames.last_mut() {
          Some(frame) if !default_only => frame.zlib.push(data),
          _ => return Err(DecodeError::MalformedContainer("fdAT without an fcTL")),
        }
      }
      PngRawChunkType::IEND => break,
      PngRawChunkType::fcTL | PngRawChunkType::fdAT => log::trace!("ignoring frame data in a still PNG"),
      other if other.is_critical() => {
        return Err(DecodeError::UnsupportedFeature("unknown critical chunk"))
      }
      other => log::trace!("skipping ancillary chunk {other:?}"),
    }
  }

  if idat.is_empty() {
    return Err(DecodeError::MalformedContainer("no IDAT chunk"));
  }
  if ihdr.is_indexed() && palette.is_empty() {
    return Err(DecodeError::MalformedContainer("indexed color without a PLTE"));
  }
  let ctx = PixelContext { ihdr, palette, trns };

  let actl = match actl {
    None => {
      let pixels = decode_frame(&ctx, &idat, ihdr.width, ihdr.height)?;
      return Ok(Image::new(ihdr.width, ihdr.height, vec![pixels], vec![1], 1, Image::NO_REPEAT)?);
    }
    Some(actl) => actl,
  };
  if idat_is_frame {
    frames[0].zlib = idat;
  }
  if frames.len() as u64 != u64::from(actl.num_frames) {
    return Err(DecodeError::MalformedContainer("acTL frame count doesn't match the fcTL count"));
  }
  check_frame_budget(ihdr.width, ihdr.height, frames.len())?;
  log::debug!("APNG with {} frames, {} plays", actl.num_frames, actl.num_plays);

  let mut canvases = Vec::new();
  canvases.try_reserve(frames.len())?;
  let mut delays = Vec::new();
  delays.try_reserve(frames.len())?;
  for FrameParts { fctl, zlib } in frames.iter() {
    if zlib.is_empty() {
      return Err(DecodeError::MalformedContainer("APNG frame has no data"));
    }
    let pixels = decode_frame(&ctx, zlib, fctl.width, fctl.height)?;
    let mut canvas = try_canvas(ihdr.width, ihdr.height)?;
    place_on_canvas(&mut canvas, ihdr.width, &pixels, fctl.width, fctl.x_offset, fctl.y_offset);
    canvases.push(canvas);
    delays.push(clamp_delay(fctl.delay_ms()));
  }
  Ok(Image::with_computed_duration(ihdr.width, ihdr.height, canvases, delays, actl.repeat())?)
}

/// Decompresses, unfilters, and converts one frame's worth of data.
fn decode_frame(
  ctx: &PixelContext<'_>, zlib: &[&[u8]], width: u32, height: u32,
) -> Result<Vec<u32>, DecodeError> {
  let expected = ctx.ihdr.filtered_len(width, height);
  let mut filtered: Vec<u8> = Vec::new();
  filtered.try_reserve(expected)?;
  // ferris plz make this into a memset
  filtered.resize(expected, 0);
  let count = miniz_oxide::inflate::decompress_slice_iter_to_slice(
    &mut filtered,
    zlib.iter().copied(),
    true,
    false,
  )
  .map_err(|_| DecodeError::MalformedContainer("bad zlib stream in image data"))?;
  if count < expected {
    return Err(DecodeError::MalformedContainer("image data ended early"));
  }
  unfilter_in_place(&mut filtered, ctx.ihdr.bytes_per_scanline(width), ctx.ihdr.filter_unit())?;
  resolve_pixels(ctx, &filtered, width, height)
}
