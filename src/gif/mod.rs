//! Module for working with GIF data.
//!
//! * [GIF89a Specification](https://www.w3.org/Graphics/GIF/spec-gif89a.txt)
//!
//! A GIF is a 6 byte signature (`GIF87a` or `GIF89a`), a [`ScreenDescriptor`],
//! an optional global [`ColorTable`], and then a series of blocks:
//!
//! * `0x21` starts an extension. The [`GraphicExtension`] holds the delay and
//!   transparency for the next image, and the `NETSCAPE2.0` application
//!   extension holds the loop count. Every extension ends in a series of
//!   length-prefixed sub-blocks.
//! * `0x2C` starts an image: an [`ImageDescriptor`], optional local color
//!   table, and LZW compressed sub-blocks.
//! * `0x3B` is the trailer, and ends the file. Data that simply stops after
//!   a complete image is also accepted as the end.
//!
//! This module walks the block structure itself (that's where the timing and
//! looping live). Decompressing the LZW pixel data is handed off to the
//! `gif` crate when the `gif` feature is enabled.

use alloc::vec::Vec;

use crate::{pixels::pack_bgra, ByteCursor, DecodeError, Image};

mod screen_descriptor;
pub use screen_descriptor::*;

mod image_descriptor;
pub use image_descriptor::*;

mod graphic_extension;
pub use graphic_extension::*;

mod color_table;
pub use color_table::*;

#[cfg(feature = "gif")]
mod decoder;
#[cfg(feature = "gif")]
pub use decoder::*;

/// The two signatures a GIF can start with.
pub const GIF_SIGNATURES: [&[u8; 6]; 2] = [b"GIF87a", b"GIF89a"];

const EXTENSION_INTRODUCER: u8 = 0x21;
const APPLICATION_LABEL: u8 = 0xFF;
const TRAILER: u8 = 0x3B;

/// A 1x1 GIF with a transparent pixel.
#[cfg(any(test, feature = "gif"))]
const TINY_GIF: &[u8] = &[
  b'G', b'I', b'F', b'8', b'9', b'a', 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0xFF, 0xFF, 0xFF,
  0x00, 0x00, 0x00, 0x21, 0xF9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00, 0x00, 0x00,
  0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3B,
];

/// Color tables are stored with a 3-bit size field `n`, meaning `2^(n+1)`
/// entries.
#[inline]
#[must_use]
pub(crate) const fn table_len(size_field: u8) -> usize {
  1 << ((size_field & 0b111) + 1)
}

/// Eats either GIF signature. The cursor doesn't move if neither matches.
#[inline]
pub fn eat_gif_signature(cursor: &mut ByteCursor<'_>) -> bool {
  GIF_SIGNATURES.iter().any(|sig| cursor.eat_prefix(&sig[..]))
}

/// One image within the GIF, along with the control data that applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GifImageInfo {
  pub descriptor: ImageDescriptor,
  pub control: Option<GraphicExtension>,
  pub local_color_table: Option<ColorTable>,
  pub lzw_min_code_size: u8,
}
impl GifImageInfo {
  /// The delay in milliseconds, which is 0 without a graphic extension.
  #[inline]
  #[must_use]
  pub fn delay_ms(&self) -> u64 {
    self.control.map(|c| c.delay_ms()).unwrap_or(0)
  }
}

/// Everything about a GIF except the compressed pixel data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GifStructure {
  pub screen: ScreenDescriptor,
  pub global_color_table: Option<ColorTable>,
  pub images: Vec<GifImageInfo>,
  /// From the `NETSCAPE2.0` extension, if there was one.
  pub loop_count: Option<u16>,
  /// If the data ended with a `0x3B` trailer, rather than just stopping.
  pub has_trailer: bool,
}
impl GifStructure {
  /// Walks the blocks of a GIF, starting just after the signature, through
  /// the trailer.
  ///
  /// On success the cursor is left just past the trailer. If the data runs
  /// out between blocks after at least one image, that counts as the end too.
  pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
    Self::read_blocks(cursor).map_err(|e| match e {
      DecodeError::InsufficientData => DecodeError::MalformedContainer("GIF data ended before the trailer"),
      e => e,
    })
  }

  fn read_blocks(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
    let screen = ScreenDescriptor::read(cursor)?;
    let global_color_table = match screen.color_table_len() {
      0 => None,
      len => Some(ColorTable::read(cursor, len)?),
    };
    let mut images = Vec::new();
    let mut loop_count = None;
    let mut control = None;
    let mut has_trailer = false;
    loop {
      if cursor.is_empty() && !images.is_empty() {
        log::warn!("GIF has no trailer, ending after {} images", images.len());
        break;
      }
      match cursor.u8()? {
        EXTENSION_INTRODUCER => match cursor.u8()? {
          GraphicExtension::LABEL => {
            if control.is_some() {
              log::trace!("replacing an unused graphic control extension");
            }
            control = Some(GraphicExtension::read(cursor)?);
          }
          APPLICATION_LABEL => {
            if let Some(count) = read_application_extension(cursor)? {
              loop_count = Some(count);
            }
          }
          label => {
            log::trace!("skipping GIF extension 0x{label:02X}");
            skip_sub_blocks(cursor)?;
          }
        },
        ImageDescriptor::SEPARATOR => {
          let descriptor = ImageDescriptor::read(cursor)?;
          let local_color_table = match descriptor.color_table_len() {
            0 => None,
            len => Some(ColorTable::read(cursor, len)?),
          };
          if global_color_table.is_none() && local_color_table.is_none() {
            return Err(DecodeError::MalformedContainer("GIF image has no color table"));
          }
          let lzw_min_code_size = cursor.u8()?;
          if !(1..=11).contains(&lzw_min_code_size) {
            return Err(DecodeError::MalformedContainer("GIF LZW code size out of range"));
          }
          skip_sub_blocks(cursor)?;
          images.push(GifImageInfo {
            descriptor,
            control: control.take(),
            local_color_table,
            lzw_min_code_size,
          });
        }
        TRAILER => {
          has_trailer = true;
          break;
        }
        _ => return Err(DecodeError::MalformedContainer("unknown GIF block")),
      }
    }
    Ok(Self { screen, global_color_table, images, loop_count, has_trailer })
  }

  /// The loop count as an [`Image`] repeat value.
  ///
  /// Without a looping extension the animation plays once. A count of 0
  /// means forever.
  #[inline]
  #[must_use]
  pub fn repeat(&self) -> i32 {
    match self.loop_count {
      None => Image::NO_REPEAT,
      Some(count) => i32::from(count),
    }
  }
}

/// Skips sub-blocks through the zero length terminator.
fn skip_sub_blocks(cursor: &mut ByteCursor<'_>) -> Result<(), DecodeError> {
  loop {
    match cursor.u8()? {
      0 => return Ok(()),
      len => cursor.skip(usize::from(len))?,
    }
  }
}

/// Reads an application extension, giving the loop count if it's a looping
/// extension.
fn read_application_extension(cursor: &mut ByteCursor<'_>) -> Result<Option<u16>, DecodeError> {
  if cursor.u8()? != 11 {
    return Err(DecodeError::MalformedContainer("application extension header must be 11 bytes"));
  }
  let id: [u8; 11] = cursor.array()?;
  let mut loop_count = None;
  if &id == b"NETSCAPE2.0" || &id == b"ANIMEXTS1.0" {
    // sub-block id 1 is the loop count, others are skipped below
    if let Some(&[3, 1, lo, hi]) = cursor.peek(4).and_then(|b| <&[u8; 4]>::try_from(b).ok()) {
      cursor.skip(4)?;
      loop_count = Some(u16::from_le_bytes([lo, hi]));
    }
  } else {
    log::trace!("skipping application extension {id:?}");
  }
  skip_sub_blocks(cursor)?;
  Ok(loop_count)
}
