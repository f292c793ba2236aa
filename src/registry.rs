//! Holds the registered decoders and picks one for a given buffer.
//!
//! The registry is built once, at start up, with a [`RegistryBuilder`]. After
//! [`build`](RegistryBuilder::build) it can't be changed, so it's fine to
//! share a `&DecoderRegistry` with as many threads as you like.
//!
//! ```
//! # use imagine_anim::DecoderRegistry;
//! let registry = DecoderRegistry::with_default_decoders();
//! let err = registry.decode_image(b"not an image").unwrap_err();
//! assert!(err.is_decode_miss());
//! ```

use alloc::{boxed::Box, vec::Vec};

use crate::{ByteCursor, DecodeError, Image, ImageDecoder};

/// Collects decoders before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
  decoders: Vec<Box<dyn ImageDecoder>>,
}
impl RegistryBuilder {
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a decoder to the end of the trial order.
  ///
  /// The decoder's [`test`](ImageDecoder::test) runs first. If it fails the
  /// decoder is dropped and a warning is logged. That's not fatal to anything
  /// else, and the other registered decoders all keep working.
  pub fn register(&mut self, decoder: Box<dyn ImageDecoder>) -> Result<(), DecodeError> {
    let name = decoder.name();
    if !decoder.test() {
      log::warn!("decoder `{name}` failed its self-test and was not registered");
      return Err(DecodeError::CodecUnavailable(name));
    }
    log::debug!("registered decoder `{name}` at position {}", self.decoders.len());
    self.decoders.push(decoder);
    Ok(())
  }

  /// Like [`register`](Self::register), but chains.
  ///
  /// A failed self-test is still logged.
  #[inline]
  #[must_use]
  pub fn with(mut self, decoder: Box<dyn ImageDecoder>) -> Self {
    let _ = self.register(decoder);
    self
  }

  #[inline]
  #[must_use]
  pub fn build(self) -> DecoderRegistry {
    DecoderRegistry { decoders: self.decoders }
  }
}

/// An immutable, ordered set of decoders.
pub struct DecoderRegistry {
  decoders: Vec<Box<dyn ImageDecoder>>,
}
impl DecoderRegistry {
  #[inline]
  #[must_use]
  pub fn builder() -> RegistryBuilder {
    RegistryBuilder::new()
  }

  /// A registry with every decoder that's enabled by crate features, in the
  /// order PNG, JPEG, GIF.
  #[must_use]
  pub fn with_default_decoders() -> Self {
    #[allow(unused_mut)]
    let mut builder = RegistryBuilder::new();
    #[cfg(feature = "png")]
    {
      builder = builder.with(Box::new(crate::png::PngDecoder));
    }
    #[cfg(feature = "jpeg")]
    {
      builder = builder.with(Box::new(crate::jpeg::JpegDecoder));
    }
    #[cfg(feature = "gif")]
    {
      builder = builder.with(Box::new(crate::gif::GifDecoder));
    }
    builder.build()
  }

  /// Names of the registered decoders, in trial order.
  pub fn decoder_names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.decoders.iter().map(|d| d.name())
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.decoders.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.decoders.is_empty()
  }

  /// Decodes a complete in-memory image file.
  #[inline]
  pub fn decode_image(&self, bytes: &[u8]) -> Result<Image, DecodeError> {
    self.decode_at(&mut ByteCursor::new(bytes))
  }

  /// Decodes the image at the cursor.
  ///
  /// Decoders are asked in registration order. The first one that says the
  /// data is `supported` does the decoding, and its result is the result: a
  /// decode failure is *not* passed along to the other decoders.
  ///
  /// ## Failure
  /// * [`DecodeError::NoDecoderMatched`] if no decoder recognized the data.
  /// * Otherwise, whatever error the chosen decoder gave.
  pub fn decode_at(&self, cursor: &mut ByteCursor<'_>) -> Result<Image, DecodeError> {
    let entry = *cursor;
    for decoder in self.decoders.iter() {
      if decoder.supported(cursor) {
        log::debug!("decoder `{}` claimed data at offset {}", decoder.name(), entry.position());
        return decoder.decode(cursor);
      }
      // a decoder is supposed to restore the cursor itself, this just keeps a
      // badly behaved one from hiding data from the rest.
      *cursor = entry;
    }
    log::debug!("no decoder claimed data at offset {}", entry.position());
    Err(DecodeError::NoDecoderMatched)
  }
}
impl core::fmt::Debug for DecoderRegistry {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_list().entries(self.decoder_names()).finish()
  }
}
