#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]

//! A crate for decoding image bytes into animated raster images.
//!
//! Every format decodes into the same [`Image`] type: one or more frames of
//! `0xAARRGGBB` [pixel words](pixels), plus per-frame delays and a repeat
//! count. Still images are just a single frame.
//!
//! Supported formats, each behind a cargo feature (all on by default):
//! * `png`: PNG and Animated PNG, decoded by this crate.
//! * `gif`: GIF87a and GIF89a, with the LZW stage done by the `gif` crate.
//! * `jpeg`: JPEG, done by the `image` crate.
//!
//! Usually you'll want a [`DecoderRegistry`], which tries each decoder's magic
//! bytes in turn and decodes with the first one that matches.
//!
//! ```
//! # use imagine_anim::{DecoderRegistry, DecodeError};
//! let registry = DecoderRegistry::with_default_decoders();
//! match registry.decode_image(&[0, 1, 2, 3]) {
//!   Err(DecodeError::NoDecoderMatched) => (),
//!   other => panic!("{other:?}"),
//! }
//! ```
//!
//! ## Logging
//! Decoders log through the [`log`] facade: `warn` when a decoder fails its
//! self-test, `debug` for per-image summaries, and `trace` for each chunk or
//! block read.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

/// The largest width or height that the decoders will process.
///
/// Anything bigger gives [`DecodeError::DimensionsTooLarge`], rather than
/// trying to allocate a gigantic frame buffer.
pub const MAX_DIMENSION: u32 = 17_000;

/// The most pixels the decoders will allocate for all frames of one image
/// combined.
///
/// A single frame at [`MAX_DIMENSION`] squared fits. Animations that would go
/// over this give [`DecodeError::DimensionsTooLarge`].
pub const MAX_TOTAL_PIXELS: u64 = MAX_DIMENSION as u64 * MAX_DIMENSION as u64;

mod error;
pub use error::*;

mod cursor;
pub use cursor::*;

pub mod pixels;

mod raster;
pub use raster::*;

mod decoder;
pub use decoder::*;

mod registry;
pub use registry::*;

#[cfg(feature = "png")]
#[cfg_attr(docs_rs, doc(cfg(feature = "png")))]
pub mod png;

pub mod gif;

#[cfg(feature = "jpeg")]
#[cfg_attr(docs_rs, doc(cfg(feature = "jpeg")))]
pub mod jpeg;
