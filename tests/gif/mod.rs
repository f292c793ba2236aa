use std::borrow::Cow;

use imagine_anim::{
  gif::{GifStructure, GIF_SIGNATURES},
  pixels::{pack_bgra, TRANSPARENT},
  ByteCursor, DecodeError, DecoderRegistry, Image,
};

const PALETTE: [u8; 6] = [255, 0, 0, 0, 0, 255];

/// A 2x1 screen. The first frame is red then blue, the second frame is only
/// the right pixel, in blue.
fn two_frame_gif(repeat: Option<gif::Repeat>) -> Vec<u8> {
  let mut out = Vec::new();
  {
    let mut encoder = gif::Encoder::new(&mut out, 2, 1, &PALETTE).unwrap();
    if let Some(r) = repeat {
      encoder.set_repeat(r).unwrap();
    }
    let mut frame = gif::Frame::default();
    frame.width = 2;
    frame.height = 1;
    frame.delay = 5;
    frame.buffer = Cow::Borrowed(&[0, 1]);
    encoder.write_frame(&frame).unwrap();
    let mut frame = gif::Frame::default();
    frame.left = 1;
    frame.width = 1;
    frame.height = 1;
    frame.delay = 5;
    frame.buffer = Cow::Borrowed(&[1]);
    encoder.write_frame(&frame).unwrap();
  }
  out
}

#[test]
fn test_decode_looping_gif() {
  let bytes = two_frame_gif(Some(gif::Repeat::Infinite));
  let img = DecoderRegistry::with_default_decoders().decode_image(&bytes).unwrap();
  assert_eq!((img.width(), img.height()), (2, 1));
  assert_eq!(img.frame_count(), 2);
  assert_eq!(img.frame(0).unwrap(), &[pack_bgra(255, 0, 0, 255), pack_bgra(0, 0, 255, 255)]);
  assert_eq!(img.frame(1).unwrap(), &[TRANSPARENT, pack_bgra(0, 0, 255, 255)]);
  assert_eq!(img.delays(), &[50, 50]);
  assert_eq!(img.repeat(), Image::REPEAT_FOREVER);
  assert_eq!(img.duration(), 100);
}

#[test]
fn test_gif_loop_counts() {
  let bytes = two_frame_gif(None);
  let img = DecoderRegistry::with_default_decoders().decode_image(&bytes).unwrap();
  assert_eq!(img.repeat(), Image::NO_REPEAT);

  let bytes = two_frame_gif(Some(gif::Repeat::Finite(3)));
  let img = DecoderRegistry::with_default_decoders().decode_image(&bytes).unwrap();
  assert_eq!(img.repeat(), 3);
  assert_eq!(img.duration(), 300);
}

#[test]
fn test_structure_walk_matches_encoder() {
  let bytes = two_frame_gif(Some(gif::Repeat::Infinite));
  let mut cursor = ByteCursor::new(&bytes[6..]);
  let gif = GifStructure::read(&mut cursor).unwrap();
  assert!(cursor.is_empty());
  assert_eq!((gif.screen.width, gif.screen.height), (2, 1));
  assert_eq!(gif.images.len(), 2);
  assert_eq!(gif.images[1].descriptor.left, 1);
  assert_eq!(gif.loop_count, Some(0));
}

#[test]
fn test_truncated_gif() {
  let bytes = two_frame_gif(None);
  let registry = DecoderRegistry::with_default_decoders();
  // only the trailer missing still decodes
  let img = registry.decode_image(&bytes[..bytes.len() - 1]).unwrap();
  assert_eq!(img.frame_count(), 2);
  assert_eq!(img.frame(1).unwrap(), &[TRANSPARENT, pack_bgra(0, 0, 255, 255)]);
  // cut inside the last image's data
  let err = registry.decode_image(&bytes[..bytes.len() - 3]).unwrap_err();
  assert!(matches!(err, DecodeError::MalformedContainer(_)));
}

#[test]
fn test_random_gif_data_no_panics() {
  let registry = DecoderRegistry::with_default_decoders();
  for sig in GIF_SIGNATURES {
    for _ in 0..50 {
      let mut v = sig.to_vec();
      v.extend(super::rand_bytes(256));
      let _ = registry.decode_image(&v);
    }
  }
}
