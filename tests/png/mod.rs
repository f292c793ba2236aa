use imagine_anim::{
  pixels::{pack_bgra, TRANSPARENT},
  png::{push_png_chunk, PngRawChunkType, PNG_SIGNATURE},
  DecodeError, DecoderRegistry, Image,
};
use miniz_oxide::deflate::compress_to_vec_zlib;

fn png_with(chunks: &[(PngRawChunkType, Vec<u8>)]) -> Vec<u8> {
  let mut out = PNG_SIGNATURE.to_vec();
  for (t, data) in chunks {
    push_png_chunk(&mut out, *t, data);
  }
  out
}

fn ihdr(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
  [&width.to_be_bytes()[..], &height.to_be_bytes(), &[bit_depth, color_type, 0, 0, 0]].concat()
}

fn fctl(seq: u32, w: u32, h: u32, x: u32, y: u32, num: u16, den: u16) -> Vec<u8> {
  let mut v: Vec<u8> = [seq, w, h, x, y].iter().flat_map(|n| n.to_be_bytes()).collect();
  v.extend_from_slice(&num.to_be_bytes());
  v.extend_from_slice(&den.to_be_bytes());
  v.extend_from_slice(&[0, 0]);
  v
}

/// 2x2 RGB8, first line Sub filtered, second line Up filtered.
fn filtered_rgb_png() -> Vec<u8> {
  let filtered = [1, 10, 20, 30, 5, 5, 5, 2, 10, 10, 10, 10, 10, 10];
  png_with(&[
    (PngRawChunkType::IHDR, ihdr(2, 2, 8, 2)),
    (PngRawChunkType::IDAT, compress_to_vec_zlib(&filtered, 6)),
    (PngRawChunkType::IEND, vec![]),
  ])
}

#[test]
fn test_decode_filtered_truecolor() {
  let img = DecoderRegistry::with_default_decoders().decode_image(&filtered_rgb_png()).unwrap();
  assert_eq!((img.width(), img.height()), (2, 2));
  assert!(!img.is_animated());
  assert_eq!(
    img.frame(0).unwrap(),
    &[
      pack_bgra(10, 20, 30, 255),
      pack_bgra(15, 25, 35, 255),
      pack_bgra(20, 30, 40, 255),
      pack_bgra(25, 35, 45, 255)
    ]
  );
  assert_eq!(img.bgra8888_bytes(0).unwrap()[..4], [30, 20, 10, 255]);
  assert_eq!(img.repeat(), Image::NO_REPEAT);
  assert_eq!(img.duration(), 1);
}

#[test]
fn test_crc_bit_flip_is_corruption() {
  let mut png = filtered_rgb_png();
  // first byte of the IHDR data
  png[16] ^= 0x01;
  let err = DecoderRegistry::with_default_decoders().decode_image(&png).unwrap_err();
  assert_eq!(err, DecodeError::Corruption { chunk: *b"IHDR" });
  assert!(!err.is_decode_miss());
}

#[test]
fn test_apng_two_frames() {
  let frame0 = compress_to_vec_zlib(&[0, 255, 0, 0, 255, 0, 255, 0, 255], 6);
  let frame1 = compress_to_vec_zlib(&[0, 0, 0, 255, 255], 6);
  let fdat = [&3_u32.to_be_bytes()[..], &frame1].concat();
  let png = png_with(&[
    (PngRawChunkType::IHDR, ihdr(2, 1, 8, 6)),
    (PngRawChunkType::acTL, [2_u32.to_be_bytes(), 2_u32.to_be_bytes()].concat()),
    (PngRawChunkType::fcTL, fctl(0, 2, 1, 0, 0, 3, 100)),
    (PngRawChunkType::IDAT, frame0),
    (PngRawChunkType(*b"tEXt"), b"Comment\0two frames".to_vec()),
    (PngRawChunkType::fcTL, fctl(2, 1, 1, 0, 0, 7, 0)),
    (PngRawChunkType::fdAT, fdat),
    (PngRawChunkType::IEND, vec![]),
  ]);
  // the sequence numbers skip 1, so this is rejected
  assert!(matches!(
    DecoderRegistry::with_default_decoders().decode_image(&png),
    Err(DecodeError::MalformedContainer(_))
  ));

  let frame0 = compress_to_vec_zlib(&[0, 255, 0, 0, 255, 0, 255, 0, 255], 6);
  let frame1 = compress_to_vec_zlib(&[0, 0, 0, 255, 255], 6);
  let fdat = [&2_u32.to_be_bytes()[..], &frame1].concat();
  let png = png_with(&[
    (PngRawChunkType::IHDR, ihdr(2, 1, 8, 6)),
    (PngRawChunkType::acTL, [2_u32.to_be_bytes(), 2_u32.to_be_bytes()].concat()),
    (PngRawChunkType::fcTL, fctl(0, 2, 1, 0, 0, 3, 100)),
    (PngRawChunkType::IDAT, frame0),
    (PngRawChunkType::fcTL, fctl(1, 1, 1, 1, 0, 7, 0)),
    (PngRawChunkType::fdAT, fdat),
    (PngRawChunkType::IEND, vec![]),
  ]);
  let img = DecoderRegistry::with_default_decoders().decode_image(&png).unwrap();
  assert!(img.is_animated());
  assert_eq!(img.frame(0).unwrap(), &[pack_bgra(255, 0, 0, 255), pack_bgra(0, 255, 0, 255)]);
  assert_eq!(img.frame(1).unwrap(), &[TRANSPARENT, pack_bgra(0, 0, 255, 255)]);
  assert_eq!(img.delays(), &[30, 70]);
  assert_eq!(img.repeat(), 2);
  assert_eq!(img.duration(), 200);
}

#[test]
fn test_apng_frame_count_mismatch() {
  let frame0 = compress_to_vec_zlib(&[0, 1], 6);
  let png = png_with(&[
    (PngRawChunkType::IHDR, ihdr(1, 1, 8, 0)),
    (PngRawChunkType::acTL, [2_u32.to_be_bytes(), 0_u32.to_be_bytes()].concat()),
    (PngRawChunkType::fcTL, fctl(0, 1, 1, 0, 0, 1, 1)),
    (PngRawChunkType::IDAT, frame0),
    (PngRawChunkType::IEND, vec![]),
  ]);
  assert!(DecoderRegistry::with_default_decoders().decode_image(&png).is_err());
}

#[test]
fn test_random_png_data_no_panics() {
  let registry = DecoderRegistry::with_default_decoders();
  for _ in 0..50 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend(super::rand_bytes(256));
    assert!(registry.decode_image(&v).is_err());
  }
  // a valid header and then random chunks
  let valid = filtered_rgb_png();
  for _ in 0..50 {
    let mut v = valid[..33].to_vec();
    v.extend(super::rand_bytes(128));
    let _ = registry.decode_image(&v);
  }
}
