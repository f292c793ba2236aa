use image::{codecs::jpeg::JpegEncoder, ExtendedColorType};
use imagine_anim::{pixels::unpack_rgba, DecoderRegistry, Image};

fn encode(pixels: &[u8], width: u32, height: u32, color: ExtendedColorType) -> Vec<u8> {
  let mut out = Vec::new();
  JpegEncoder::new_with_quality(&mut out, 95).encode(pixels, width, height, color).unwrap();
  out
}

#[test]
fn test_decode_rgb_jpeg() {
  let rgb: Vec<u8> = core::iter::repeat([200_u8, 100, 50]).take(16 * 8).flatten().collect();
  let bytes = encode(&rgb, 16, 8, ExtendedColorType::Rgb8);
  let img = DecoderRegistry::with_default_decoders().decode_image(&bytes).unwrap();
  assert_eq!((img.width(), img.height()), (16, 8));
  assert_eq!(img.frame_count(), 1);
  assert_eq!(img.delays(), &[1]);
  assert_eq!(img.repeat(), Image::NO_REPEAT);
  for &px in img.frame(0).unwrap() {
    let [r, g, b, a] = unpack_rgba(px);
    assert_eq!(a, 255);
    assert!(r.abs_diff(200) <= 4 && g.abs_diff(100) <= 4 && b.abs_diff(50) <= 4, "{px:08X}");
  }
}

#[test]
fn test_decode_greyscale_jpeg() {
  let luma = vec![128_u8; 8 * 8];
  let bytes = encode(&luma, 8, 8, ExtendedColorType::L8);
  let img = DecoderRegistry::with_default_decoders().decode_image(&bytes).unwrap();
  for &px in img.frame(0).unwrap() {
    let [r, g, b, a] = unpack_rgba(px);
    assert_eq!((r, a), (g, 255));
    assert_eq!(g, b);
    assert!(r.abs_diff(128) <= 2);
  }
}

#[test]
fn test_broken_jpeg_is_an_error_not_a_miss() {
  let bytes = [0xFF, 0xD8, 0xFF, 0xDB, 0x00];
  let err = DecoderRegistry::with_default_decoders().decode_image(&bytes).unwrap_err();
  assert!(!err.is_decode_miss());
}
