use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

use imagine_anim::{ByteCursor, DecodeError, DecoderRegistry, Image, ImageDecoder};

#[derive(Default)]
struct Calls {
  supported: AtomicUsize,
  decode: AtomicUsize,
}

/// Claims data starting with `magic`, and counts how often it's asked.
struct StubDecoder {
  name: &'static str,
  magic: &'static [u8],
  passes_test: bool,
  calls: Arc<Calls>,
}
impl StubDecoder {
  fn new(name: &'static str, magic: &'static [u8]) -> (Box<Self>, Arc<Calls>) {
    let calls = Arc::new(Calls::default());
    (Box::new(Self { name, magic, passes_test: true, calls: calls.clone() }), calls)
  }
}
impl ImageDecoder for StubDecoder {
  fn name(&self) -> &'static str {
    self.name
  }
  fn supported(&self, cursor: &mut ByteCursor<'_>) -> bool {
    self.calls.supported.fetch_add(1, Ordering::SeqCst);
    cursor.eat_prefix(self.magic)
  }
  fn decode(&self, cursor: &mut ByteCursor<'_>) -> Result<Image, DecodeError> {
    self.calls.decode.fetch_add(1, Ordering::SeqCst);
    let len = cursor.remaining().len() as u32;
    Ok(Image::new(1, 1, vec![vec![len]], vec![1], 1, Image::NO_REPEAT)?)
  }
  fn test(&self) -> bool {
    self.passes_test
  }
}

/// Eats bytes and then says no, which a decoder isn't supposed to do.
struct RudeDecoder;
impl ImageDecoder for RudeDecoder {
  fn name(&self) -> &'static str {
    "rude"
  }
  fn supported(&self, cursor: &mut ByteCursor<'_>) -> bool {
    let _ = cursor.skip(2);
    false
  }
  fn decode(&self, _: &mut ByteCursor<'_>) -> Result<Image, DecodeError> {
    unreachable!()
  }
  fn test(&self) -> bool {
    true
  }
}

#[test]
fn test_first_supported_decoder_wins() {
  let (png, png_calls) = StubDecoder::new("png", b"\x89PNG");
  let (jpeg, jpeg_calls) = StubDecoder::new("jpeg", b"\xFF\xD8");
  let (gif, gif_calls) = StubDecoder::new("gif", b"GIF8");
  let registry = DecoderRegistry::builder().with(png).with(jpeg).with(gif).build();
  assert_eq!(registry.decoder_names().collect::<Vec<_>>(), ["png", "jpeg", "gif"]);

  let img = registry.decode_image(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0]).unwrap();
  // the decoder got the cursor just past the magic
  assert_eq!(img.frame(0), Some(&[4][..]));
  assert_eq!(png_calls.supported.load(Ordering::SeqCst), 1);
  assert_eq!(png_calls.decode.load(Ordering::SeqCst), 0);
  assert_eq!(jpeg_calls.decode.load(Ordering::SeqCst), 1);
  assert_eq!(gif_calls.supported.load(Ordering::SeqCst), 0);
  assert_eq!(gif_calls.decode.load(Ordering::SeqCst), 0);
}

#[test]
fn test_failed_self_test_is_never_registered() {
  let (mut broken, broken_calls) = StubDecoder::new("broken", b"");
  broken.passes_test = false;
  let (ok, _) = StubDecoder::new("ok", b"OK");

  let mut builder = DecoderRegistry::builder();
  assert_eq!(builder.register(broken), Err(DecodeError::CodecUnavailable("broken")));
  builder.register(ok).unwrap();
  let registry = builder.build();
  assert_eq!(registry.decoder_names().collect::<Vec<_>>(), ["ok"]);
  // the broken decoder matches everything, but it's never asked
  assert_eq!(registry.decode_image(b"nope"), Err(DecodeError::NoDecoderMatched));
  assert_eq!(broken_calls.supported.load(Ordering::SeqCst), 0);
}

#[test]
fn test_cursor_restored_between_decoders() {
  let (ok, ok_calls) = StubDecoder::new("ok", b"OK");
  let registry = DecoderRegistry::builder().with(Box::new(RudeDecoder)).with(ok).build();
  let mut cursor = ByteCursor::new(b"OK then");
  assert!(registry.decode_at(&mut cursor).is_ok());
  assert_eq!(ok_calls.decode.load(Ordering::SeqCst), 1);

  let mut cursor = ByteCursor::new(b"xxOK");
  cursor.skip(1).unwrap();
  assert_eq!(registry.decode_at(&mut cursor), Err(DecodeError::NoDecoderMatched));
  assert_eq!(cursor.position(), 1);
}

#[test]
fn test_default_decoders_backtrack_on_miss() {
  let registry = DecoderRegistry::with_default_decoders();
  assert_eq!(registry.len(), cfg!(feature = "png") as usize + cfg!(feature = "jpeg") as usize + cfg!(feature = "gif") as usize);
  let data = b"BM this is not any of the formats";
  let mut cursor = ByteCursor::new(data);
  cursor.skip(3).unwrap();
  let err = registry.decode_at(&mut cursor).unwrap_err();
  assert!(err.is_decode_miss());
  assert_eq!(cursor.position(), 3);
}

#[test]
fn test_empty_and_random_data() {
  let registry = DecoderRegistry::with_default_decoders();
  assert_eq!(registry.decode_image(&[]), Err(DecodeError::NoDecoderMatched));
  assert!(DecoderRegistry::builder().build().is_empty());
  for _ in 0..100 {
    let v = super::rand_bytes(512);
    // random data starting with 0xFF 0xD8 would go to the JPEG codec
    if v.starts_with(&[0xFF, 0xD8]) {
      continue;
    }
    let _ = registry.decode_image(&v);
  }
}

#[test]
fn test_registry_shared_between_threads() {
  let registry = Arc::new(DecoderRegistry::with_default_decoders());
  let handles: Vec<_> = (0..4)
    .map(|_| {
      let registry = registry.clone();
      std::thread::spawn(move || registry.decode_image(b"nothing").unwrap_err())
    })
    .collect();
  for h in handles {
    assert!(h.join().unwrap().is_decode_miss());
  }
}
