#![allow(bad_style)]

#[cfg(feature = "png")]
mod png;

#[cfg(feature = "gif")]
mod gif;

#[cfg(feature = "jpeg")]
mod jpeg;

mod registry;

fn rand_bytes(count: usize) -> Vec<u8> {
  let mut buffer = vec![0; count];
  getrandom::getrandom(&mut buffer).unwrap();
  buffer
}
