//! A read position over a caller-owned byte slice.

use crate::DecodeError;

/// A byte slice plus a read offset.
///
/// The cursor is `Copy`, so taking a snapshot before a speculative read and
/// restoring it afterwards is just an assignment:
///
/// ```
/// # use imagine_anim::ByteCursor;
/// let mut cursor = ByteCursor::new(&[1, 2, 3]);
/// let entry = cursor;
/// assert_eq!(cursor.u8(), Ok(1));
/// cursor = entry;
/// assert_eq!(cursor.position(), 0);
/// ```
///
/// None of the reading methods move the cursor when they fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteCursor<'b> {
  bytes: &'b [u8],
  pos: usize,
}
impl<'b> ByteCursor<'b> {
  /// A cursor at the start of `bytes`.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { bytes, pos: 0 }
  }

  /// The current offset from the start of the underlying slice.
  #[inline]
  #[must_use]
  pub const fn position(&self) -> usize {
    self.pos
  }

  /// Moves to an absolute offset, clamped to the end of the data.
  #[inline]
  pub fn set_position(&mut self, pos: usize) {
    self.pos = pos.min(self.bytes.len());
  }

  /// The bytes that haven't been read yet.
  #[inline]
  #[must_use]
  pub fn remaining(&self) -> &'b [u8] {
    self.bytes.get(self.pos..).unwrap_or(&[])
  }

  /// If there's nothing left to read.
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.remaining().is_empty()
  }

  /// Looks at the next `n` bytes without moving.
  #[inline]
  #[must_use]
  pub fn peek(&self, n: usize) -> Option<&'b [u8]> {
    self.remaining().get(..n)
  }

  /// If the remaining data starts with `prefix`, moves past it and gives
  /// `true`. Otherwise the cursor doesn't move.
  #[inline]
  pub fn eat_prefix(&mut self, prefix: &[u8]) -> bool {
    if self.remaining().starts_with(prefix) {
      self.pos += prefix.len();
      true
    } else {
      false
    }
  }

  /// Reads the next `n` bytes.
  #[inline]
  pub fn take(&mut self, n: usize) -> Result<&'b [u8], DecodeError> {
    let out = self.peek(n).ok_or(DecodeError::InsufficientData)?;
    self.pos += n;
    Ok(out)
  }

  /// Moves forward `n` bytes.
  #[inline]
  pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
    self.take(n).map(|_| ())
  }

  /// Reads the next `N` bytes as an array.
  #[inline]
  pub fn array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
    let head = self.peek(N).ok_or(DecodeError::InsufficientData)?;
    let mut a = [0_u8; N];
    a.copy_from_slice(head);
    self.pos += N;
    Ok(a)
  }

  #[inline]
  pub fn u8(&mut self) -> Result<u8, DecodeError> {
    self.array::<1>().map(|[b]| b)
  }

  #[inline]
  pub fn u16_be(&mut self) -> Result<u16, DecodeError> {
    self.array().map(u16::from_be_bytes)
  }

  #[inline]
  pub fn u16_le(&mut self) -> Result<u16, DecodeError> {
    self.array().map(u16::from_le_bytes)
  }

  #[inline]
  pub fn u32_be(&mut self) -> Result<u32, DecodeError> {
    self.array().map(u32::from_be_bytes)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_endian_reads() {
    let mut c = ByteCursor::new(&[0x12, 0x34, 0x12, 0x34, 0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(c.u16_be(), Ok(0x1234));
    assert_eq!(c.u16_le(), Ok(0x3412));
    assert_eq!(c.u32_be(), Ok(0xDEADBEEF));
    assert!(c.is_empty());
  }

  #[test]
  fn test_failed_reads_do_not_move() {
    let mut c = ByteCursor::new(&[1, 2, 3]);
    c.skip(1).unwrap();
    assert_eq!(c.u32_be(), Err(DecodeError::InsufficientData));
    assert_eq!(c.take(3), Err(DecodeError::InsufficientData));
    assert_eq!(c.position(), 1);
    assert!(!c.eat_prefix(&[3]));
    assert!(c.eat_prefix(&[2]));
    assert_eq!(c.remaining(), &[3]);
  }
}
