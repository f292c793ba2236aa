use super::*;

/// What happens to a frame's region after the frame is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DisposeOp {
  None = 0,
  Background = 1,
  Previous = 2,
}

/// How a frame is drawn over the previous canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BlendOp {
  Source = 0,
  Over = 1,
}

/// `fcTL`: Frame Control
///
/// Spec: [fcTL](https://www.w3.org/TR/png/#fcTL-chunk)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
pub struct fcTL {
  pub sequence_number: u32,
  pub width: u32,
  pub height: u32,
  pub x_offset: u32,
  pub y_offset: u32,
  pub delay_num: u16,
  pub delay_den: u16,
  pub dispose_op: DisposeOp,
  pub blend_op: BlendOp,
}
impl TryFrom<&[u8]> for fcTL {
  type Error = DecodeError;
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    if data.len() != 26 {
      return Err(DecodeError::MalformedContainer("fcTL must be 26 bytes"));
    }
    let mut c = ByteCursor::new(data);
    let sequence_number = c.u32_be()?;
    let width = c.u32_be()?;
    let height = c.u32_be()?;
    let x_offset = c.u32_be()?;
    let y_offset = c.u32_be()?;
    let delay_num = c.u16_be()?;
    let delay_den = c.u16_be()?;
    let dispose_op = match c.u8()? {
      0 => DisposeOp::None,
      1 => DisposeOp::Background,
      2 => DisposeOp::Previous,
      _ => return Err(DecodeError::MalformedContainer("unknown fcTL dispose op")),
    };
    let blend_op = match c.u8()? {
      0 => BlendOp::Source,
      1 => BlendOp::Over,
      _ => return Err(DecodeError::MalformedContainer("unknown fcTL blend op")),
    };
    Ok(Self {
      sequence_number,
      width,
      height,
      x_offset,
      y_offset,
      delay_num,
      delay_den,
      dispose_op,
      blend_op,
    })
  }
}
impl fcTL {
  /// The frame delay in milliseconds.
  ///
  /// A denominator of 0 means the numerator is in 1/100ths of a second.
  #[inline]
  #[must_use]
  pub fn delay_ms(&self) -> u64 {
    let den = if self.delay_den == 0 { 100 } else { u64::from(self.delay_den) };
    u64::from(self.delay_num) * 1000 / den
  }

  /// Checks that the frame is non-empty and inside the canvas.
  pub fn check_region(&self, ihdr: &IHDR) -> Result<(), DecodeError> {
    let right = u64::from(self.x_offset) + u64::from(self.width);
    let bottom = u64::from(self.y_offset) + u64::from(self.height);
    if self.width == 0 || self.height == 0 {
      Err(DecodeError::MalformedContainer("fcTL frame is empty"))
    } else if right > u64::from(ihdr.width) || bottom > u64::from(ihdr.height) {
      Err(DecodeError::MalformedContainer("fcTL frame is outside the canvas"))
    } else {
      Ok(())
    }
  }
}
