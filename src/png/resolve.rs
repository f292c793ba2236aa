use super::*;

use bitfrob::u8_replicate_bits;

/// Everything besides the pixel data that's needed to turn samples into
/// final pixels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PixelContext<'b> {
  pub ihdr: IHDR,
  pub palette: &'b [[u8; 3]],
  pub trns: Option<tRNS<'b>>,
}

/// Gets sample number `index` from a line of unfiltered data.
///
/// Samples of less than 8 bits are packed with the left-most sample in the
/// highest bits of each byte.
#[inline]
fn sample(line: &[u8], bit_depth: u8, index: usize) -> u16 {
  match bit_depth {
    1 | 2 | 4 => {
      let bit_pos = index * usize::from(bit_depth);
      let byte = line[bit_pos / 8];
      let shift = 8 - usize::from(bit_depth) - (bit_pos % 8);
      let mask = (1_u8 << bit_depth) - 1;
      u16::from((byte >> shift) & mask)
    }
    8 => u16::from(line[index]),
    _ => u16::from_be_bytes([line[index * 2], line[index * 2 + 1]]),
  }
}

/// Scales a full precision sample to 8 bits.
#[inline]
fn to_u8(bit_depth: u8, s: u16) -> u8 {
  match bit_depth {
    16 => (s >> 8) as u8,
    8 => s as u8,
    _ => u8_replicate_bits(u32::from(bit_depth), s as u8),
  }
}

/// Converts unfiltered image data into pixel words.
///
/// The data must already have been checked to be `height` lines of the
/// correct length (as [`unfilter_in_place`] does).
pub(crate) fn resolve_pixels(
  ctx: &PixelContext<'_>, unfiltered: &[u8], width: u32, height: u32,
) -> Result<Vec<u32>, DecodeError> {
  let ihdr = &ctx.ihdr;
  let depth = ihdr.bit_depth;
  let line_len = ihdr.bytes_per_scanline(width) + 1;
  let mut out = try_canvas(width, height)?;
  let lines = unfiltered.chunks_exact(line_len).map(|line| &line[1..]);
  for (out_line, line) in out.chunks_exact_mut(width as usize).zip(lines) {
    for (x, px) in out_line.iter_mut().enumerate() {
      *px = match ihdr.color_type {
        PngColorType::Greyscale => {
          let y = sample(line, depth, x);
          let a = match ctx.trns {
            Some(tRNS::Y { y: clear }) if clear == y => 0,
            _ => u8::MAX,
          };
          let y8 = to_u8(depth, y);
          pack_bgra(y8, y8, y8, a)
        }
        PngColorType::Truecolor => {
          let (r, g, b) = (sample(line, depth, x * 3), sample(line, depth, x * 3 + 1), sample(line, depth, x * 3 + 2));
          let a = match ctx.trns {
            Some(tRNS::RGB { r: tr, g: tg, b: tb }) if (tr, tg, tb) == (r, g, b) => 0,
            _ => u8::MAX,
          };
          pack_bgra(to_u8(depth, r), to_u8(depth, g), to_u8(depth, b), a)
        }
        PngColorType::Indexed => {
          let i = sample(line, depth, x) as u8;
          let [r, g, b] = ctx.palette.get(usize::from(i)).copied().unwrap_or_default();
          let a = ctx.trns.map(|t| t.index_alpha(i)).unwrap_or(u8::MAX);
          pack_bgra(r, g, b, a)
        }
        PngColorType::GreyscaleAlpha => {
          let y8 = to_u8(depth, sample(line, depth, x * 2));
          pack_bgra(y8, y8, y8, to_u8(depth, sample(line, depth, x * 2 + 1)))
        }
        PngColorType::TruecolorAlpha => {
          let s = |i: usize| to_u8(depth, sample(line, depth, x * 4 + i));
          pack_bgra(s(0), s(1), s(2), s(3))
        }
      };
    }
  }
  Ok(out)
}
