// Binary PGM (P5) reading and writing
//
// Header: "P5", then width, height and maxval as ASCII decimals separated
// by whitespace, then a single whitespace byte, then raw rows of pixels.
// Lines starting with '#' anywhere in the header are comments.

use std::io::prelude::*;

use byteorder::ReadBytesExt;

use crate::error::{CodecError, Result};
use crate::image::Image;

const PGM_MAGIC: [u8; 2] = *b"P5";

const MAX_DIMENSION: usize = 65536;

fn is_space(byte: u8) -> bool {
  matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

fn next_byte<R: Read>(r: &mut R) -> Result<u8> {
  r.read_u8()
    .map_err(|_| CodecError::MalformedInput("truncated PGM header".into()))
}

// Read the next decimal token, skipping whitespace and '#' comment lines.
// Consumes the single whitespace byte that terminates the token.
fn read_decimal<R: Read>(r: &mut R) -> Result<usize> {
  // Skip separators first
  let mut byte = next_byte(r)?;
  loop {
    if is_space(byte) {
      byte = next_byte(r)?;
    } else if byte == b'#' {
      while next_byte(r)? != b'\n' {}
      byte = next_byte(r)?;
    } else {
      break;
    }
  }

  if !byte.is_ascii_digit() {
    return Err(CodecError::MalformedInput(format!(
      "expected a decimal header field, found byte {:#04x}",
      byte
    )));
  }

  let mut v: usize = 0;
  while byte.is_ascii_digit() {
    v = v
      .checked_mul(10)
      .and_then(|v| v.checked_add((byte - b'0') as usize))
      .ok_or_else(|| CodecError::MalformedInput("header field overflows".into()))?;
    byte = next_byte(r)?;
  }
  if !is_space(byte) {
    return Err(CodecError::MalformedInput(format!(
      "unexpected byte {:#04x} after header field",
      byte
    )));
  }
  Ok(v)
}

pub fn read<R: Read>(mut r: R) -> Result<Image> {
  let mut magic = [0u8; 2];
  r.read_exact(&mut magic)
    .map_err(|_| CodecError::MalformedInput("missing PGM magic".into()))?;
  if magic != PGM_MAGIC {
    return Err(CodecError::MalformedInput("not a binary PGM (P5) stream".into()));
  }

  let width = read_decimal(&mut r)?;
  let height = read_decimal(&mut r)?;
  let maxval = read_decimal(&mut r)?;

  if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
    return Err(CodecError::MalformedInput(format!("invalid PGM size {}x{}", width, height)));
  }
  if maxval != 255 {
    return Err(CodecError::MalformedInput(format!("unsupported maxval {}", maxval)));
  }

  let mut image = Image::new(height, width);
  for j in 0..height {
    r.read_exact(image.row_mut(j))
      .map_err(|_| CodecError::MalformedInput("short pixel data".into()))?;
  }
  Ok(image)
}

pub fn write<W: Write>(mut w: W, image: &Image) -> Result<()> {
  write!(w, "P5\n{} {}\n255\n", image.width(), image.height())?;
  for j in 0..image.height() {
    w.write_all(image.row(j))?;
  }
  w.flush()?;
  Ok(())
}
