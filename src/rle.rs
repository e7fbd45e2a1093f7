// Run-length layer between the transforms and the entropy coder
//
// Quantized coefficients are mostly zero, so the buffer is written as
// alternating events: a zero-run length on the unsigned stream, then the
// next non-zero value on the signed stream. A run covering the tail of the
// buffer is written bare; the decoder knows the element count and stops.

use std::io::prelude::*;

use crate::error::{CodecError, Result};
use crate::intstream::{IntReader, IntWriter};

fn round(v: f32) -> i32 {
  v.round() as i32
}

pub fn compress<W: Write>(out: &mut IntWriter<W>, data: &[f32]) -> Result<()> {
  let mut i = 0;
  while i < data.len() {
    let mut run: u32 = 0;
    while i < data.len() && round(data[i]) == 0 {
      run += 1;
      i += 1;
    }
    out.put_uint(run)?;
    if i < data.len() {
      out.put_sint(round(data[i]))?;
      i += 1;
    }
  }
  Ok(())
}

pub fn decompress<R: Read>(inp: &mut IntReader<R>, data: &mut [f32]) -> Result<()> {
  let mut i = 0;
  while i < data.len() {
    let run = inp.get_uint()? as usize;
    if run > data.len() - i {
      return Err(CodecError::MalformedInput(format!(
        "zero run of {} overflows the remaining {} coefficients",
        run,
        data.len() - i
      )));
    }
    for _ in 0..run {
      data[i] = 0.0;
      i += 1;
    }
    if i < data.len() {
      data[i] = inp.get_sint()? as f32;
      i += 1;
    }
  }
  Ok(())
}
