// Integer streams over a bit stream
//
// The pipeline writes two logical streams (unsigned zero-run lengths and
// signed coefficient values) into one bit stream. In adaptive mode both
// share a single Shannon-Fano event table, so run lengths and values
// compete for the same short codes; in raw mode they use the static
// variable-length code.

use std::io::prelude::*;

use crate::bitio::{BitReader, BitWriter};
use crate::error::{CodecError, Result};
use crate::intcode;
use crate::shannon::ShannonFano;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coding {
  /// Static prefix/suffix integer code (values limited to 0..=32767).
  Raw,
  /// Adaptive Shannon-Fano over a table shared by both streams.
  Adaptive,
}

pub struct IntWriter<W: Write> {
  bits: BitWriter<W>,
  coding: Coding,
  table: ShannonFano,
}

impl<W: Write> IntWriter<W> {
  pub fn new(bits: BitWriter<W>, coding: Coding) -> Self {
    Self {
      bits: bits,
      coding: coding,
      table: ShannonFano::new(),
    }
  }

  pub fn put_uint(&mut self, v: u32) -> Result<()> {
    match self.coding {
      Coding::Raw => intcode::put_uint(&mut self.bits, v),
      Coding::Adaptive => {
        if v > i32::MAX as u32 {
          return Err(CodecError::OutOfRange(v as i64));
        }
        self.table.encode(&mut self.bits, v as i32)
      }
    }
  }

  pub fn put_sint(&mut self, v: i32) -> Result<()> {
    match self.coding {
      Coding::Raw => intcode::put_sint(&mut self.bits, v),
      Coding::Adaptive => self.table.encode(&mut self.bits, v),
    }
  }

  pub fn bits_written(&self) -> u64 {
    self.bits.bits_written()
  }

  // Flush the underlying bit stream and hand back the inner writer
  pub fn finish(self) -> Result<W> {
    self.bits.finish()
  }
}

pub struct IntReader<R: Read> {
  bits: BitReader<R>,
  coding: Coding,
  table: ShannonFano,
}

impl<R: Read> IntReader<R> {
  pub fn new(bits: BitReader<R>, coding: Coding) -> Self {
    Self {
      bits: bits,
      coding: coding,
      table: ShannonFano::new(),
    }
  }

  pub fn get_uint(&mut self) -> Result<u32> {
    match self.coding {
      Coding::Raw => intcode::get_uint(&mut self.bits),
      Coding::Adaptive => {
        let v = self.table.decode(&mut self.bits)?;
        if v < 0 {
          return Err(CodecError::MalformedInput(format!("negative run length {}", v)));
        }
        Ok(v as u32)
      }
    }
  }

  pub fn get_sint(&mut self) -> Result<i32> {
    match self.coding {
      Coding::Raw => intcode::get_sint(&mut self.bits),
      Coding::Adaptive => self.table.decode(&mut self.bits),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn roundtrip(coding: Coding) {
    let runs: [u32; 6] = [0, 3, 0, 17, 255, 1];
    let vals: [i32; 6] = [-1, 7, -300, 300, 1, -1];

    let mut w = IntWriter::new(BitWriter::new(Vec::new()), coding);
    for (&r, &v) in runs.iter().zip(&vals) {
      w.put_uint(r).unwrap();
      w.put_sint(v).unwrap();
    }
    let buf = w.finish().unwrap();

    let mut r = IntReader::new(BitReader::new(&buf[..]), coding);
    for (&run, &v) in runs.iter().zip(&vals) {
      assert_eq!(r.get_uint().unwrap(), run);
      assert_eq!(r.get_sint().unwrap(), v);
    }
  }

  #[test]
  fn raw_roundtrip() {
    roundtrip(Coding::Raw);
  }

  #[test]
  fn adaptive_roundtrip() {
    roundtrip(Coding::Adaptive);
  }

  #[test]
  fn adaptive_allows_wide_values() {
    let mut w = IntWriter::new(BitWriter::new(Vec::new()), Coding::Adaptive);
    w.put_sint(1 << 20).unwrap();
    w.put_sint(-(1 << 20)).unwrap();
    let buf = w.finish().unwrap();
    let mut r = IntReader::new(BitReader::new(&buf[..]), Coding::Adaptive);
    assert_eq!(r.get_sint().unwrap(), 1 << 20);
    assert_eq!(r.get_sint().unwrap(), -(1 << 20));
  }

  #[test]
  fn raw_range_limit_applies() {
    let mut w = IntWriter::new(BitWriter::new(Vec::new()), Coding::Raw);
    assert!(w.put_uint(100_000).is_err());
  }
}
