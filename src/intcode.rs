// Static variable-length integer code
//
// A value in 0..=32767 is written as a prefix naming its bit width,
// followed by the value with its leading 1 bit removed:
//
//  width |  prefix  | values coded | suffix bits
//    0   |    00    | 0            | none
//    1   |    010   | 1            | none
//    2   |    011   | 2..4         | 1
//    3   |   1000   | 4..8         | 2
//   ...  |   ...    | ...          | ...
//   15   |  111111  | 16384..32768 | 14

use std::io::prelude::*;

use crate::bitio::{BitReader, BitWriter};
use crate::error::{CodecError, Result};

pub const MAX_VALUE: u32 = 32767;

const PREFIXES: [&str; 16] = [
  "00", "010", "011", "1000", "1001", "1010", "1011", "11000", "11001",
  "11010", "11011", "11100", "11101", "11110", "111110", "111111",
];

// Number of bits needed to write v (0 for v == 0)
fn bit_width(v: u32) -> usize {
  (32 - v.leading_zeros()) as usize
}

pub fn put_uint<W: Write>(bits: &mut BitWriter<W>, v: u32) -> Result<()> {
  if v > MAX_VALUE {
    return Err(CodecError::OutOfRange(v as i64));
  }
  let k = bit_width(v);
  bits.write_bit_string(PREFIXES[k])?;
  if k > 0 {
    bits.write_bits(v, (k - 1) as u32)?;
  }
  Ok(())
}

pub fn get_uint<R: Read>(bits: &mut BitReader<R>) -> Result<u32> {
  // The prefixes form a prefix-free set, so read bits until the
  // accumulated code matches one of them (6 bits at most)
  let mut code = String::with_capacity(6);
  loop {
    code.push(if bits.read_bit()? == 0 { '0' } else { '1' });
    if let Some(k) = PREFIXES.iter().position(|p| *p == code) {
      if k == 0 {
        return Ok(0);
      }
      let suffix = bits.read_bits((k - 1) as u32)?;
      return Ok((1 << (k - 1)) | suffix);
    }
    if code.len() >= 6 {
      return Err(CodecError::Invariant("unknown integer code prefix"));
    }
  }
}

// Signed variant: a sign bit first (0 positive, 1 negative), then the
// magnitude as above. Negative values are biased by -v-1 so that -1 shares
// the magnitude 0 slot with nothing (0 is always written as positive):
//    1 --> 0 1
//    0 --> 0 0
//   -1 --> 1 0
//   -2 --> 1 1
pub fn put_sint<W: Write>(bits: &mut BitWriter<W>, v: i32) -> Result<()> {
  if v < 0 {
    bits.write_bit(1)?;
    let mag = -(v as i64) - 1;
    if mag > MAX_VALUE as i64 {
      return Err(CodecError::OutOfRange(v as i64));
    }
    put_uint(bits, mag as u32)
  } else {
    bits.write_bit(0)?;
    put_uint(bits, v as u32)
  }
}

pub fn get_sint<R: Read>(bits: &mut BitReader<R>) -> Result<i32> {
  if bits.read_bit()? == 1 {
    Ok(-(get_uint(bits)? as i32) - 1)
  } else {
    Ok(get_uint(bits)? as i32)
  }
}
