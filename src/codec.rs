// Compression pipeline drivers
//
// The wavelet container is a 12-byte little-endian header (height and
// width as i32, quality as f32) followed by the Shannon-Fano bit stream of
// RLE events. The entropy-coded DCT container carries the block size as a
// fourth header word; quality is an integer there.

use std::io::prelude::*;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, info};

use crate::bitio::{BitReader, BitWriter};
use crate::blockdct;
use crate::error::{CodecError, Result};
use crate::image::Image;
use crate::intstream::{Coding, IntReader, IntWriter};
use crate::matrix::Matrix;
use crate::pgm;
use crate::rle;
use crate::wavelet;

// Keep decode allocations sane in the face of garbage headers
const MAX_DIMENSION: usize = 65536;

fn read_dimension<R: Read>(inp: &mut R, what: &'static str) -> Result<usize> {
  let v = inp
    .read_i32::<LittleEndian>()
    .map_err(|_| CodecError::MalformedInput(format!("short header ({})", what)))?;
  if v <= 0 || v as usize > MAX_DIMENSION {
    return Err(CodecError::MalformedInput(format!("bad {} {}", what, v)));
  }
  Ok(v as usize)
}

/// Compress a PGM stream into the wavelet container.
pub fn wavelet_encode<R: Read, W: Write>(input: R, mut output: W, quality: f32) -> Result<()> {
  let image = pgm::read(input)?;
  info!("wavelet compression, image {}x{}", image.width(), image.height());

  output.write_i32::<LittleEndian>(image.height() as i32)?;
  output.write_i32::<LittleEndian>(image.width() as i32)?;
  output.write_f32::<LittleEndian>(quality)?;

  let mut m = image.to_matrix();
  wavelet::forward_2d(&mut m);
  info!("quantization, quality = {}", quality);
  wavelet::quantize(&mut m, quality);

  let coeffs = wavelet::linearize(&m);
  let mut ints = IntWriter::new(BitWriter::new(output), Coding::Adaptive);
  rle::compress(&mut ints, &coeffs)?;
  debug!("entropy coder wrote {} bits", ints.bits_written());

  let mut output = ints.finish()?;
  output.flush()?;
  Ok(())
}

/// Decompress the wavelet container back into a PGM stream.
pub fn wavelet_decode<R: Read, W: Write>(mut input: R, output: W) -> Result<()> {
  let height = read_dimension(&mut input, "height")?;
  let width = read_dimension(&mut input, "width")?;
  let quality = input
    .read_f32::<LittleEndian>()
    .map_err(|_| CodecError::MalformedInput("short header (quality)".into()))?;
  if !quality.is_finite() || quality < 0.0 {
    return Err(CodecError::MalformedInput(format!("bad quality {}", quality)));
  }
  info!("wavelet decompression, image {}x{}", width, height);

  let mut coeffs = vec![0.0f32; height * width];
  let mut ints = IntReader::new(BitReader::new(input), Coding::Adaptive);
  rle::decompress(&mut ints, &mut coeffs)?;

  let mut m = Matrix::zeroed(height, width);
  wavelet::delinearize(&coeffs, &mut m);
  info!("dequantization, quality = {}", quality);
  wavelet::dequantize(&mut m, quality);
  wavelet::inverse_2d(&mut m);

  pgm::write(output, &Image::from_matrix(&m))?;
  Ok(())
}

/// Compress a PGM stream with the blocked DCT path, feeding the quantized
/// blocks through the same RLE + entropy pipeline as the wavelet path.
pub fn dct_encode<R: Read, W: Write>(input: R, mut output: W, n: usize, quality: u32) -> Result<()> {
  let image = pgm::read(input)?;
  info!("DCT compression, image {}x{}, {}x{} blocks", image.width(), image.height(), n, n);

  output.write_i32::<LittleEndian>(image.height() as i32)?;
  output.write_i32::<LittleEndian>(image.width() as i32)?;
  output.write_i32::<LittleEndian>(n as i32)?;
  output.write_i32::<LittleEndian>(quality as i32)?;

  let coeffs = blockdct::transform_image(&image, n, quality);
  let mut ints = IntWriter::new(BitWriter::new(output), Coding::Adaptive);
  rle::compress(&mut ints, &coeffs)?;
  debug!("entropy coder wrote {} bits", ints.bits_written());

  let mut output = ints.finish()?;
  output.flush()?;
  Ok(())
}

/// Inverse of [`dct_encode`].
pub fn dct_decode<R: Read, W: Write>(mut input: R, output: W) -> Result<()> {
  let height = read_dimension(&mut input, "height")?;
  let width = read_dimension(&mut input, "width")?;
  let n = read_dimension(&mut input, "block size")?;
  let quality = input
    .read_i32::<LittleEndian>()
    .map_err(|_| CodecError::MalformedInput("short header (quality)".into()))?;
  if quality < 0 {
    return Err(CodecError::MalformedInput(format!("bad quality {}", quality)));
  }
  info!("DCT decompression, image {}x{}, {}x{} blocks", width, height, n, n);

  let blocks_y = (height + n - 1) / n;
  let blocks_x = (width + n - 1) / n;
  let mut coeffs = vec![0.0f32; blocks_y * blocks_x * n * n];
  let mut ints = IntReader::new(BitReader::new(input), Coding::Adaptive);
  rle::decompress(&mut ints, &mut coeffs)?;

  let image = blockdct::untransform_image(&coeffs, height, width, n, quality as u32);
  pgm::write(output, &image)?;
  Ok(())
}
