// Blocked 2-D DCT over an image (the JPEG-like path)
//
// The image is tiled in raster order by steps of the block size; each tile
// is transformed independently. Edge tiles hanging over the image boundary
// are zero-padded on the way in, and the overhanging pixels are dropped on
// the way out.

use std::io::prelude::*;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::dct;
use crate::error::Result;
use crate::image::Image;
use crate::matrix::Matrix;

// Scalar quantization with a diagonal-dependent step: coefficient (j, i)
// uses step 1 + (i+j+1)*q, so high-diagonal (high-frequency) coefficients
// are attenuated hardest. q = 0 keeps every coefficient intact.
pub fn quantize(block: &mut Matrix<f64>, quality: u32) {
  for j in 0..block.rows() {
    for i in 0..block.cols() {
      let step = (1 + (i + j + 1) * quality as usize) as f64;
      block[j][i] /= step;
    }
  }
}

pub fn dequantize(block: &mut Matrix<f64>, quality: u32) {
  for j in 0..block.rows() {
    for i in 0..block.cols() {
      let step = (1 + (i + j + 1) * quality as usize) as f64;
      block[j][i] *= step;
    }
  }
}

// Copy the n x n tile at (y0, x0) into `block`, zero-padding outside the
// image
fn extract_block(image: &Image, y0: usize, x0: usize, block: &mut Matrix<f64>) {
  let n = block.rows();
  for j in 0..n {
    for i in 0..n {
      block[j][i] = if y0 + j < image.height() && x0 + i < image.width() {
        image.get(y0 + j, x0 + i) as f64
      } else {
        0.0
      };
    }
  }
}

// Inverse of extract_block: pixels overhanging the image are dropped,
// everything else is clamped to [0, 255] and rounded
fn insert_block(image: &mut Image, y0: usize, x0: usize, block: &Matrix<f64>) {
  let n = block.rows();
  for j in 0..n {
    for i in 0..n {
      if y0 + j < image.height() && x0 + i < image.width() {
        image.set(y0 + j, x0 + i, block[j][i].clamp(0.0, 255.0).round() as u8);
      }
    }
  }
}

// Raw coefficient container: block-major n x n little-endian f32 words,
// no framing header. Useful for inspecting the transform output.
pub fn compress_image<W: Write>(image: &Image, n: usize, quality: u32, out: &mut W) -> Result<()> {
  let basis = dct::basis(n);
  let mut block = Matrix::zeroed(n, n);
  let mut scratch = Matrix::zeroed(n, n);
  for y0 in (0..image.height()).step_by(n) {
    for x0 in (0..image.width()).step_by(n) {
      extract_block(image, y0, x0, &mut block);
      basis.forward_block(&mut block, &mut scratch);
      quantize(&mut block, quality);
      for j in 0..n {
        for i in 0..n {
          out.write_f32::<LittleEndian>(block[j][i] as f32)?;
        }
      }
    }
  }
  Ok(())
}

// The container has no header, so the caller supplies the image shape and
// the settings the coefficients were produced with
pub fn decompress_image<R: Read>(
  inp: &mut R,
  height: usize,
  width: usize,
  n: usize,
  quality: u32,
) -> Result<Image> {
  let basis = dct::basis(n);
  let mut image = Image::new(height, width);
  let mut block = Matrix::zeroed(n, n);
  let mut scratch = Matrix::zeroed(n, n);
  for y0 in (0..height).step_by(n) {
    for x0 in (0..width).step_by(n) {
      for j in 0..n {
        for i in 0..n {
          block[j][i] = inp.read_f32::<LittleEndian>()? as f64;
        }
      }
      dequantize(&mut block, quality);
      basis.inverse_block(&mut block, &mut scratch);
      insert_block(&mut image, y0, x0, &block);
    }
  }
  Ok(image)
}

// Zigzag successor scan of an n x n block, built one anti-diagonal at a
// time with alternating direction. Low-diagonal coefficients come first,
// which front-loads the significant values for the RLE layer.
pub fn zigzag(n: usize) -> Vec<(usize, usize)> {
  assert!(n > 0);
  let mut scan = Vec::with_capacity(n * n);
  for s in 0..(2 * n - 1) {
    if s % 2 == 0 {
      // Walk up-right
      let mut y = s.min(n - 1);
      let mut x = s - y;
      loop {
        scan.push((y, x));
        if y == 0 || x == n - 1 {
          break;
        }
        y -= 1;
        x += 1;
      }
    } else {
      // Walk down-left
      let mut x = s.min(n - 1);
      let mut y = s - x;
      loop {
        scan.push((y, x));
        if x == 0 || y == n - 1 {
          break;
        }
        x -= 1;
        y += 1;
      }
    }
  }
  scan
}

// Transform and quantize every tile, emitting coefficients in zigzag order
// into one flat buffer, ready for the RLE + entropy pipeline
pub fn transform_image(image: &Image, n: usize, quality: u32) -> Vec<f32> {
  let basis = dct::basis(n);
  let scan = zigzag(n);
  let mut block = Matrix::zeroed(n, n);
  let mut scratch = Matrix::zeroed(n, n);
  let mut coeffs = Vec::new();
  for y0 in (0..image.height()).step_by(n) {
    for x0 in (0..image.width()).step_by(n) {
      extract_block(image, y0, x0, &mut block);
      basis.forward_block(&mut block, &mut scratch);
      quantize(&mut block, quality);
      for &(j, i) in &scan {
        coeffs.push(block[j][i] as f32);
      }
    }
  }
  coeffs
}

// Inverse of transform_image over a flat coefficient buffer
pub fn untransform_image(coeffs: &[f32], height: usize, width: usize, n: usize, quality: u32) -> Image {
  let blocks = ((height + n - 1) / n) * ((width + n - 1) / n);
  assert!(coeffs.len() == blocks * n * n);
  let basis = dct::basis(n);
  let scan = zigzag(n);
  let mut image = Image::new(height, width);
  let mut block = Matrix::zeroed(n, n);
  let mut scratch = Matrix::zeroed(n, n);
  let mut next = coeffs.iter();
  for y0 in (0..height).step_by(n) {
    for x0 in (0..width).step_by(n) {
      for &(j, i) in &scan {
        block[j][i] = *next.next().unwrap() as f64;
      }
      dequantize(&mut block, quality);
      basis.inverse_block(&mut block, &mut scratch);
      insert_block(&mut image, y0, x0, &block);
    }
  }
  image
}

#[cfg(test)]
mod tests {
  use super::*;

  fn gradient(h: usize, w: usize) -> Image {
    let mut image = Image::new(h, w);
    for j in 0..h {
      for i in 0..w {
        image.set(j, i, ((j * 19 + i * 3) % 256) as u8);
      }
    }
    image
  }

  #[test]
  fn quantize_zero_quality_is_identity() {
    let mut block = Matrix::new_with(8, 8, |j, i| (j * 8 + i) as f64 - 12.5);
    let orig = block.clone();
    quantize(&mut block, 0);
    for j in 0..8 {
      assert_eq!(&block[j], &orig[j]);
    }
  }

  #[test]
  fn quantize_steps_grow_along_diagonals() {
    let mut block = Matrix::new_with(4, 4, |_, _| 60.0f64);
    quantize(&mut block, 2);
    // step at (0,0) is 3, at (3,3) is 15
    assert!((block[0][0] - 20.0).abs() < 1e-12);
    assert!((block[3][3] - 4.0).abs() < 1e-12);
    dequantize(&mut block, 2);
    assert!((block[0][0] - 60.0).abs() < 1e-12);
    assert!((block[3][3] - 60.0).abs() < 1e-12);
  }

  #[test]
  fn raw_container_roundtrip_lossless_at_zero_quality() {
    let image = gradient(16, 16);
    let mut buf = Vec::new();
    compress_image(&image, 8, 0, &mut buf).unwrap();
    assert_eq!(buf.len(), 16 * 16 * 4);
    let back = decompress_image(&mut &buf[..], 16, 16, 8, 0).unwrap();
    for j in 0..16 {
      assert_eq!(back.row(j), image.row(j));
    }
  }

  #[test]
  fn raw_container_handles_ragged_edges() {
    // 10x13 with 8x8 blocks: both edges have partial tiles
    let image = gradient(10, 13);
    let mut buf = Vec::new();
    compress_image(&image, 8, 0, &mut buf).unwrap();
    // 2x2 blocks of 64 coefficients each
    assert_eq!(buf.len(), 4 * 64 * 4);
    let back = decompress_image(&mut &buf[..], 10, 13, 8, 0).unwrap();
    for j in 0..10 {
      assert_eq!(back.row(j), image.row(j));
    }
  }

  #[test]
  fn zigzag_4x4_order() {
    let scan = zigzag(4);
    let expect = [
      (0, 0), (0, 1), (1, 0), (2, 0), (1, 1), (0, 2), (0, 3), (1, 2),
      (2, 1), (3, 0), (3, 1), (2, 2), (1, 3), (2, 3), (3, 2), (3, 3),
    ];
    assert_eq!(scan, expect);
  }

  #[test]
  fn zigzag_visits_every_cell_once() {
    for n in [1, 2, 3, 5, 8] {
      let mut seen = vec![false; n * n];
      for (j, i) in zigzag(n) {
        assert!(!seen[j * n + i]);
        seen[j * n + i] = true;
      }
      assert!(seen.iter().all(|&s| s));
    }
  }

  #[test]
  fn zigzag_flat_roundtrip_stays_close() {
    let image = gradient(16, 16);
    let coeffs = transform_image(&image, 8, 0);
    assert_eq!(coeffs.len(), 16 * 16);
    // Simulate the entropy layer's integer rounding
    let rounded: Vec<f32> = coeffs.iter().map(|c| c.round()).collect();
    let back = untransform_image(&rounded, 16, 16, 8, 0);
    for j in 0..16 {
      for i in 0..16 {
        let delta = (back.get(j, i) as i32 - image.get(j, i) as i32).abs();
        assert!(delta <= 4, "pixel ({}, {}) off by {}", j, i, delta);
      }
    }
  }
}
