// Recursive separable wavelet transform (Haar-style average/difference)
//
// One 1-D step maps the input to averages, an optional middle carry, then
// differences:
//
//   A                A
//   A B              (A+B)/2 (A-B)/2
//   A B C            (A+B)/2    C    (A-B)/2
//   A B C D          (A+B)/2 (C+D)/2 (A-B)/2 (C-D)/2
//   A B C D E        (A+B)/2 (C+D)/2    E    (A-B)/2 (C-D)/2
//
// The 2-D transform runs the step over rows, transposes, runs it again,
// transposes back, then recurses on the low-pass top-left quadrant until a
// single average pixel remains. On an 8x8 image the result is laid out as:
//
//   M    F1H  F2H  F2H  F3H  F3H  F3H  F3H
//   F1V  F1HV F2H  F2H  F3H  F3H  F3H  F3H
//   F2V  F2V  F2HV F2HV F3H  F3H  F3H  F3H
//   F2V  F2V  F2HV F2HV F3H  F3H  F3H  F3H
//   F3V  F3V  F3V  F3V  F3HV F3HV F3HV F3HV
//   ...
//
// where M is the global average and F3 is the highest frequency band.

use crate::matrix::Matrix;

pub fn forward_1d(input: &[f32], output: &mut [f32]) {
  assert!(input.len() == output.len());
  let n = input.len();
  let half = n / 2;
  for i in 0..half {
    output[i] = (input[2 * i] + input[2 * i + 1]) / 2.0;
  }
  if n % 2 == 1 {
    output[half] = input[n - 1];
  }
  for i in 0..half {
    output[half + n % 2 + i] = (input[2 * i] - input[2 * i + 1]) / 2.0;
  }
}

// Restore pairs as (avg + diff, avg - diff); for odd lengths the
// differences sit one slot further right, past the carried middle element,
// which moves back to the end
pub fn inverse_1d(input: &[f32], output: &mut [f32]) {
  assert!(input.len() == output.len());
  let n = input.len();
  let half = n / 2;
  for i in 0..half {
    let avg = input[i];
    let diff = input[half + n % 2 + i];
    output[2 * i] = avg + diff;
    output[2 * i + 1] = avg - diff;
  }
  if n % 2 == 1 {
    output[n - 1] = input[half];
  }
}

// Scratch space for the 2-D passes: one matrix per orientation, full size,
// reused by every level
struct Scratch {
  rows: Matrix<f32>,
  tcols: Matrix<f32>,
  tdone: Matrix<f32>,
}

impl Scratch {
  fn for_image(image: &Matrix<f32>) -> Self {
    let (h, w) = (image.rows(), image.cols());
    Self {
      rows: Matrix::zeroed(h, w),
      tcols: Matrix::zeroed(w, h),
      tdone: Matrix::zeroed(w, h),
    }
  }
}

// One level: rows, transpose, rows again (previously the columns),
// transpose back. Only the h x w active region is touched.
fn forward_level(image: &mut Matrix<f32>, s: &mut Scratch, h: usize, w: usize) {
  for j in 0..h {
    forward_1d(&image[j][..w], &mut s.rows[j][..w]);
  }
  s.rows.transpose_partial_into(&mut s.tcols, h, w);
  for i in 0..w {
    forward_1d(&s.tcols[i][..h], &mut s.tdone[i][..h]);
  }
  s.tdone.transpose_partial_into(image, w, h);
}

fn inverse_level(image: &mut Matrix<f32>, s: &mut Scratch, h: usize, w: usize) {
  for j in 0..h {
    inverse_1d(&image[j][..w], &mut s.rows[j][..w]);
  }
  s.rows.transpose_partial_into(&mut s.tcols, h, w);
  for i in 0..w {
    inverse_1d(&s.tcols[i][..h], &mut s.tdone[i][..h]);
  }
  s.tdone.transpose_partial_into(image, w, h);
}

pub fn forward_2d(image: &mut Matrix<f32>) {
  let mut s = Scratch::for_image(image);
  let mut h = image.rows();
  let mut w = image.cols();
  while h > 1 || w > 1 {
    forward_level(image, &mut s, h, w);
    h = (h + 1) / 2;
    w = (w + 1) / 2;
  }
}

// The inverse unwinds from the 1x1 low-pass region outward, so it recurses
// before undoing the level at hand
fn inverse_2d_from(image: &mut Matrix<f32>, s: &mut Scratch, h: usize, w: usize) {
  if h > 1 || w > 1 {
    inverse_2d_from(image, s, (h + 1) / 2, (w + 1) / 2);
    inverse_level(image, s, h, w);
  }
}

pub fn inverse_2d(image: &mut Matrix<f32>) {
  let mut s = Scratch::for_image(image);
  inverse_2d_from(image, &mut s, image.rows(), image.cols());
}

// Sub-band quantization. The starting quality applies to the highest
// frequency band; each step inward divides the quality by 8, never going
// below 1. Quality 1 changes nothing. The active region shrinks by
// h/2 + 1, one more than the transform's own recursion, so adjacent levels
// overlap by a row and column; the dequantizer walks the same region
// bounds, which keeps the two in agreement.
pub fn quantize(image: &mut Matrix<f32>, quality: f32) {
  let mut h = image.rows();
  let mut w = image.cols();
  let mut q = quality;
  while q > 1.0 && (h > 1 || w > 1) {
    let half_h = h / 2 + 1;
    let half_w = w / 2 + 1;
    for j in 0..h {
      for i in 0..w {
        if j > half_h || i > half_w {
          image[j][i] /= q;
        }
      }
    }
    h = half_h;
    w = half_w;
    q /= 8.0;
  }
}

pub fn dequantize(image: &mut Matrix<f32>, quality: f32) {
  let mut h = image.rows();
  let mut w = image.cols();
  let mut q = quality;
  while q > 1.0 && (h > 1 || w > 1) {
    let half_h = h / 2 + 1;
    let half_w = w / 2 + 1;
    for j in 0..h {
      for i in 0..w {
        if j > half_h || i > half_w {
          image[j][i] *= q;
        }
      }
    }
    h = half_h;
    w = half_w;
    q /= 8.0;
  }
}

// Flatten the coefficients highest band first, row-major within each band,
// ending with the single average coefficient. Runs of zeros then cluster
// nicely for the RLE layer.
pub fn linearize(image: &Matrix<f32>) -> Vec<f32> {
  let mut out = Vec::with_capacity(image.rows() * image.cols());
  let mut h = image.rows();
  let mut w = image.cols();
  while h != 1 || w != 1 {
    for j in 0..h {
      for i in 0..w {
        if j >= (h + 1) / 2 || i >= (w + 1) / 2 {
          out.push(image[j][i]);
        }
      }
    }
    h = (h + 1) / 2;
    w = (w + 1) / 2;
  }
  out.push(image[0][0]);
  debug_assert!(out.len() == image.rows() * image.cols());
  out
}

pub fn delinearize(data: &[f32], image: &mut Matrix<f32>) {
  assert!(data.len() == image.rows() * image.cols());
  let mut next = data.iter();
  let mut h = image.rows();
  let mut w = image.cols();
  while h != 1 || w != 1 {
    for j in 0..h {
      for i in 0..w {
        if j >= (h + 1) / 2 || i >= (w + 1) / 2 {
          image[j][i] = *next.next().unwrap();
        }
      }
    }
    h = (h + 1) / 2;
    w = (w + 1) / 2;
  }
  image[0][0] = *next.next().unwrap();
}
