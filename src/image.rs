// 8-bit greyscale image

use crate::matrix::Matrix;

pub struct Image {
  pixels: Matrix<u8>,
}

impl Image {
  pub fn new(height: usize, width: usize) -> Self {
    assert!(height > 0 && width > 0);
    Self {
      pixels: Matrix::zeroed(height, width),
    }
  }

  pub fn height(&self) -> usize {
    self.pixels.rows()
  }

  pub fn width(&self) -> usize {
    self.pixels.cols()
  }

  pub fn row(&self, j: usize) -> &[u8] {
    &self.pixels[j]
  }

  pub fn row_mut(&mut self, j: usize) -> &mut [u8] {
    &mut self.pixels[j]
  }

  pub fn get(&self, j: usize, i: usize) -> u8 {
    self.pixels[j][i]
  }

  pub fn set(&mut self, j: usize, i: usize, v: u8) {
    self.pixels[j][i] = v;
  }

  /// Pixels widened to a float matrix (the wavelet path works in f32).
  pub fn to_matrix(&self) -> Matrix<f32> {
    Matrix::new_with(self.height(), self.width(), |j, i| self.pixels[j][i] as f32)
  }

  /// Clamp a float matrix to [0, 255], round to nearest, and take the
  /// result as pixels.
  pub fn from_matrix(m: &Matrix<f32>) -> Self {
    let mut image = Image::new(m.rows(), m.cols());
    for j in 0..m.rows() {
      for i in 0..m.cols() {
        image.pixels[j][i] = m[j][i].clamp(0.0, 255.0).round() as u8;
      }
    }
    image
  }
}
