// Orthonormal DCT-II basis and its application to vectors and blocks
//
// The basis matrix is expensive to build relative to applying it, so it is
// computed at most once per block size and shared for the rest of the
// process. The inverse transform is just the transpose.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::{Arc, Mutex, OnceLock};

use crate::matrix::Matrix;

pub struct DctBasis {
  n: usize,
  fwd: Matrix<f64>,
  inv: Matrix<f64>,
}

impl DctBasis {
  // Row 0 is the constant 1/sqrt(N) vector; row j > 0 samples
  // sqrt(2/N) * cos((2i+1) * j * pi / 2N). This makes the matrix
  // orthonormal, so the inverse transform is the transpose.
  fn new(n: usize) -> Self {
    assert!(n > 0);
    let sqrt_n = (n as f64).sqrt();
    let scale = (2.0 / n as f64).sqrt();
    let fwd = Matrix::new_with(n, n, |j, i| {
      if j == 0 {
        1.0 / sqrt_n
      } else {
        scale * (((2 * i + 1) * j) as f64 * PI / (2.0 * n as f64)).cos()
      }
    });
    let mut inv = Matrix::zeroed(n, n);
    fwd.transpose_into(&mut inv);
    Self { n: n, fwd: fwd, inv: inv }
  }

  pub fn size(&self) -> usize {
    self.n
  }

  pub fn forward_1d(&self, input: &[f64], output: &mut [f64]) {
    self.fwd.matvec(input, output);
  }

  pub fn inverse_1d(&self, input: &[f64], output: &mut [f64]) {
    self.inv.matvec(input, output);
  }

  // In-place 2-D transform of an N x N block: D * B * Dt.
  // The triple product needs an intermediate, hence the scratch block.
  pub fn forward_block(&self, block: &mut Matrix<f64>, scratch: &mut Matrix<f64>) {
    assert!(block.rows() == self.n && block.cols() == self.n);
    self.fwd.matmul_into(block, scratch);
    scratch.matmul_into(&self.inv, block);
  }

  // Inverse of the above: Dt * B * D
  pub fn inverse_block(&self, block: &mut Matrix<f64>, scratch: &mut Matrix<f64>) {
    assert!(block.rows() == self.n && block.cols() == self.n);
    self.inv.matmul_into(block, scratch);
    scratch.matmul_into(&self.fwd, block);
  }
}

static BASES: OnceLock<Mutex<HashMap<usize, Arc<DctBasis>>>> = OnceLock::new();

/// Basis for size `n`, built on first use and cached for the process
/// lifetime. Safe to call from multiple threads.
pub fn basis(n: usize) -> Arc<DctBasis> {
  let cache = BASES.get_or_init(|| Mutex::new(HashMap::new()));
  let mut cache = cache.lock().unwrap();
  cache.entry(n).or_insert_with(|| Arc::new(DctBasis::new(n))).clone()
}
