// Psychoacoustic masking of audio DCT bins
//
// A strong frequency masks a weaker neighbour; how much weaker it may be
// grows with the distance between the two bins. The rule used here is a
// crude stand-in for the tabulated masking curves real codecs use: for
// bins F1 < F2 with amplitudes A1, A2, the weaker side is cancelled when
//
//   c * |A1| < |A2 / (F2 - F1)|      (A1 is masked)
//   c * |A2| < |A1 / (F2 - F1)|      (A2 is masked)
//
// Larger c cancels more aggressively. Bin 0 carries the frame average and
// is never cancelled. Amplitudes are read at the moment each pair is
// inspected, so a bin zeroed early masks nothing later.

use crate::dct::DctBasis;

pub fn mask(dct: &mut [f64], c: f64) {
  let n = dct.len();
  for f1 in 1..n {
    for f2 in (f1 + 1)..n {
      let a1 = dct[f1];
      let a2 = dct[f2];
      let dist = (f2 - f1) as f64;
      if c * a1.abs() < (a2 / dist).abs() {
        dct[f1] = 0.0;
      } else if c * a2.abs() < (a1 / dist).abs() {
        dct[f2] = 0.0;
      }
    }
  }
}

/// Filter one frame of samples: forward DCT, mask, inverse DCT in place.
pub fn filter_frame(basis: &DctBasis, samples: &mut [f64], c: f64) {
  assert!(samples.len() == basis.size());
  let mut freq = vec![0.0f64; samples.len()];
  basis.forward_1d(samples, &mut freq);
  mask(&mut freq, c);
  basis.inverse_1d(&freq, samples);
}
