// Educational lossy codec for greyscale images and audio frames
//
// Two transform paths are provided. The blocked DCT path tiles the image
// into N x N blocks and transforms each independently, JPEG-style. The
// wavelet path applies a Haar-style average/difference lift recursively on
// the low-frequency band, quantizes per sub-band, and entropy-codes the
// result with an adaptive Shannon-Fano coder; this is what the `ondelette`
// and `ondelette_inv` binaries speak.

pub mod bitio;
pub mod blockdct;
pub mod codec;
pub mod dct;
pub mod error;
pub mod image;
pub mod intcode;
pub mod intstream;
pub mod matrix;
pub mod pgm;
pub mod psycho;
pub mod rle;
pub mod shannon;
pub mod wavelet;

pub use error::{CodecError, Result};
