use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;

/// Wavelet image compressor: reads a PGM image on stdin and writes the
/// compressed container on stdout.
#[derive(Parser)]
#[command(name = "ondelette", version)]
struct Args {
  /// Quantization quality; 1 is lossless, larger is lossier
  quality: f32,
}

fn main() -> ExitCode {
  env_logger::init();
  let args = Args::parse();

  let stdin = io::stdin().lock();
  let stdout = BufWriter::new(io::stdout().lock());
  match tinycodec::codec::wavelet_encode(stdin, stdout, args.quality) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("ondelette: {}", e);
      ExitCode::FAILURE
    }
  }
}
