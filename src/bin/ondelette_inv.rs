use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;

use clap::Parser;

/// Wavelet image decompressor: reads a compressed container on stdin and
/// writes the reconstructed PGM image on stdout.
#[derive(Parser)]
#[command(name = "ondelette_inv", version)]
struct Args {}

fn main() -> ExitCode {
  env_logger::init();
  let _ = Args::parse();

  let stdin = BufReader::new(io::stdin().lock());
  let stdout = BufWriter::new(io::stdout().lock());
  match tinycodec::codec::wavelet_decode(stdin, stdout) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("ondelette_inv: {}", e);
      ExitCode::FAILURE
    }
  }
}
