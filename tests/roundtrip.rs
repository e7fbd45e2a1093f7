// End-to-end container round trips through the public pipeline drivers

use tinycodec::codec;
use tinycodec::image::Image;
use tinycodec::pgm;

fn to_pgm(image: &Image) -> Vec<u8> {
  let mut buf = Vec::new();
  pgm::write(&mut buf, image).unwrap();
  buf
}

fn constant_image(h: usize, w: usize, v: u8) -> Image {
  let mut image = Image::new(h, w);
  for j in 0..h {
    for i in 0..w {
      image.set(j, i, v);
    }
  }
  image
}

// 4x4 constant tiles whose values are multiples of 16, so every average
// the wavelet computes stays an integer and nothing is lost to the
// entropy layer's rounding
fn tiled_image(h: usize, w: usize) -> Image {
  let mut image = Image::new(h, w);
  for j in 0..h {
    for i in 0..w {
      image.set(j, i, (16 * (((j / 4) * 5 + i / 4) % 16)) as u8);
    }
  }
  image
}

fn wavelet_roundtrip(image: &Image, quality: f32) -> Image {
  let mut container = Vec::new();
  codec::wavelet_encode(&to_pgm(image)[..], &mut container, quality).unwrap();
  let mut out = Vec::new();
  codec::wavelet_decode(&container[..], &mut out).unwrap();
  pgm::read(&out[..]).unwrap()
}

fn assert_images_equal(a: &Image, b: &Image) {
  assert_eq!(a.height(), b.height());
  assert_eq!(a.width(), b.width());
  for j in 0..a.height() {
    assert_eq!(a.row(j), b.row(j), "row {} differs", j);
  }
}

#[test]
fn wavelet_8x8_lossless_at_quality_one() {
  let image = tiled_image(8, 8);
  let back = wavelet_roundtrip(&image, 1.0);
  assert_images_equal(&image, &back);
}

#[test]
fn wavelet_constant_image_lossless_any_shape() {
  for (h, w) in [(8, 8), (13, 7), (1, 1), (31, 2)] {
    let image = constant_image(h, w, 100);
    let back = wavelet_roundtrip(&image, 1.0);
    assert_images_equal(&image, &back);
  }
}

#[test]
fn wavelet_tiled_image_lossless_at_quality_one() {
  let image = tiled_image(32, 16);
  let back = wavelet_roundtrip(&image, 1.0);
  assert_images_equal(&image, &back);
}

#[test]
fn wavelet_lossy_stays_in_the_neighbourhood() {
  // Smooth ramp; a lossy quality must still decode to something close
  let mut image = Image::new(16, 16);
  for j in 0..16 {
    for i in 0..16 {
      image.set(j, i, (8 * (j + i)) as u8);
    }
  }
  let back = wavelet_roundtrip(&image, 8.0);
  for j in 0..16 {
    for i in 0..16 {
      let delta = (back.get(j, i) as i32 - image.get(j, i) as i32).abs();
      assert!(delta <= 32, "pixel ({}, {}) off by {}", j, i, delta);
    }
  }
}

#[test]
fn wavelet_container_is_smaller_for_flat_images() {
  let image = constant_image(64, 64, 200);
  let mut container = Vec::new();
  codec::wavelet_encode(&to_pgm(&image)[..], &mut container, 1.0).unwrap();
  // 4096 pixels collapse to a couple of RLE events plus the header
  assert!(container.len() < 64, "container is {} bytes", container.len());
}

#[test]
fn dct_entropy_roundtrip_zero_quality() {
  let image = tiled_image(16, 16);
  let mut container = Vec::new();
  codec::dct_encode(&to_pgm(&image)[..], &mut container, 8, 0).unwrap();
  let mut out = Vec::new();
  codec::dct_decode(&container[..], &mut out).unwrap();
  let back = pgm::read(&out[..]).unwrap();
  // Coefficients are rounded to integers by the entropy layer, so allow a
  // small reconstruction error
  for j in 0..16 {
    for i in 0..16 {
      let delta = (back.get(j, i) as i32 - image.get(j, i) as i32).abs();
      assert!(delta <= 4, "pixel ({}, {}) off by {}", j, i, delta);
    }
  }
}

#[test]
fn dct_entropy_roundtrip_ragged_size() {
  let image = tiled_image(10, 13);
  let mut container = Vec::new();
  codec::dct_encode(&to_pgm(&image)[..], &mut container, 8, 2).unwrap();
  let mut out = Vec::new();
  codec::dct_decode(&container[..], &mut out).unwrap();
  let back = pgm::read(&out[..]).unwrap();
  assert_eq!(back.height(), 10);
  assert_eq!(back.width(), 13);
}
