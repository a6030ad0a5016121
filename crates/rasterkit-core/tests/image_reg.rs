//! Image buffer regression test
//!
//! Exercises checked access, both scan orders, the histogram and the
//! logical combiner on small synthetic images.

use rasterkit_core::{DimensionPolicy, Error, Image, LogicalOp, Pixel, Ratio, Region};
use rasterkit_test::{RegParams, color_image, constant_image, noise_image};

#[test]
fn image_access_reg() {
    let mut rp = RegParams::new("image_access");

    let mut img = constant_image(4, 3, 10).expect("constant_image");
    rp.compare_values(12.0, img.pixel_count() as f64, 0.0);

    img.set(3, 2, Pixel::rgb(1, 2, 3)).expect("set in bounds");
    let p = img.get(3, 2).expect("get in bounds");
    rp.compare_values(1.0, p.r as f64, 0.0);
    rp.compare_values(3.0, p.b as f64, 0.0);

    for (x, y) in [(4, 0), (0, 3), (u32::MAX, 1)] {
        let err = img.get(x, y).expect_err("get out of bounds");
        rp.compare_values(
            1.0,
            matches!(err, Error::IndexOutOfBounds { .. }) as u8 as f64,
            0.0,
        );
        assert!(img.set(x, y, Pixel::BLACK).is_err());
    }

    assert!(Image::new(0, 5).is_err());
    assert!(Image::from_gray(2, 2, &[1, 2, 3]).is_err());

    assert!(rp.cleanup(), "image_access regression test failed");
}

#[test]
fn image_scan_reg() {
    let mut rp = RegParams::new("image_scan");

    let img = constant_image(3, 2, 0).expect("constant_image");
    let row: Vec<_> = img.scan_row_major(None).collect();
    let col: Vec<_> = img.scan_col_major(None).collect();

    // Row-major: all y for each x. Column-major: all x for each y.
    assert_eq!(row, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    assert_eq!(col, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);

    let scan = img.scan_row_major(None);
    rp.compare_values(6.0, scan.clone().count() as f64, 0.0);
    rp.compare_values(6.0, scan.count() as f64, 0.0);

    // Insets larger than the image are empty, not wrapped.
    for (w, h, m) in [(3, 3, 1), (4, 4, 2), (2, 9, 1), (1, 1, 2)] {
        let region = Region::inset(w, h, m);
        let expected = (w.saturating_sub(2 * m) * h.saturating_sub(2 * m)) as f64;
        rp.compare_values(expected, region.row_major().count() as f64, 0.0);
        rp.compare_values(expected, region.col_major().count() as f64, 0.0);
    }

    assert!(rp.cleanup(), "image_scan regression test failed");
}

#[test]
fn histogram_reg() {
    let mut rp = RegParams::new("histogram");

    let img = noise_image(16, 16, 42).expect("noise_image");
    let hist = img.build_histogram();
    rp.compare_values(256.0, hist.total() as f64, 0.0);

    let map = hist.to_map();
    rp.compare_values(hist.len() as f64, map.len() as f64, 0.0);
    assert!(map.values().all(|&c| c > 0));

    let probs = img.probabilities(&hist).expect("probabilities");
    let total = probs
        .values()
        .try_fold(Ratio::ZERO, |acc, &p| acc.checked_add(p))
        .expect("sum of probabilities");
    assert_eq!(total, Ratio::ONE);

    assert!(rp.cleanup(), "histogram regression test failed");
}

#[test]
fn logical_reg() {
    let mut rp = RegParams::new("logical");

    let a = 0b1011_0110u8;
    let b = 0b0110_1100u8;
    for (op, expected) in [
        (LogicalOp::And, a & b),
        (LogicalOp::Or, a | b),
        (LogicalOp::Xor, a ^ b),
    ] {
        let mut img = constant_image(5, 4, a).expect("constant_image");
        let other = constant_image(5, 4, b).expect("constant_image");
        img.combine(&other, op, DimensionPolicy::Strict)
            .expect("strict combine of equal sizes");
        rp.compare_values(1.0, img.pixels().iter().all(|&p| p == Pixel::gray(expected)) as u8 as f64, 0.0);
    }

    // Clip: the second image covers x < 2 and y < 3 only.
    let mut img = constant_image(4, 4, 0xF0).expect("constant_image");
    let other = constant_image(2, 3, 0x0F).expect("constant_image");
    img.or(&other);
    for (x, y) in img.scan_row_major(None) {
        let expected = if x < 2 && y < 3 { 0xFF } else { 0xF0 };
        rp.compare_values(expected as f64, img.get(x, y).unwrap().value() as f64, 0.0);
    }

    let mut img = constant_image(4, 4, 1).expect("constant_image");
    assert!(matches!(
        img.combine(&other, LogicalOp::And, DimensionPolicy::Strict),
        Err(Error::DimensionMismatch { .. })
    ));

    assert!(rp.cleanup(), "logical regression test failed");
}

#[test]
fn grayscale_reg() {
    let mut rp = RegParams::new("grayscale");

    let mut img = color_image(8, 8).expect("color_image");
    assert!(!img.is_grayscale());
    let src = img.clone();
    img.convert_to_gray();
    assert!(img.is_grayscale());

    for (x, y) in img.scan_row_major(None) {
        let s = src.get(x, y).unwrap();
        let expected = (0.3 * s.r as f64 + 0.59 * s.g as f64 + 0.11 * s.b as f64) as u8;
        rp.compare_values(expected as f64, img.get(x, y).unwrap().value() as f64, 0.0);
    }

    assert!(rp.cleanup(), "grayscale regression test failed");
}
