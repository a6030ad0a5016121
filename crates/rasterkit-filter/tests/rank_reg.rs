//! Rank filter regression test
//!
//! Median and mode over the fixed 5x5 window:
//!   (1) a single bright impulse is removed by both filters
//!   (2) the median of 25 distinct values is sorted index 12
//!   (3) the mode of a window with a strict majority is that value
//!   (4) the 2-pixel border is never modified

use rasterkit_core::{Image, Region};
use rasterkit_filter::{RANK_RADIUS, RankStat, median_filter, mode_filter, rank_filter};
use rasterkit_test::{RegParams, gray_image, impulse_image, noise_image};

#[test]
fn rank_reg_impulse() {
    let mut rp = RegParams::new("rank_impulse");

    for stat in [RankStat::Median, RankStat::Mode] {
        let mut img = impulse_image(5, 5, 2, 2, 255).expect("impulse_image");
        rank_filter(&mut img, stat);
        rp.compare_values(0.0, img.get(2, 2).unwrap().value() as f64, 0.0);
        rp.compare_values(0.0, img.build_histogram().count(255) as f64, 0.0);
    }

    assert!(rp.cleanup(), "rank_impulse regression test failed");
}

#[test]
fn rank_reg_median_distinct() {
    let mut rp = RegParams::new("rank_median_distinct");

    // 25 distinct values, laid out in reverse order.
    let values: Vec<u8> = (0..25u8).rev().map(|v| v * 3 + 7).collect();
    let mut sorted = values.clone();
    sorted.sort_unstable();

    let mut img = gray_image(5, 5, &values).expect("gray_image");
    median_filter(&mut img);
    rp.compare_values(sorted[12] as f64, img.get(2, 2).unwrap().value() as f64, 0.0);

    assert!(rp.cleanup(), "rank_median_distinct regression test failed");
}

#[test]
fn rank_reg_mode_majority() {
    let mut rp = RegParams::new("rank_mode_majority");

    // 13 of 25 pixels hold 77; the rest are distinct.
    let mut values: Vec<u8> = (0..12u8).map(|v| v * 20).collect();
    values.extend([77u8; 13]);
    let mut img = gray_image(5, 5, &values).expect("gray_image");
    mode_filter(&mut img);
    rp.compare_values(77.0, img.get(2, 2).unwrap().value() as f64, 0.0);

    assert!(rp.cleanup(), "rank_mode_majority regression test failed");
}

#[test]
fn rank_reg_border() {
    let mut rp = RegParams::new("rank_border");

    let src = noise_image(11, 9, 5).expect("noise_image");
    let interior = Region::inset(11, 9, RANK_RADIUS);
    let filters: [fn(&mut Image); 2] = [median_filter, mode_filter];
    for filter in filters {
        let mut img = src.clone();
        filter(&mut img);
        for (x, y) in img.scan_row_major(None) {
            if !interior.contains(x, y) {
                rp.compare_values(
                    src.get(x, y).unwrap().value() as f64,
                    img.get(x, y).unwrap().value() as f64,
                    0.0,
                );
            }
        }
    }

    assert!(rp.cleanup(), "rank_border regression test failed");
}
