//! Palette regression test
//!
//! Tests global palette construction across several frames: the palette
//! bound, index range, determinism, transparent slot handling and
//! display ordering.

use spritegif_color::{
    MedianCutQuantizer, Palette, Quantizer, SampleOptions, collect_samples,
    has_transparent_pixels,
};
use spritegif_test::{RegParams, gradient_surface, numbered_frames, solid_surface};

#[test]
fn palette_reg() {
    let mut rp = RegParams::new("palette");
    let quantizer = MedianCutQuantizer::new();
    let opts = SampleOptions::default();

    // --- Test 1: palette bound over a many-color image ---
    let gradient = gradient_surface(64, 64).expect("gradient");
    let samples = collect_samples([&gradient], &opts);
    rp.compare_values(2048.0, samples.len() as f64, 0.0);
    for max_colors in [2u32, 16, 64, 256] {
        let palette = quantizer.quantize(&samples, max_colors).expect("quantize");
        rp.compare_true(palette.len() <= max_colors as usize, "palette bound");
        let indexed = palette.apply(&gradient, opts.alpha_threshold);
        rp.compare_true(
            indexed.indices.iter().all(|&i| (i as usize) < palette.len()),
            "indices in range",
        );
    }

    // --- Test 2: determinism ---
    let p1 = quantizer.quantize(&samples, 16).expect("quantize");
    let p2 = quantizer.quantize(&samples, 16).expect("quantize");
    rp.compare_true(p1.colors() == p2.colors(), "deterministic palette");
    let q1 = p1.quantize_surface(&gradient, opts.alpha_threshold).expect("map");
    let q2 = p2.quantize_surface(&gradient, opts.alpha_threshold).expect("map");
    rp.compare_surfaces(&q1, &q2);

    // --- Test 3: few distinct colors are kept exactly ---
    let frames = numbered_frames(4, 6, 6, 100).expect("frames");
    let samples = collect_samples(frames.iter().map(|f| &f.pixels), &SampleOptions {
        sample_step: 1,
        ..opts
    });
    let palette = quantizer.quantize(&samples, 256).expect("quantize");
    rp.compare_values(8.0, palette.len() as f64, 0.0);
    for f in &frames {
        let back = palette
            .quantize_surface(&f.pixels, opts.alpha_threshold)
            .expect("map");
        rp.compare_surfaces(&f.pixels, &back);
    }

    // --- Test 4: transparent slot ---
    let clear = solid_surface(4, 4, 0, 0, 0, 0).expect("clear");
    let red = solid_surface(4, 4, 255, 0, 0, 255).expect("red");
    rp.compare_true(has_transparent_pixels([&clear, &red], opts.alpha_threshold), "has alpha");
    rp.compare_true(!has_transparent_pixels([&red], opts.alpha_threshold), "opaque");
    let samples = collect_samples([&clear, &red], &opts);
    rp.compare_values(8.0, samples.len() as f64, 0.0);
    let mut palette = quantizer.quantize(&samples, 15).expect("quantize");
    let t = palette.reserve_transparent().expect("reserve");
    rp.compare_values((palette.len() - 1) as f64, t as f64, 0.0);
    let indexed = palette.apply(&clear, opts.alpha_threshold);
    rp.compare_true(indexed.indices.iter().all(|&i| i == t), "transparent mapping");
    let back = palette.indexed_to_surface(&indexed).expect("back");
    rp.compare_true(back.is_fully_transparent(), "transparent round trip");
    rp.compare_values(1.0, palette.display_colors().len() as f64, 0.0);

    // --- Test 5: display ordering ---
    let palette = Palette::new(vec![[255, 255, 255], [0, 0, 255], [0, 0, 0], [255, 0, 0]])
        .expect("palette");
    let by_lum: Vec<[u8; 3]> = palette.sorted_by_luminance().iter().map(|c| c.rgb).collect();
    rp.compare_true(by_lum.first() == Some(&[0, 0, 0]), "darkest first");
    rp.compare_true(by_lum.last() == Some(&[255, 255, 255]), "brightest last");
    let by_hue = palette.sorted_by_hue();
    rp.compare_true(by_hue.last().map(|c| c.hex.as_str()) == Some("#0000ff"), "blue last by hue");

    assert!(rp.cleanup(), "palette regression test failed");
}
