//! GIF compositing regression test
//!
//! Tests disposal handling on synthetic raw GIF streams: background
//! restore, restore-previous, transparent patch modes, malformed frame
//! skipping and determinism.

use spritegif_core::color;
use spritegif_io::{
    ComposeOptions, Compositor, Disposal, IoError, PatchRect, PatchTransparency, RawFrame,
    RawGif, compose_frames,
};
use spritegif_test::{RegParams, solid_surface};

fn patch(
    left: u32,
    top: u32,
    width: u32,
    height: u32,
    rgba: [u8; 4],
    disposal: Disposal,
) -> RawFrame {
    RawFrame {
        patch: rgba.repeat((width * height) as usize),
        rect: PatchRect {
            left,
            top,
            width,
            height,
        },
        disposal,
        delay_centiseconds: Some(10),
    }
}

#[test]
fn compose_reg() {
    let mut rp = RegParams::new("compose");
    let red = [255, 0, 0, 255];
    let blue = [0, 0, 255, 255];
    let green = [0, 255, 0, 255];

    // --- Test 1: background disposal ---
    let gif = RawGif {
        screen_width: 8,
        screen_height: 8,
        frames: vec![
            patch(0, 0, 8, 8, red, Disposal::RestoreBackground),
            patch(2, 2, 4, 4, blue, Disposal::Keep),
        ],
    };
    let frames = compose_frames(&gif, &ComposeOptions::default()).expect("compose");
    rp.compare_values(2.0, frames.len() as f64, 0.0);
    rp.compare_surfaces(&solid_surface(8, 8, 255, 0, 0, 255).expect("red"), &frames[0].pixels);
    let second = &frames[1].pixels;
    rp.compare_values(
        color::compose_rgb(0, 0, 255) as f64,
        second.get_pixel(3, 3).unwrap_or(0) as f64,
        0.0,
    );
    rp.compare_values(0.0, second.get_pixel(0, 0).unwrap_or(1) as f64, 0.0);
    rp.compare_values(0.0, second.get_pixel(7, 7).unwrap_or(1) as f64, 0.0);
    rp.compare_values(100.0, frames[1].delay_ms as f64, 0.0);

    // --- Test 2: restore previous ---
    let gif = RawGif {
        screen_width: 6,
        screen_height: 6,
        frames: vec![
            patch(0, 0, 6, 6, green, Disposal::Keep),
            patch(1, 1, 2, 2, red, Disposal::RestorePrevious),
            patch(4, 4, 1, 1, blue, Disposal::Keep),
        ],
    };
    let frames = compose_frames(&gif, &ComposeOptions::default()).expect("compose");
    let third = &frames[2].pixels;
    rp.compare_values(
        color::compose_rgb(0, 255, 0) as f64,
        third.get_pixel(1, 1).unwrap_or(0) as f64,
        0.0,
    );
    rp.compare_values(
        color::compose_rgb(255, 0, 0) as f64,
        frames[1].pixels.get_pixel(1, 1).unwrap_or(0) as f64,
        0.0,
    );

    // --- Test 3: transparent patch pixels ---
    let mut holey = patch(0, 0, 4, 4, blue, Disposal::Keep);
    holey.patch[3] = 0;
    let gif = RawGif {
        screen_width: 4,
        screen_height: 4,
        frames: vec![patch(0, 0, 4, 4, red, Disposal::Keep), holey],
    };
    let overwrite = compose_frames(&gif, &ComposeOptions::default()).expect("compose");
    rp.compare_values(
        0.0,
        color::alpha(overwrite[1].pixels.get_pixel(0, 0).unwrap_or(0xff)) as f64,
        0.0,
    );
    let skip = compose_frames(
        &gif,
        &ComposeOptions {
            transparent_patch: PatchTransparency::Skip,
        },
    )
    .expect("compose");
    rp.compare_values(
        color::compose_rgb(255, 0, 0) as f64,
        skip[1].pixels.get_pixel(0, 0).unwrap_or(0) as f64,
        0.0,
    );

    // --- Test 4: malformed frames are skipped ---
    let mut short = patch(0, 0, 4, 4, green, Disposal::Keep);
    short.patch.truncate(10);
    let gif = RawGif {
        screen_width: 4,
        screen_height: 4,
        frames: vec![
            patch(0, 0, 4, 4, red, Disposal::Keep),
            patch(0, 0, 0, 4, green, Disposal::Keep),
            short,
            patch(1, 1, 1, 1, blue, Disposal::Keep),
        ],
    };
    let frames = compose_frames(&gif, &ComposeOptions::default()).expect("compose");
    rp.compare_values(2.0, frames.len() as f64, 0.0);
    rp.compare_values(3.0, frames[1].source_index as f64, 0.0);
    rp.compare_values(
        color::compose_rgb(255, 0, 0) as f64,
        frames[1].pixels.get_pixel(0, 0).unwrap_or(0) as f64,
        0.0,
    );

    // --- Test 5: patches past the screen edge are clipped ---
    let mut compositor = Compositor::new(4, 4, ComposeOptions::default()).expect("compositor");
    let frame = compositor
        .push(0, &patch(2, 2, 4, 4, blue, Disposal::Keep))
        .expect("push")
        .expect("frame");
    rp.compare_values(4.0, frame.width() as f64, 0.0);
    rp.compare_values(
        color::compose_rgb(0, 0, 255) as f64,
        frame.pixels.get_pixel(3, 3).unwrap_or(0) as f64,
        0.0,
    );
    rp.compare_surfaces(&frame.pixels, &compositor.canvas());

    // --- Test 6: errors ---
    let empty_screen = RawGif {
        screen_width: 0,
        screen_height: 4,
        frames: vec![patch(0, 0, 1, 1, red, Disposal::Keep)],
    };
    rp.compare_true(
        matches!(
            compose_frames(&empty_screen, &ComposeOptions::default()),
            Err(IoError::EmptyCanvas { .. })
        ),
        "zero canvas",
    );
    let no_frames = RawGif {
        screen_width: 4,
        screen_height: 4,
        frames: vec![patch(0, 0, 0, 0, red, Disposal::Keep)],
    };
    rp.compare_true(
        matches!(
            compose_frames(&no_frames, &ComposeOptions::default()),
            Err(IoError::NoFrames)
        ),
        "no frames",
    );

    // --- Test 7: determinism ---
    let gif = RawGif {
        screen_width: 6,
        screen_height: 6,
        frames: vec![
            patch(0, 0, 6, 6, red, Disposal::RestoreBackground),
            patch(1, 1, 3, 3, green, Disposal::RestorePrevious),
            patch(2, 2, 3, 3, blue, Disposal::Keep),
        ],
    };
    let a = compose_frames(&gif, &ComposeOptions::default()).expect("compose");
    let b = compose_frames(&gif, &ComposeOptions::default()).expect("compose");
    rp.compare_values(a.len() as f64, b.len() as f64, 0.0);
    for (fa, fb) in a.iter().zip(&b) {
        rp.compare_surfaces(&fa.pixels, &fb.pixels);
    }

    assert!(rp.cleanup(), "compose regression test failed");
}
