//! Session regression test
//!
//! Drives both conversion directions end to end through the real codecs:
//! GIF -> sheet with discards, and sheet PNG -> GIF with a background
//! encode. Also checks that failed loads keep prior state and that the
//! preview scheduler follows the active frames.

use std::time::Duration;

use spritegif::io::{decode_gif, write_png};
use spritegif::sheet::PlaybackTiming;
use spritegif::{EncodeOptions, Error, GifSheetSession, SheetGifSession, encode_frames};
use spritegif::color::MedianCutQuantizer;
use spritegif_test::{RegParams, grid_sheet, indexed_color, numbered_frames};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn gif_to_sheet_reg() {
    init_logger();
    let mut rp = RegParams::new("session_gif_to_sheet");

    let source = numbered_frames(5, 12, 8, 70).expect("frames");
    let gif = encode_frames(&source, &EncodeOptions::default(), &MedianCutQuantizer::new())
        .expect("encode");

    // --- Test 1: load and pack ---
    let mut session = GifSheetSession::new();
    session.load_gif(&gif).expect("load");
    rp.compare_values(5.0, session.frames().len() as f64, 0.0);
    session.set_columns(3).expect("columns");
    session.set_padding(1).expect("padding");
    let sheet = session.sheet().expect("sheet");
    rp.compare_values((3 * 12 + 2) as f64, sheet.sheet.width() as f64, 0.0);
    rp.compare_values((2 * 8 + 1) as f64, sheet.sheet.height() as f64, 0.0);
    for (orig, decoded) in source.iter().zip(session.frames().all()) {
        rp.compare_surfaces(&orig.pixels, &decoded.pixels);
        rp.compare_values(70.0, decoded.delay_ms as f64, 0.0);
    }

    // --- Test 2: discard by click, restore ---
    rp.compare_true(session.toggle_at(14, 2).ok().flatten() == Some(1), "click frame 1");
    rp.compare_true(session.toggle_at(12, 2).ok().flatten().is_none(), "click gap");
    rp.compare_values(4.0, session.sheet().expect("sheet").cells.len() as f64, 0.0);
    rp.compare_true(session.hit_test(14, 2) == Some(2), "frame 2 shifted");
    session.restore_all().expect("restore");
    rp.compare_true(session.hit_test(14, 2) == Some(1), "frame 1 back");

    // --- Test 3: failed reload keeps prior state ---
    session.toggle_discard(4).expect("toggle");
    let before = session.sheet().expect("sheet").sheet.clone();
    rp.compare_true(
        matches!(session.load_gif(b"GIF89a garbage"), Err(Error::Decode(_))),
        "bad gif",
    );
    rp.compare_true(session.frames().is_discarded(4), "discard kept");
    rp.compare_surfaces(&before, &session.sheet().expect("sheet").sheet);

    // --- Test 4: sheet PNG and re-encode of active frames ---
    let mut png = Vec::new();
    session.write_sheet_png(&mut png).expect("png");
    rp.compare_true(png.starts_with(&[0x89, b'P', b'N', b'G']), "PNG signature");
    let out = session
        .encode_gif(&EncodeOptions {
            fps: Some(10.0),
            ..Default::default()
        })
        .expect("encode");
    let frames = decode_gif(&out).expect("decode");
    rp.compare_values(4.0, frames.len() as f64, 0.0);
    rp.compare_true(frames.iter().all(|f| f.delay_ms == 100), "fps delays");

    // --- Test 5: preview playback over the active frames ---
    let scheduler = session.scheduler();
    scheduler.set_timing(PlaybackTiming::PerFrame);
    scheduler.start();
    let shown = session.poll_preview(Duration::ZERO).map(|f| f.source_index);
    rp.compare_true(shown == Some(0), "first preview frame");
    rp.compare_true(session.poll_preview(Duration::from_millis(50)).is_none(), "not due");
    let shown = session.poll_preview(Duration::from_millis(70)).map(|f| f.source_index);
    rp.compare_true(shown == Some(1), "second preview frame");

    if rp.display() {
        if let Some(preview) = session.sheet_preview() {
            let _ = rp.write_surface(&preview, "sheet");
        }
    }

    assert!(rp.cleanup(), "session gif-to-sheet regression test failed");
}

#[test]
fn sheet_to_gif_reg() {
    init_logger();
    let mut rp = RegParams::new("session_sheet_to_gif");

    let sheet = grid_sheet(4, 2, 10, 6).expect("sheet");
    let mut png = Vec::new();
    write_png(&sheet, &mut png).expect("png");

    // --- Test 1: load bytes and slice ---
    let mut session = SheetGifSession::new();
    session.set_grid(4, 2, 0).expect("grid");
    session.load_image_bytes(&png).expect("load");
    rp.compare_values(8.0, session.frames().len() as f64, 0.0);
    rp.compare_true(session.frames().all()[0].dimensions() == (10, 6), "frame size");

    // --- Test 2: invalid grid keeps the old slice ---
    rp.compare_true(
        matches!(session.set_grid(41, 1, 0), Err(Error::InvalidGrid(_))),
        "too many columns",
    );
    rp.compare_values(8.0, session.frames().len() as f64, 0.0);
    rp.compare_true(
        matches!(session.load_image_bytes(b"BM not an image"), Err(Error::Decode(_))),
        "unknown format",
    );
    rp.compare_true(session.source().map(|s| s.dimensions()) == Some((40, 12)), "source kept");

    // --- Test 3: background encode of the active frames ---
    session.toggle_discard(0);
    session.toggle_discard(7);
    let ticket = session
        .spawn_encode(
            EncodeOptions {
                max_colors: 16,
                ..Default::default()
            },
            |_| {},
        )
        .expect("spawn");
    rp.compare_true(
        matches!(session.spawn_encode(EncodeOptions::default(), |_| {}), Err(Error::Busy)),
        "busy",
    );
    let gif = session.complete_encode(ticket).expect("encode");
    let frames = decode_gif(&gif).expect("decode");
    rp.compare_values(6.0, frames.len() as f64, 0.0);
    for (i, frame) in frames.iter().enumerate() {
        rp.compare_values(
            indexed_color(i + 1) as f64,
            frame.pixels.get_pixel(5, 3).unwrap_or(0) as f64,
            0.0,
        );
        rp.compare_values(100.0, frame.delay_ms as f64, 0.0);
    }

    // --- Test 4: reload makes a running encode stale ---
    let ticket = session
        .spawn_encode(EncodeOptions::default(), |_| {})
        .expect("spawn");
    session.load_image(sheet.clone()).expect("reload");
    rp.compare_true(
        matches!(session.complete_encode(ticket), Err(Error::Stale(_))),
        "stale",
    );
    rp.compare_true(!session.is_encoding(), "guard released");
    rp.compare_true(session.frames().discarded().is_empty(), "discards reset");

    // --- Test 5: grid preview ---
    session.set_grid(2, 1, 2).expect("grid");
    let preview = session.grid_preview().expect("preview");
    rp.compare_true(preview.sizes_equal(&sheet), "preview size");
    rp.compare_true(!preview.equals(&sheet), "preview drawn");
    if rp.display() {
        let _ = rp.write_surface(&preview, "grid");
    }

    assert!(rp.cleanup(), "session sheet-to-gif regression test failed");
}
