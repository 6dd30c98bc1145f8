use framematch::lowlevel::score_window;
use framematch::{search, FrameMatchError, RgbaView, SearchConfig};
use rand::Rng;

fn solid_rgba(width: usize, height: usize, value: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for _ in 0..width * height {
        data.extend_from_slice(&[value, value, value, 255]);
    }
    data
}

fn checkerboard_rgba(width: usize, height: usize, cell: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let value = if (x / cell + y / cell) % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[value, value, value, 255]);
        }
    }
    data
}

/// Copies an RGBA region into a larger RGBA buffer at `(x0, y0)`.
fn blit(dst: &mut [u8], dst_width: usize, src: &[u8], src_width: usize, x0: usize, y0: usize) {
    let src_height = src.len() / (src_width * 4);
    for y in 0..src_height {
        let src_start = y * src_width * 4;
        let dst_start = ((y0 + y) * dst_width + x0) * 4;
        dst[dst_start..dst_start + src_width * 4]
            .copy_from_slice(&src[src_start..src_start + src_width * 4]);
    }
}

#[test]
fn rejects_template_larger_than_frame() {
    let frame = solid_rgba(40, 60, 128);
    let frame = RgbaView::from_rgba8(&frame, 40, 60).unwrap();
    let cfg = SearchConfig::default();

    let wide = solid_rgba(50, 30, 128);
    let wide = RgbaView::from_rgba8(&wide, 50, 30).unwrap();
    assert_eq!(search(frame, wide, &cfg).unwrap(), None);

    let tall = solid_rgba(30, 70, 128);
    let tall = RgbaView::from_rgba8(&tall, 30, 70).unwrap();
    assert_eq!(search(frame, tall, &cfg).unwrap(), None);
}

#[test]
fn degenerate_search_region_yields_none() {
    // Template nearly frame-sized: the margins leave no window placements.
    let frame = solid_rgba(200, 150, 128);
    let frame = RgbaView::from_rgba8(&frame, 200, 150).unwrap();
    let tpl = solid_rgba(190, 140, 128);
    let tpl = RgbaView::from_rgba8(&tpl, 190, 140).unwrap();

    assert_eq!(search(frame, tpl, &SearchConfig::default()).unwrap(), None);
}

#[test]
fn exact_window_scores_exactly_one() {
    let patch = checkerboard_rgba(20, 20, 5);
    let mut frame = solid_rgba(60, 60, 128);
    blit(&mut frame, 60, &patch, 20, 24, 16);

    let frame = RgbaView::from_rgba8(&frame, 60, 60).unwrap();
    let tpl = RgbaView::from_rgba8(&patch, 20, 20).unwrap();

    let confidence = score_window(frame, tpl, 24, 16, 2).unwrap();
    assert_eq!(confidence, 1.0);
}

#[test]
fn out_of_range_window_is_a_match_fault() {
    let frame = solid_rgba(20, 20, 128);
    let frame = RgbaView::from_rgba8(&frame, 20, 20).unwrap();
    let tpl = solid_rgba(10, 10, 128);
    let tpl = RgbaView::from_rgba8(&tpl, 10, 10).unwrap();

    let err = score_window(frame, tpl, 15, 0, 1).err().unwrap();
    assert!(matches!(err, FrameMatchError::MatchFault { .. }));
}

#[test]
fn finds_embedded_checkerboard_patch() {
    // 40x40 checkerboard at (80, 60) in a 200x150 frame. The default window
    // budget stops the scan long before row 60, so raise it for this case.
    let patch = checkerboard_rgba(40, 40, 8);
    let mut frame = solid_rgba(200, 150, 128);
    blit(&mut frame, 200, &patch, 40, 80, 60);

    let frame = RgbaView::from_rgba8(&frame, 200, 150).unwrap();
    let tpl = RgbaView::from_rgba8(&patch, 40, 40).unwrap();
    let cfg = SearchConfig {
        max_candidates: 2000,
        ..SearchConfig::default()
    };

    let found = search(frame, tpl, &cfg).unwrap().unwrap();
    assert!(found.confidence >= 0.95);
    // Scan step for a 40x40 template is 3px; the hit lands on the grid point
    // next to the true position.
    assert!(found.position.x.abs_diff(80) <= 3);
    assert!(found.position.y.abs_diff(60) <= 3);
    assert_eq!(found.size.width, 40);
    assert_eq!(found.size.height, 40);
}

#[test]
fn candidate_budget_bounds_the_scan() {
    // Patch sits deep in the frame; the default 100-window budget exhausts
    // in the top rows and never reaches it, trading recall for bounded cost.
    let patch = checkerboard_rgba(40, 40, 8);
    let mut frame = solid_rgba(300, 200, 128);
    blit(&mut frame, 300, &patch, 40, 250, 121);

    let frame = RgbaView::from_rgba8(&frame, 300, 200).unwrap();
    let tpl = RgbaView::from_rgba8(&patch, 40, 40).unwrap();

    let capped = search(frame, tpl, &SearchConfig::default())
        .unwrap()
        .unwrap();
    assert!(capped.confidence < 0.95);

    let cfg = SearchConfig {
        max_candidates: 100_000,
        ..SearchConfig::default()
    };
    let found = search(frame, tpl, &cfg).unwrap().unwrap();
    assert!(found.confidence >= 0.95);
    assert!(found.position.x.abs_diff(250) <= 3);
    assert!(found.position.y.abs_diff(121) <= 3);
}

#[test]
fn uniform_frame_scores_below_a_bright_template() {
    let frame = solid_rgba(200, 150, 10);
    let frame = RgbaView::from_rgba8(&frame, 200, 150).unwrap();
    let tpl = solid_rgba(16, 16, 230);
    let tpl = RgbaView::from_rgba8(&tpl, 16, 16).unwrap();

    let best = search(frame, tpl, &SearchConfig::default())
        .unwrap()
        .unwrap();
    // 1 - 220/255, well under any sensible acceptance threshold.
    assert!((best.confidence - 0.1373).abs() < 1e-3);
}

#[test]
fn confidence_stays_within_unit_interval() {
    let mut rng = rand::rng();
    let frame_data: Vec<u8> = (0..64 * 48 * 4).map(|_| rng.random::<u8>()).collect();
    let tpl_data: Vec<u8> = (0..16 * 16 * 4).map(|_| rng.random::<u8>()).collect();

    let frame = RgbaView::from_rgba8(&frame_data, 64, 48).unwrap();
    let tpl = RgbaView::from_rgba8(&tpl_data, 16, 16).unwrap();

    if let Some(found) = search(frame, tpl, &SearchConfig::default()).unwrap() {
        assert!(found.confidence >= 0.0);
        assert!(found.confidence <= 1.0);
    }

    let confidence = score_window(frame, tpl, 5, 5, 1).unwrap();
    assert!((0.0..=1.0).contains(&confidence));
}
