//! Edge case tests for folio-text
//!
//! Layout properties checked with the deterministic fixed-advance measurer,
//! so no system fonts are required.

use std::sync::Arc;

use folio_text::bounds::{collapse_paragraph, line_rects};
use folio_text::position::LineInput;
use folio_text::*;

fn measure() -> FixedAdvance {
    FixedAdvance::default()
}

fn font(size: f32) -> FontSpec {
    FontSpec::new("Inter", size)
}

fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

// ============================================================================
// WRAPPING
// ============================================================================

#[test]
fn test_hello_world_scenario() {
    let lines = wrap_text(&measure(), &font(40.0), "Hello\nWorld", 1000.0);
    assert_eq!(lines, vec!["Hello", "World"]);
}

#[test]
fn test_long_sentence_scenario() {
    let text = "a very long sentence with many words";
    let font = font(10.0);
    let m = measure();
    let total: f32 = words(text).iter().map(|w| m.measure_text(&font, w).width).sum();
    let average = total / words(text).len() as f32;

    let lines = wrap_text(&m, &font, text, average * 3.0);
    assert!(lines.len() >= 3, "got {lines:?}");

    let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
    assert_eq!(rejoined, words(text));
}

#[test]
fn test_wrap_idempotence() {
    let m = measure();
    let text = "the quick brown fox jumps over the lazy dog and keeps running far away";
    for width in [40.0, 75.0, 120.0, 200.0, 333.0] {
        let first = wrap_text(&m, &font(10.0), text, width);
        let again = wrap_text(&m, &font(10.0), &first.join(" "), width);
        assert_eq!(first, again, "width {width}");
    }
}

#[test]
fn test_no_mid_word_splitting() {
    let m = measure();
    let inputs = [
        "supercalifragilistic is long",
        "tiny a b c",
        "one two  three   four",
        "Mixed\nparagraphs with\n\nblank lines",
    ];
    for text in inputs {
        for width in [1.0, 30.0, 64.0, 150.0] {
            let lines = wrap_text(&m, &font(10.0), text, width);
            let input_words = words(text);
            for line in &lines {
                for word in line.split(' ').filter(|w| !w.is_empty()) {
                    assert!(input_words.contains(&word), "{word:?} split from {text:?}");
                }
            }
            let output: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
            assert_eq!(output, input_words);
        }
    }
}

#[test]
fn test_overlong_word_gets_own_line() {
    let lines = wrap_text(&measure(), &font(10.0), "hi extraordinarily ok", 20.0);
    assert_eq!(lines, vec!["hi", "extraordinarily", "ok"]);
}

#[test]
fn test_crlf_input() {
    assert_eq!(split_lines("top\r\nbottom"), vec!["top", "bottom"]);
}

#[test]
fn test_wrap_empty_and_whitespace() {
    assert!(wrap_text(&measure(), &font(10.0), "", 100.0).is_empty());
    assert_eq!(wrap_text(&measure(), &font(10.0), "\n", 100.0), vec!["", ""]);
}

// ============================================================================
// TYPOGRAPHY
// ============================================================================

#[test]
fn test_tight_height_selection() {
    let metrics = FontMetrics::approximate(100.0);
    assert_eq!(line_height("lowercase only", &metrics, HeightMode::Tight), metrics.x_height);
    assert_eq!(line_height("Capital", &metrics, HeightMode::Tight), metrics.cap_height);
    assert_eq!(line_height("route 66", &metrics, HeightMode::Tight), metrics.cap_height);
    assert_eq!(line_height("any", &metrics, HeightMode::FullLineBox), metrics.ascent + metrics.descent);
}

#[test]
fn test_missing_metrics_fall_back() {
    let backend = measure().without_metrics();
    let metrics = metrics_or_fallback(&backend, &font(100.0));
    assert!((metrics.ascent - 80.0).abs() < 1e-3);
    assert!((metrics.descent - 20.0).abs() < 1e-3);
    assert!((metrics.cap_height - metrics.ascent).abs() < 1e-3);
    assert!((metrics.x_height - 50.0).abs() < 1e-3);
}

// ============================================================================
// AUTO-FIT
// ============================================================================

#[test]
fn test_autofit_monotonic_in_height() {
    let m = measure();
    let text = "Fitting a paragraph into a box of growing height";
    let mut previous = 0.0;
    let mut height = 10.0;
    while height < 800.0 {
        let c = FitConstraints::new(300.0, height, 12.0, 120.0).line_spacing(8.0);
        let size = find_font_size(&m, &font(12.0), text, &c, HeightMode::Tight);
        assert!(size >= previous, "height {height}: {size} < {previous}");
        previous = size;
        height += 7.0;
    }
}

#[test]
fn test_autofit_exactly_twelve() {
    let m = measure();
    // 10 chars: 60px wide at 12px, 70px at 14px
    let c = FitConstraints::new(60.0, 1000.0, 12.0, 120.0);
    assert_eq!(find_font_size(&m, &font(20.0), "abcdefghij", &c, HeightMode::Tight), 12.0);

    // Nothing fits: still 12, never smaller
    let c = FitConstraints::new(5.0, 5.0, 12.0, 120.0);
    assert_eq!(find_font_size(&m, &font(20.0), "abcdefghij", &c, HeightMode::Tight), 12.0);
}

#[test]
fn test_autofit_result_fits() {
    let m = measure();
    let text = "Every wrapped line must fit";
    let c = FitConstraints::new(250.0, 180.0, 12.0, 120.0).line_spacing(10.0);
    let size = find_font_size(&m, &font(12.0), text, &c, HeightMode::Tight);
    let sized = font(size);
    let lines = wrap_text(&m, &sized, text, 250.0);
    assert!(lines.iter().all(|l| m.measure_text(&sized, l).width <= 250.0));

    // One step up no longer fits
    let larger = font(size + 2.0);
    let lines = wrap_text(&m, &larger, text, 250.0);
    let metrics = metrics_or_fallback(&m, &larger);
    let heights: Vec<f32> = lines.iter().map(|l| line_height(l, &metrics, HeightMode::Tight)).collect();
    let too_wide = lines.iter().any(|l| m.measure_text(&larger, l).width > 250.0);
    assert!(too_wide || bounds::block_height(&heights, 10.0) > 180.0);
}

#[test]
fn test_autofit_degenerate_inputs() {
    let m = measure();
    let c = FitConstraints::new(0.0, 100.0, 12.0, 120.0);
    assert_eq!(find_font_size(&m, &font(12.0), "text", &c, HeightMode::Tight), 12.0);
    let c = FitConstraints::new(100.0, 100.0, 12.0, 120.0);
    assert_eq!(find_font_size(&m, &font(12.0), "   ", &c, HeightMode::Tight), 12.0);
}

#[test]
fn test_autofit_bounded_for_huge_sizes() {
    let m = measure();
    let c = FitConstraints::new(1e8, 1e8, 12.0, 1e8);
    let size = find_font_size(&m, &font(12.0), "Hi there", &c, HeightMode::Tight);
    assert_eq!(size, folio_text::autofit::MAX_SIZE);

    // Nothing fits: every grid candidate is rejected and the search still ends
    let c = FitConstraints::new(1.0, 1e8, 12.0, 1e8);
    assert_eq!(find_font_size(&m, &font(12.0), "unbreakable", &c, HeightMode::Tight), 12.0);
}

// ============================================================================
// BOUNDS
// ============================================================================

#[test]
fn test_single_line_collapse() {
    let m = measure();
    let font = font(20.0);
    let lines = wrap_text(&m, &font, "WIX STUDIO", 70.0);
    assert_eq!(lines, vec!["WIX", "STUDIO"]);

    let metrics = metrics_or_fallback(&m, &font);
    let specs: Vec<(f32, f32, Alignment)> = lines
        .iter()
        .map(|l| {
            let w = m.measure_text(&font, l).tight_width();
            (w, line_height(l, &metrics, HeightMode::Tight), Alignment::Center)
        })
        .collect();
    let rects = line_rects(0.0, 0.0, &specs, 10.0);
    let widest = rects.iter().map(|r| r.width).fold(0.0, f32::max);

    let collapsed =
        collapse_paragraph(&m, &font, "WIX STUDIO", &rects, Alignment::Center, HeightMode::Tight).unwrap();
    let unwrapped = m.measure_text(&font, "WIX STUDIO").tight_width();
    assert_eq!(collapsed.width, unwrapped);
    assert_ne!(collapsed.width, widest);
}

#[test]
fn test_explicit_lines_never_collapse() {
    let m = measure();
    let rects = [Rect::new(0.0, 0.0, 30.0, 14.0), Rect::new(0.0, 24.0, 60.0, 14.0)];
    assert!(collapse_paragraph(&m, &font(20.0), "WIX\nSTUDIO", &rects, Alignment::Left, HeightMode::Tight).is_none());
}

#[test]
fn test_frame_dimensions() {
    let rects = [Rect::new(10.0, 10.0, 120.0, 20.0), Rect::new(30.0, 40.0, 80.0, 20.0)];
    let frame = TextFrame::around(&rects, 10.0, FramePadding { horizontal: 4.0, vertical: 6.0 });
    assert_eq!(frame.width, 128.0);
    assert_eq!(frame.height, 62.0);
}

// ============================================================================
// POSITIONING
// ============================================================================

fn input(width: f32, alignment: Alignment) -> LineInput {
    LineInput {
        text: "line".into(),
        alignment,
        width,
        height: 30.0,
        baseline_offset: 21.0,
        ink_offset: 0.0,
    }
}

#[test]
fn test_mixed_alignment_block_not_recentered() {
    let area = Rect::new(0.0, 0.0, 600.0, 400.0);
    let lines = [
        input(200.0, Alignment::Left),
        input(100.0, Alignment::Center),
        input(150.0, Alignment::Right),
    ];
    let placed = position_lines(
        area,
        &lines,
        10.0,
        HorizontalPosition::Center,
        VerticalPosition::Center,
        FitMode::FillCanvas,
    );
    assert_eq!(placed[0].x, 0.0);
    assert_eq!(placed[1].x, 250.0);
    assert_eq!(placed[2].x, 450.0);
}

#[test]
fn test_uniform_alignment_block_shifts_left() {
    let area = Rect::new(0.0, 0.0, 600.0, 400.0);
    let lines = [
        input(200.0, Alignment::Center),
        input(100.0, Alignment::Center),
        input(150.0, Alignment::Center),
    ];
    let placed = position_lines(
        area,
        &lines,
        10.0,
        HorizontalPosition::Left,
        VerticalPosition::Center,
        FitMode::FillCanvas,
    );
    assert_eq!(placed[0].x, 0.0);
    assert_eq!(placed[1].x, 50.0);
    assert_eq!(placed[2].x, 25.0);
    // 110px block centered in 400px
    assert_eq!(placed[0].y, 145.0);
    assert_eq!(placed[2].y, 225.0);
}

// ============================================================================
// ENGINE
// ============================================================================

fn engine() -> TextEngine {
    TextEngine::new(Arc::new(measure()), LayoutPolicy::main_text())
}

#[test]
fn test_engine_empty_text() {
    let mut engine = engine();
    engine.set_text("");
    assert!(engine.lines().is_empty());
    assert!(engine.text_bounds().is_empty());
    assert_eq!(engine.frame().width, 0.0);
}

#[test]
fn test_engine_auto_fit_respects_bounds() {
    let mut engine = engine();
    engine.set_text("A longer headline that has to wrap onto several lines");
    let area = engine.layout().available;
    assert!(engine.font_size() >= 12.0 && engine.font_size() <= 120.0);
    for line in &engine.layout().lines {
        assert!(line.x >= area.x - 1e-3 && line.x + line.width <= area.right() + 1e-3);
    }
    let frame = engine.frame();
    assert!(frame.height <= area.height + 1e-3);
}

#[test]
fn test_engine_slot_policy_uses_full_line_box() {
    let mut engine = TextEngine::new(Arc::new(measure()), LayoutPolicy::slot_text());
    engine.update_config(ConfigPatch { font_size: Some(FontSize::Px(20.0)), ..Default::default() });
    engine.set_text("slot");
    let line = &engine.layout().lines[0];
    // ascent 18 + descent 5
    assert_eq!(line.height, 23.0);
    assert_eq!(line.baseline - line.y, 18.0);
    assert_eq!(engine.lines()[0].alignment, Alignment::Left);
}

#[test]
fn test_engine_snapshot_json_round_trip() {
    let mut engine = engine();
    engine.update_config(ConfigPatch {
        text_styles: Some(TextStyles { underline: true, ..Default::default() }),
        ..Default::default()
    });
    engine.set_text("Preset\ntext");
    engine.set_line_alignment(1, Alignment::Right);

    let json = engine.export().to_json().unwrap();
    let mut restored = TextEngine::new(Arc::new(measure()), LayoutPolicy::main_text());
    restored.import(TextSnapshot::from_json(&json).unwrap());

    assert_eq!(restored.text_bounds(), engine.text_bounds());
    assert_eq!(restored.lines()[1].alignment, Alignment::Right);
    assert!(restored.config().text_styles.underline);
}

#[test]
fn test_engine_underline_rendered() {
    let mut engine = engine();
    engine.update_config(ConfigPatch {
        font_size: Some(FontSize::Px(28.0)),
        text_styles: Some(TextStyles { underline: true, highlight: true, ..Default::default() }),
        ..Default::default()
    });
    engine.set_text("Hello");
    let mut surface = RecordingSurface::new();
    engine.render(&mut surface);

    let strokes = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
        .count();
    let fills = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillRect(_)))
        .count();
    assert_eq!(strokes, 1);
    assert_eq!(fills, 1);
}

#[test]
fn test_engine_overrides_follow_rewrap() {
    let mut engine = engine();
    engine.update_config(ConfigPatch { font_size: Some(FontSize::Px(40.0)), ..Default::default() });
    engine.set_text("beta gamma\nalpha");
    engine.set_line_alignment(1, Alignment::Right);

    // 160px of width splits "beta gamma" and pushes "alpha" down a line
    engine.update_config(ConfigPatch { canvas_width: Some(240.0), ..Default::default() });
    let texts: Vec<&str> = engine.lines().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["beta", "gamma", "alpha"]);
    assert_eq!(engine.lines()[2].alignment, Alignment::Right);

    engine.update_config(ConfigPatch { canvas_width: Some(1080.0), ..Default::default() });
    assert_eq!(engine.lines()[1].alignment, Alignment::Right);
    assert_eq!(engine.lines()[0].alignment, Alignment::Center);
}

#[test]
fn test_engine_overrides_survive_empty_area() {
    let mut engine = engine();
    engine.update_config(ConfigPatch { font_size: Some(FontSize::Px(40.0)), ..Default::default() });
    engine.set_text("alpha\nbeta");
    engine.set_line_alignment(1, Alignment::Right);

    for padding in [1100.0, 40.0] {
        engine.update_config(ConfigPatch { padding_left: Some(padding), ..Default::default() });
    }
    assert_eq!(engine.lines()[1].alignment, Alignment::Right);

    engine.update_config(ConfigPatch { canvas_width: Some(60.0), ..Default::default() });
    assert!(engine.lines().is_empty());
    engine.update_config(ConfigPatch { canvas_width: Some(1080.0), ..Default::default() });
    assert_eq!(engine.lines()[1].alignment, Alignment::Right);
}
