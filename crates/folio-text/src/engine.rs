//! Text engine: one instance per text element
//!
//! Every mutating call re-runs the whole pipeline synchronously:
//! available area, font size, wrapping, measurement, positioning, bounds
//! and frame.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::autofit::{FitConstraints, find_font_size, fit_manual};
use crate::bounds::collapse_paragraph;
use crate::config::{ConfigPatch, FitMode, FontSize, LayoutPolicy, TextBlockConfig};
use crate::font::{FontMetrics, FontSpec, metrics_or_fallback};
use crate::geometry::{Insets, Rect};
use crate::line::{Alignment, FramePadding, LineMetrics, TextFrame, TextLine};
use crate::measure::TextBackend;
use crate::persist::TextSnapshot;
use crate::position::{LineInput, PositionedLine, is_mixed_alignment, position_lines};
use crate::render::{RenderStyle, Surface, TextRenderer};
use crate::typography;
use crate::wrap::{split_lines, wrap_text};

/// Result of one layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub font_size: f32,
    pub font: FontSpec,
    pub metrics: FontMetrics,
    /// Container minus padding and block padding
    pub available: Rect,
    pub lines: Vec<PositionedLine>,
    /// Per-line boxes, or one box for a collapsed paragraph
    pub bounds: Vec<Rect>,
    pub frame: TextFrame,
}

impl TextLayout {
    fn empty(font: FontSpec, metrics: FontMetrics, available: Rect, padding: FramePadding) -> Self {
        Self {
            font_size: font.size,
            font,
            metrics,
            available,
            lines: Vec::new(),
            bounds: Vec::new(),
            frame: TextFrame {
                x: available.x,
                y: available.y,
                padding,
                ..Default::default()
            },
        }
    }
}

/// Layout engine for one text element
pub struct TextEngine {
    backend: Arc<dyn TextBackend>,
    policy: LayoutPolicy,
    config: TextBlockConfig,
    raw_text: String,
    lines: Vec<TextLine>,
    /// Alignment overrides keyed by line index
    overrides: BTreeMap<usize, Alignment>,
    /// Texts of the lines `overrides` were keyed against; survives passes
    /// that lay out nothing. Empty means the keys are bare indices.
    keyed_texts: Vec<String>,
    layout: TextLayout,
}

impl TextEngine {
    /// Engine with the policy's default configuration
    pub fn new(backend: Arc<dyn TextBackend>, policy: LayoutPolicy) -> Self {
        let config = policy.default_config();
        Self::with_config(backend, policy, config)
    }

    pub fn with_config(backend: Arc<dyn TextBackend>, policy: LayoutPolicy, config: TextBlockConfig) -> Self {
        let font = config.font_spec(config.min_font_size);
        let metrics = metrics_or_fallback(backend.as_ref(), &font);
        let layout = TextLayout::empty(font, metrics, Rect::default(), FramePadding::default());
        let mut engine = Self {
            backend,
            policy,
            config,
            raw_text: String::new(),
            lines: Vec::new(),
            overrides: BTreeMap::new(),
            keyed_texts: Vec::new(),
            layout,
        };
        engine.relayout();
        engine
    }

    /// Replace the text and lay it out again
    pub fn set_text(&mut self, raw: &str) {
        if raw == self.raw_text && !self.lines.is_empty() {
            return;
        }
        self.raw_text = raw.to_string();
        self.relayout();
    }

    /// Merge the fields set in `patch` and lay out again
    pub fn update_config(&mut self, patch: ConfigPatch) {
        self.config.apply(patch);
        self.relayout();
    }

    /// Override the alignment of one line. Out-of-range indices are ignored.
    pub fn set_line_alignment(&mut self, index: usize, alignment: Alignment) {
        if index >= self.lines.len() {
            tracing::debug!(index, lines = self.lines.len(), "Ignoring alignment for missing line");
            return;
        }
        self.overrides.insert(index, alignment);
        self.relayout();
    }

    /// Bounding boxes of the text: one per line, or a single box when a
    /// uniformly aligned paragraph only wrapped visually
    pub fn text_bounds(&self) -> Vec<Rect> {
        self.layout.bounds.clone()
    }

    pub fn frame(&self) -> TextFrame {
        self.layout.frame
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn font_size(&self) -> f32 {
        self.layout.font_size
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    pub fn config(&self) -> &TextBlockConfig {
        &self.config
    }

    pub fn policy(&self) -> LayoutPolicy {
        self.policy
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Draw the current layout
    pub fn render(&self, surface: &mut (impl Surface + ?Sized)) {
        let style = RenderStyle {
            font: self.layout.font.clone(),
            color: self.config.color,
            styles: self.config.text_styles,
            descent: self.layout.metrics.descent,
        };
        TextRenderer::render(surface, &self.layout.lines, &style);
    }

    /// Plain-data copy of the element
    pub fn export(&self) -> TextSnapshot {
        TextSnapshot {
            raw_text: self.raw_text.clone(),
            config: self.config.clone(),
            alignments: self.overrides.clone(),
            frame: self.layout.frame,
        }
    }

    /// Restore an exported element; overrides apply to lines by index
    pub fn import(&mut self, snapshot: TextSnapshot) {
        self.config = snapshot.config;
        self.raw_text = snapshot.raw_text;
        self.lines.clear();
        self.keyed_texts.clear();
        self.overrides = snapshot.alignments;
        self.relayout();

        if self.layout.frame != snapshot.frame {
            tracing::debug!(
                stored = ?snapshot.frame,
                computed = ?self.layout.frame,
                "Imported frame differs from layout, using layout"
            );
        }
    }

    fn default_alignment(&self) -> Alignment {
        self.config.text_align.unwrap_or(self.policy.default_alignment)
    }

    /// Starting size before any fitting
    fn base_size(&self) -> f32 {
        match self.config.font_size {
            FontSize::Px(px) => px,
            FontSize::Auto if self.config.mode == FitMode::Manual => self.config.max_font_size,
            FontSize::Auto => self.config.min_font_size,
        }
    }

    fn block_padding(&self) -> FramePadding {
        FramePadding {
            horizontal: self.config.block_padding_horizontal,
            vertical: self.config.block_padding_vertical,
        }
    }

    fn available_area(&self) -> Rect {
        let padding = self.block_padding();
        self.config
            .canvas()
            .shrink(self.config.insets())
            .shrink(Insets::new(padding.vertical, padding.horizontal, padding.vertical, padding.horizontal))
    }

    /// Pick the size and produce the display lines
    fn fit(&self, available: Rect) -> (f32, Vec<String>) {
        let backend = self.backend.as_ref();
        let config = &self.config;
        let base = config.font_spec(self.base_size());

        match (config.mode, config.font_size) {
            (FitMode::Manual, _) => {
                let size = fit_manual(backend, &base, &self.raw_text, available.width);
                (size, split_lines(&self.raw_text))
            }
            (FitMode::FillCanvas, FontSize::Px(size)) => {
                (size, wrap_text(backend, &base, &self.raw_text, available.width))
            }
            (FitMode::FillCanvas, FontSize::Auto) => {
                let constraints = FitConstraints::new(
                    available.width,
                    available.height,
                    config.min_font_size,
                    config.max_font_size,
                )
                .line_spacing(config.line_spacing);
                let size = find_font_size(backend, &base, &self.raw_text, &constraints, self.policy.height_mode);
                let font = base.with_size(size);
                (size, wrap_text(backend, &font, &self.raw_text, available.width))
            }
        }
    }

    fn relayout(&mut self) {
        let available = self.available_area();
        let padding = self.block_padding();
        let backend = Arc::clone(&self.backend);

        if available.is_empty() || self.raw_text.is_empty() {
            tracing::debug!(
                width = available.width,
                height = available.height,
                empty_text = self.raw_text.is_empty(),
                "Nothing to lay out"
            );
            let font = self.config.font_spec(self.base_size());
            let metrics = metrics_or_fallback(backend.as_ref(), &font);
            self.lines.clear();
            self.layout = TextLayout::empty(font, metrics, available, padding);
            return;
        }

        let (size, texts) = self.fit(available);
        let font = self.config.font_spec(size);
        let metrics = metrics_or_fallback(backend.as_ref(), &font);
        let mode = self.policy.height_mode;

        let overrides: BTreeMap<usize, Alignment> = if self.keyed_texts.is_empty() {
            self.overrides.iter().filter(|(index, _)| **index < texts.len()).map(|(i, a)| (*i, *a)).collect()
        } else {
            remap_overrides(&self.keyed_texts, &self.overrides, &texts)
        };
        let default_alignment = self.default_alignment();

        let mut lines: Vec<TextLine> = Vec::with_capacity(texts.len());
        let mut inputs: Vec<LineInput> = Vec::with_capacity(texts.len());
        for (index, text) in texts.into_iter().enumerate() {
            let alignment = overrides.get(&index).copied().unwrap_or(default_alignment);
            let measured = backend.measure_text(&font, &text);
            let line_metrics = LineMetrics {
                width: measured.tight_width(),
                advance: measured.width,
                height: typography::line_height(&text, &metrics, mode),
                baseline_offset: typography::baseline_offset(&text, &metrics, mode),
                descent: metrics.descent,
            };
            inputs.push(LineInput {
                text: text.clone(),
                alignment,
                width: line_metrics.width,
                height: line_metrics.height,
                baseline_offset: line_metrics.baseline_offset,
                ink_offset: measured.ink_offset(),
            });
            let mut line = TextLine::new(text, index, alignment);
            line.metrics = Some(line_metrics);
            lines.push(line);
        }

        let positioned = position_lines(
            available,
            &inputs,
            self.config.line_spacing,
            self.config.text_position_horizontal,
            self.config.text_position_vertical,
            self.config.mode,
        );
        for (line, placed) in lines.iter_mut().zip(&positioned) {
            line.bounds = Some(placed.rect());
        }

        let rects: Vec<Rect> = positioned.iter().map(PositionedLine::rect).collect();
        let alignments = lines.iter().map(|l| l.alignment);
        let collapsed = if is_mixed_alignment(alignments) {
            None
        } else {
            collapse_paragraph(backend.as_ref(), &font, &self.raw_text, &rects, lines[0].alignment, mode)
        };
        let frame = TextFrame::around(&rects, self.config.line_spacing, padding);

        tracing::debug!(
            font_size = size,
            lines = lines.len(),
            collapsed = collapsed.is_some(),
            frame_width = frame.width,
            frame_height = frame.height,
            "Text laid out"
        );

        self.keyed_texts = lines.iter().map(|l| l.text.clone()).collect();
        self.lines = lines;
        self.overrides = overrides;
        self.layout = TextLayout {
            font_size: size,
            font,
            metrics,
            available,
            lines: positioned,
            bounds: collapsed.map_or(rects, |rect| vec![rect]),
            frame,
        };
    }
}

/// Carry alignment overrides from `previous` lines onto re-wrapped `next`.
///
/// An override follows its line's text to the nearest line with the same
/// text. When nothing matches it stays at its index, but only if the line
/// count is unchanged; otherwise it is dropped.
fn remap_overrides(
    previous: &[String],
    overrides: &BTreeMap<usize, Alignment>,
    next: &[String],
) -> BTreeMap<usize, Alignment> {
    let mut remapped = BTreeMap::new();
    let mut unmatched = Vec::new();

    for (&index, &alignment) in overrides {
        let Some(old) = previous.get(index) else {
            continue;
        };
        let target = next
            .iter()
            .enumerate()
            .filter(|(j, text)| *text == old && !remapped.contains_key(j))
            .min_by_key(|(j, _)| j.abs_diff(index))
            .map(|(j, _)| j);
        match target {
            Some(j) => {
                remapped.insert(j, alignment);
            }
            None => unmatched.push((index, alignment)),
        }
    }

    if previous.len() == next.len() {
        for (index, alignment) in unmatched {
            remapped.entry(index).or_insert(alignment);
        }
    }
    remapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::MetricsSource;
    use crate::measure::{FixedAdvance, TextMeasure, TextMeasurement};
    use crate::render::RecordingSurface;

    fn engine() -> TextEngine {
        TextEngine::new(Arc::new(FixedAdvance::default()), LayoutPolicy::main_text())
    }

    fn px(size: f32) -> ConfigPatch {
        ConfigPatch { font_size: Some(FontSize::Px(size)), ..Default::default() }
    }

    #[test]
    fn test_hello_world_layout() {
        let mut engine = engine();
        engine.update_config(px(40.0));
        engine.set_text("Hello\nWorld");

        let texts: Vec<&str> = engine.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello", "World"]);

        // 1000px square area at (40, 40); lines 100 wide, 28 tall, 10 apart
        let layout = engine.layout();
        assert_eq!(layout.lines[0].x, 490.0);
        assert_eq!(layout.lines[0].y, 507.0);
        assert_eq!(layout.lines[1].y, 545.0);
        assert_eq!(layout.lines[0].baseline, 535.0);

        let frame = engine.frame();
        assert_eq!(frame.rect(), Rect::new(490.0, 507.0, 100.0, 66.0));
    }

    #[test]
    fn test_auto_size_fills_area() {
        let mut engine = engine();
        engine.set_text("Hi");
        assert_eq!(engine.font_size(), 120.0);
    }

    #[test]
    fn test_set_text_idempotent() {
        let mut engine = engine();
        engine.set_text("a few words to wrap around");
        let before = engine.layout().clone();
        engine.set_text("a few words to wrap around");
        assert_eq!(engine.layout(), &before);
    }

    #[test]
    fn test_wrapped_paragraph_collapses_bounds() {
        let mut engine = engine();
        engine.update_config(ConfigPatch {
            font_size: Some(FontSize::Px(40.0)),
            canvas_width: Some(240.0),
            ..Default::default()
        });
        engine.set_text("WIX STUDIO");

        assert_eq!(engine.lines().len(), 2);
        let bounds = engine.text_bounds();
        assert_eq!(bounds.len(), 1);
        assert_eq!(bounds[0].width, 200.0);
        assert_eq!(bounds[0].height, 28.0);
        assert_eq!(bounds[0].x, 20.0);
    }

    #[test]
    fn test_mixed_alignment_keeps_per_line_bounds() {
        let mut engine = engine();
        engine.update_config(ConfigPatch {
            font_size: Some(FontSize::Px(40.0)),
            canvas_width: Some(240.0),
            ..Default::default()
        });
        engine.set_text("WIX STUDIO");
        engine.set_line_alignment(1, Alignment::Right);

        let bounds = engine.text_bounds();
        assert_eq!(bounds.len(), 2);
        // Right-aligned against the available area (40..200)
        assert_eq!(bounds[1].right(), 200.0);
    }

    #[test]
    fn test_override_follows_line_content() {
        let mut engine = engine();
        engine.update_config(px(40.0));
        engine.set_text("alpha\nbeta\ngamma");
        engine.set_line_alignment(2, Alignment::Right);

        engine.set_text("intro\nalpha\nbeta\ngamma");
        assert_eq!(engine.lines()[3].alignment, Alignment::Right);
        assert_eq!(engine.lines()[2].alignment, Alignment::Center);

        // Same count, no matching text: stays at its index
        engine.set_text("w\nx\ny\nz");
        assert_eq!(engine.lines()[3].alignment, Alignment::Right);

        // Count changed, no match: dropped
        engine.set_text("w\nx");
        assert!(engine.lines().iter().all(|l| l.alignment == Alignment::Center));
    }

    #[test]
    fn test_alignment_for_missing_line_ignored() {
        let mut engine = engine();
        engine.set_text("one");
        engine.set_line_alignment(5, Alignment::Left);
        assert!(engine.export().alignments.is_empty());
    }

    #[test]
    fn test_degenerate_area_is_empty() {
        let mut engine = engine();
        engine.update_config(ConfigPatch { canvas_width: Some(60.0), ..Default::default() });
        engine.set_text("Hello");
        assert!(engine.lines().is_empty());
        assert!(engine.text_bounds().is_empty());
        assert!(engine.frame().rect().is_empty());
    }

    #[test]
    fn test_overrides_survive_degenerate_pass() {
        let mut engine = engine();
        engine.update_config(px(40.0));
        engine.set_text("alpha\nbeta");
        engine.set_line_alignment(1, Alignment::Right);

        // 60px canvas minus 40px padding on each side leaves no area
        engine.update_config(ConfigPatch { canvas_width: Some(60.0), ..Default::default() });
        assert!(engine.lines().is_empty());
        assert_eq!(engine.export().alignments, BTreeMap::from([(1, Alignment::Right)]));

        engine.update_config(ConfigPatch { canvas_width: Some(1080.0), ..Default::default() });
        assert_eq!(engine.lines()[1].alignment, Alignment::Right);
        assert_eq!(engine.lines()[0].alignment, Alignment::Center);
    }

    #[test]
    fn test_overrides_survive_clearing_text() {
        let mut engine = engine();
        engine.update_config(px(40.0));
        engine.set_text("alpha\nbeta");
        engine.set_line_alignment(1, Alignment::Right);

        engine.set_text("");
        assert!(engine.lines().is_empty());
        engine.set_text("alpha\nbeta");
        assert_eq!(engine.lines()[1].alignment, Alignment::Right);
    }

    #[test]
    fn test_import_degenerate_keeps_alignments() {
        let mut source = engine();
        source.update_config(px(40.0));
        source.set_text("alpha\nbeta");
        source.set_line_alignment(0, Alignment::Left);
        source.update_config(ConfigPatch { canvas_height: Some(50.0), ..Default::default() });
        let snapshot = source.export();
        assert!(!snapshot.alignments.is_empty());

        let mut restored = engine();
        restored.import(snapshot.clone());
        assert_eq!(restored.export(), snapshot);

        restored.update_config(ConfigPatch { canvas_height: Some(1080.0), ..Default::default() });
        assert_eq!(restored.lines()[0].alignment, Alignment::Left);
    }

    #[test]
    fn test_manual_mode_keeps_breaks() {
        let mut engine = engine();
        engine.update_config(ConfigPatch {
            font_size: Some(FontSize::Px(100.0)),
            mode: Some(FitMode::Manual),
            ..Default::default()
        });
        // 40 chars at 50px each = 2000px, shrunk to the 1000px width
        engine.set_text(&"x".repeat(40));
        assert_eq!(engine.font_size(), 50.0);
        assert_eq!(engine.lines().len(), 1);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut source = engine();
        source.update_config(px(40.0));
        source.set_text("alpha\nbeta");
        source.set_line_alignment(0, Alignment::Left);
        let snapshot = source.export();

        let mut restored = engine();
        restored.import(snapshot.clone());
        assert_eq!(restored.lines(), source.lines());
        assert_eq!(restored.frame(), source.frame());
        assert_eq!(restored.export(), snapshot);
    }

    #[test]
    fn test_render_draws_every_line() {
        let mut engine = engine();
        engine.update_config(px(40.0));
        engine.set_text("Hello\nWorld");
        let mut surface = RecordingSurface::new();
        engine.render(&mut surface);
        assert_eq!(surface.texts(), vec![("Hello", 490.0, 535.0), ("World", 490.0, 573.0)]);
    }

    /// Ink starts 4px right of the pen origin
    struct SideBearing(FixedAdvance);

    impl TextMeasure for SideBearing {
        fn measure_text(&self, font: &FontSpec, text: &str) -> TextMeasurement {
            let mut m = self.0.measure_text(font, text);
            if m.actual_bounding_box_right > 0.0 {
                m.actual_bounding_box_left = -4.0;
            }
            m
        }
    }

    impl MetricsSource for SideBearing {
        fn font_metrics(&self, font: &FontSpec) -> crate::Result<FontMetrics> {
            self.0.font_metrics(font)
        }
    }

    #[test]
    fn test_text_drawn_at_pen_origin() {
        let mut engine = TextEngine::new(Arc::new(SideBearing(FixedAdvance::default())), LayoutPolicy::main_text());
        engine.update_config(px(40.0));
        engine.set_text("Hello");

        // Ink box is 96 wide and centered; the pen sits 4px left of it
        let line = &engine.layout().lines[0];
        assert_eq!(line.width, 96.0);
        assert_eq!(line.x, 492.0);
        assert_eq!(line.pen_x, 488.0);

        let mut surface = RecordingSurface::new();
        engine.render(&mut surface);
        assert_eq!(surface.texts()[0].1, 488.0);
        assert_eq!(engine.text_bounds()[0].x, 492.0);
    }

    #[test]
    fn test_remap_prefers_nearest_duplicate() {
        let previous: Vec<String> = ["a", "b", "a"].iter().map(|s| s.to_string()).collect();
        let overrides = BTreeMap::from([(2, Alignment::Right)]);
        let next: Vec<String> = ["a", "x", "y", "a"].iter().map(|s| s.to_string()).collect();
        let remapped = remap_overrides(&previous, &overrides, &next);
        assert_eq!(remapped, BTreeMap::from([(3, Alignment::Right)]));
    }
}
