//! Greedy word wrapping

use crate::font::FontSpec;
use crate::measure::TextMeasure;

/// Explicit lines of `text`, without wrapping.
///
/// A trailing `\r` is dropped so CRLF input behaves like LF.
pub fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Wrap `text` into display lines no wider than `max_width`.
///
/// Every explicit line is wrapped on its own and a blank one stays blank.
/// Words are never split: a word wider than `max_width` gets a line to
/// itself and overflows.
pub fn wrap_text(
    measure: &(impl TextMeasure + ?Sized),
    font: &FontSpec,
    text: &str,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in split_lines(text) {
        wrap_paragraph(&paragraph, max_width, |s| measure.measure_text(font, s).width, &mut lines);
    }
    lines
}

fn wrap_paragraph(
    paragraph: &str,
    max_width: f32,
    mut measure_fn: impl FnMut(&str) -> f32,
    lines: &mut Vec<String>,
) {
    let mut current = String::new();
    for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure_fn(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    lines.push(current);
}
