//! Inline color markup (`&r`, `&s`, `&w`, `&e`) parsing.

use console_contract::{ColorSegment, ColorToken, ThemeColorSet};

const MARKER: char = '&';

/// Splits `line` into maximal same-colored runs with markup stripped.
///
/// Text starts in the primary color. An `&` not followed by a known marker is literal text, and
/// a trailing run simply ends with the line.
pub fn render_segments(line: &str, palette: &ThemeColorSet) -> Vec<ColorSegment> {
    let mut segments = Vec::new();
    let mut color = palette.color_for(ColorToken::Primary);
    let mut text = String::new();
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == MARKER {
            if let Some(token) = chars.peek().copied().and_then(ColorToken::from_marker) {
                chars.next();
                let next = palette.color_for(token);
                if next != color {
                    flush(&mut segments, &mut text, &color);
                    color = next;
                }
                continue;
            }
        }
        text.push(ch);
    }
    flush(&mut segments, &mut text, &color);

    segments
}

/// Strips markup, keeping only the visible text.
pub fn plain_text(line: &str) -> String {
    render_segments(line, &ThemeColorSet::default())
        .into_iter()
        .map(|segment| segment.text)
        .collect()
}

fn flush(segments: &mut Vec<ColorSegment>, text: &mut String, color: &str) {
    if text.is_empty() {
        return;
    }
    segments.push(ColorSegment {
        text: std::mem::take(text),
        color: color.to_string(),
    });
}
