//! # Greedy Word Wrap
//!
//! Splits text into lines that fit a width budget in dots, using whatever
//! measurement the active glyph rasterizer provides.
//!
//! Words are separated by single ASCII spaces. A word wider than the whole
//! budget is not broken; it gets a line to itself and overflows it.

/// Wrap `text` into lines no wider than `max_width` dots.
///
/// Each candidate line is measured as a whole (`line + " " + word`), so
/// kerning and shaping inside the measurement are respected.
///
/// ## Example
///
/// ```
/// use rasterslip::render::wrap::wrap;
///
/// // 10 dots per character
/// let measure = |s: &str| s.chars().count() as f32 * 10.0;
/// let lines = wrap("one two three", measure, 80.0);
/// assert_eq!(lines, vec!["one two", "three"]);
/// ```
pub fn wrap<F>(text: &str, measure: F, max_width: f32) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ') {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };

        if line.is_empty() || measure(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}
