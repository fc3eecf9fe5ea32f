//! Greedy paragraph wrapping with font-size autoscaling.

/// Width measurement at a given font size. The production implementation
/// queries a pango layout; tests substitute fixed-width metrics.
pub trait Measure {
    fn width(&mut self, text: &str, size: f64) -> f64;
}

/// Box constraints for a fitted text block.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FitOptions {
    pub max_width: f64,
    pub max_lines: usize,
    pub max_size: f64,
    pub min_size: f64,
}

impl FitOptions {
    pub fn new(max_width: f64, max_lines: usize) -> Self {
        Self { max_width, max_lines, max_size: 12.0, min_size: 10.0 }
    }
}

/// The outcome of fitting: a settled font size and the lines to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub size: f64,
    pub lines: Vec<String>,
}

/// Wraps `text` into lines no wider than `opt.max_width`, shrinking the font
/// size one unit at a time while the block overflows `opt.max_lines`. The
/// size never drops below `opt.min_size`; if the text still does not fit at
/// the minimum, the surplus lines are dropped.
pub fn fit(text: &str, opt: &FitOptions, measure: &mut impl Measure) -> FittedText {
    let mut size = opt.max_size;
    let mut lines = wrap(text, opt.max_width, size, measure);
    while lines.len() > opt.max_lines && size > opt.min_size {
        size -= 1.0;
        lines = wrap(text, opt.max_width, size, measure);
    }
    lines.truncate(opt.max_lines);
    FittedText { size, lines }
}

/// Splits on explicit line breaks first, then wraps each paragraph greedily:
/// a line only breaks before the word that would overflow it, never mid-word,
/// so a single word wider than the box still occupies one line.
fn wrap(text: &str, max_width: f64, size: f64, measure: &mut impl Measure) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.trim().split('\n') {
        let mut line = String::new();
        for word in paragraph.split(' ') {
            let probe = format!("{line}{word} ");
            if measure.width(&probe, size) > max_width && !line.is_empty() {
                lines.push(line.trim().to_string());
                line = format!("{word} ");
            } else {
                line = probe;
            }
        }
        if !line.trim().is_empty() {
            lines.push(line.trim().to_string());
        }
    }
    lines
}
