//! # Caption Font Metrics
//!
//! Captions are set in the PDF base-14 font Helvetica-Bold, so no font file
//! is embedded. Widths below are the Adobe AFM advance widths (1/1000 em)
//! for printable ASCII, which is all a caption ever contains.

/// Points per millimeter.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Advance widths for U+0020..=U+007E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Width used for anything outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

fn char_width(c: char) -> u16 {
    match c {
        ' '..='~' => HELVETICA_BOLD_WIDTHS[c as usize - 0x20],
        _ => FALLBACK_WIDTH,
    }
}

/// Rendered width of `text` in millimeters at `font_size_pt`.
pub fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    units as f32 / 1000.0 * font_size_pt / PT_PER_MM
}

/// Font size that stretches `text` to `target_width_mm`.
///
/// Measures at `trial_pt`, rescales proportionally, then clamps to `max_pt`.
/// Empty text keeps the trial size (clamped).
pub fn fit_font_size(text: &str, trial_pt: f32, target_width_mm: f32, max_pt: f32) -> f32 {
    let measured = text_width_mm(text, trial_pt);
    if measured <= 0.0 {
        return trial_pt.min(max_pt);
    }
    (trial_pt * target_width_mm / measured).min(max_pt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_table_spot_checks() {
        assert_eq!(char_width(' '), 278);
        assert_eq!(char_width('0'), 556);
        assert_eq!(char_width('K'), 722);
        assert_eq!(char_width('F'), 611);
        assert_eq!(char_width('-'), 333);
        assert_eq!(char_width('W'), 944);
        assert_eq!(char_width('~'), 584);
        assert_eq!(char_width('é'), FALLBACK_WIDTH);
    }

    #[test]
    fn test_width_scales_linearly() {
        let w10 = text_width_mm("KF-0001", 10.0);
        let w20 = text_width_mm("KF-0001", 20.0);
        assert!(approx(w20, 2.0 * w10));
        // 3890 units at 10pt = 38.9pt
        assert!(approx(w10, 38.9 / PT_PER_MM));
    }

    #[test]
    fn test_fit_hits_target_when_unclamped() {
        let size = fit_font_size("KF-0001", 5.0, 20.0, 100.0);
        assert!(approx(text_width_mm("KF-0001", size), 20.0));
    }

    #[test]
    fn test_fit_clamps() {
        // Short caption would want a huge font
        let size = fit_font_size("A", 5.0, 20.0, 7.8);
        assert!(approx(size, 7.8));
        assert!(approx(fit_font_size("", 5.0, 20.0, 4.0), 4.0));
    }
}
