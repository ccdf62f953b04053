//! Black-or-white foreground selection for a given background.

use super::color::{self, ColorHandle, Rgb};

/// Backgrounds brighter than this get black text.
///
/// Empirical midpoint; tuned by eye rather than taken from WCAG.
pub const LUMINANCE_THRESHOLD: f64 = 0.4;

/// Relative luminance of an sRGB color (ITU-R BT.709 weights).
pub fn relative_luminance(rgb: Rgb) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let c = f64::from(channel) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// Pick a readable foreground for text drawn on `background`.
pub fn high_contrast(background: &str) -> ColorHandle {
    let background = background.trim();
    if background.is_empty() {
        return ColorHandle::WHITE;
    }

    let luminance = relative_luminance(color::token_to_rgb(background));
    if luminance > LUMINANCE_THRESHOLD {
        ColorHandle::BLACK
    } else {
        ColorHandle::WHITE
    }
}
