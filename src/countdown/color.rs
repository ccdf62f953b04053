//! Color token resolution.
//!
//! A color token is what the user passes on the command line: empty (terminal
//! default), an ANSI-256 index such as `212`, a hex value such as `#f0a` or
//! `#ff00aa`, or a color name understood by the terminal backend.

use std::str::FromStr;

use ratatui::style::Color;

/// Fallback used whenever a token cannot be mapped to RGB.
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Standard and bright ANSI colors (indices 0-15).
const ANSI_16: [Rgb; 16] = [
    Rgb::new(0, 0, 0),       // black
    Rgb::new(128, 0, 0),     // red
    Rgb::new(0, 128, 0),     // green
    Rgb::new(128, 128, 0),   // yellow
    Rgb::new(0, 0, 128),     // blue
    Rgb::new(128, 0, 128),   // magenta
    Rgb::new(0, 128, 128),   // cyan
    Rgb::new(192, 192, 192), // white
    Rgb::new(128, 128, 128), // bright black
    Rgb::new(255, 0, 0),     // bright red
    Rgb::new(0, 255, 0),     // bright green
    Rgb::new(255, 255, 0),   // bright yellow
    Rgb::new(0, 0, 255),     // bright blue
    Rgb::new(255, 0, 255),   // bright magenta
    Rgb::new(0, 255, 255),   // bright cyan
    Rgb::new(255, 255, 255), // bright white
];

/// Opaque RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A resolved color, ready to hand to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColorHandle {
    /// Use the terminal's default color.
    #[default]
    NoColor,
    /// ANSI 256-color palette index.
    Ansi256(u8),
    /// Hex value or color name, interpreted by the renderer.
    Literal(String),
}

impl ColorHandle {
    pub const BLACK: ColorHandle = ColorHandle::Ansi256(0);
    pub const WHITE: ColorHandle = ColorHandle::Ansi256(15);

    /// Convert into a ratatui color. `None` means "leave the terminal default".
    ///
    /// Literals that are neither valid hex nor a known color name resolve to
    /// `None` rather than failing the frame.
    pub fn to_color(&self) -> Option<Color> {
        match self {
            ColorHandle::NoColor => None,
            ColorHandle::Ansi256(index) => Some(Color::Indexed(*index)),
            ColorHandle::Literal(token) => {
                if token.starts_with('#') {
                    hex_to_rgb(token).map(|rgb| Color::Rgb(rgb.r, rgb.g, rgb.b))
                } else {
                    Color::from_str(token).ok()
                }
            }
        }
    }
}

/// Resolve a color token into a rendering handle.
pub fn resolve(token: &str) -> ColorHandle {
    let token = token.trim();
    if token.is_empty() {
        return ColorHandle::NoColor;
    }
    match token.parse::<u8>() {
        Ok(index) => ColorHandle::Ansi256(index),
        Err(_) => ColorHandle::Literal(token.to_string()),
    }
}

/// Map a color token to RGB for contrast calculations.
///
/// Hex tokens must carry a leading `#`; bare digits are read as ANSI indices.
/// Anything unrecognised, including the empty token, maps to white.
pub fn token_to_rgb(token: &str) -> Rgb {
    let token = token.trim();
    if token.starts_with('#') {
        return hex_to_rgb(token).unwrap_or(WHITE);
    }
    match token.parse::<i64>() {
        Ok(index) => ansi256_to_rgb(index),
        Err(_) => WHITE,
    }
}

/// Decode `#RGB` / `#RRGGBB` (the `#` is optional).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };

    let value = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Rgb::new(
        (value >> 16) as u8,
        ((value >> 8) & 0xFF) as u8,
        (value & 0xFF) as u8,
    ))
}

/// Approximate RGB for an ANSI 256-color index.
pub fn ansi256_to_rgb(index: i64) -> Rgb {
    let Ok(index) = u8::try_from(index) else {
        return WHITE;
    };

    match index {
        0..=15 => ANSI_16[index as usize],
        16..=231 => {
            let n = index - 16;
            Rgb::new(cube_level(n / 36), cube_level((n % 36) / 6), cube_level(n % 6))
        }
        _ => {
            let gray = 8 + (index - 232) * 10;
            Rgb::new(gray, gray, gray)
        }
    }
}

/// Channel value for a 6x6x6 cube component: 0, 95, 135, 175, 215, 255.
fn cube_level(component: u8) -> u8 {
    if component == 0 {
        0
    } else {
        55 + component * 40
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_empty() {
        assert_eq!(resolve(""), ColorHandle::NoColor);
        assert_eq!(resolve("   "), ColorHandle::NoColor);
    }

    #[test]
    fn test_resolve_ansi_index() {
        assert_eq!(resolve("212"), ColorHandle::Ansi256(212));
        assert_eq!(resolve("0"), ColorHandle::Ansi256(0));
    }

    #[test]
    fn test_resolve_literal() {
        assert_eq!(resolve("#ff0000"), ColorHandle::Literal("#ff0000".to_string()));
        assert_eq!(resolve("red"), ColorHandle::Literal("red".to_string()));
        // Out of palette range is not an index
        assert_eq!(resolve("256"), ColorHandle::Literal("256".to_string()));
    }

    #[test]
    fn test_handle_to_color() {
        assert_eq!(ColorHandle::NoColor.to_color(), None);
        assert_eq!(ColorHandle::Ansi256(212).to_color(), Some(Color::Indexed(212)));
        assert_eq!(
            ColorHandle::Literal("#f0a".to_string()).to_color(),
            Some(Color::Rgb(255, 0, 170))
        );
        assert_eq!(
            ColorHandle::Literal("red".to_string()).to_color(),
            Some(Color::Red)
        );
        assert_eq!(ColorHandle::Literal("#zzz".to_string()).to_color(), None);
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#ff0000"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(hex_to_rgb("00ff7f"), Some(Rgb::new(0, 255, 127)));
        assert_eq!(hex_to_rgb("#1a2B3c"), Some(Rgb::new(0x1a, 0x2b, 0x3c)));
    }

    #[test]
    fn test_hex_to_rgb_short_form() {
        assert_eq!(hex_to_rgb("#f00"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(hex_to_rgb("abc"), Some(Rgb::new(0xaa, 0xbb, 0xcc)));
        assert_eq!(hex_to_rgb("#000"), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_hex_to_rgb_invalid() {
        assert_eq!(hex_to_rgb("#ff00"), None);
        assert_eq!(hex_to_rgb("#gg0000"), None);
        assert_eq!(hex_to_rgb(""), None);
    }

    #[test]
    fn test_ansi256_standard_table() {
        assert_eq!(ansi256_to_rgb(0), Rgb::new(0, 0, 0));
        assert_eq!(ansi256_to_rgb(1), Rgb::new(128, 0, 0));
        assert_eq!(ansi256_to_rgb(7), Rgb::new(192, 192, 192));
        assert_eq!(ansi256_to_rgb(15), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_ansi256_color_cube() {
        assert_eq!(ansi256_to_rgb(16), Rgb::new(0, 0, 0));
        assert_eq!(ansi256_to_rgb(196), Rgb::new(255, 0, 0));
        // 212 = 16 + 5*36 + 2*6 + 4
        assert_eq!(ansi256_to_rgb(212), Rgb::new(255, 135, 215));
        assert_eq!(ansi256_to_rgb(231), Rgb::new(255, 255, 255));

        for index in 16..=231i64 {
            let n = index - 16;
            let level = |c: i64| if c == 0 { 0 } else { (55 + c * 40) as u8 };
            assert_eq!(
                ansi256_to_rgb(index),
                Rgb::new(level(n / 36), level((n % 36) / 6), level(n % 6)),
                "index {index}"
            );
        }
    }

    #[test]
    fn test_ansi256_grayscale() {
        assert_eq!(ansi256_to_rgb(232), Rgb::new(8, 8, 8));
        assert_eq!(ansi256_to_rgb(244), Rgb::new(128, 128, 128));
        assert_eq!(ansi256_to_rgb(255), Rgb::new(238, 238, 238));
    }

    #[test]
    fn test_ansi256_out_of_range() {
        assert_eq!(ansi256_to_rgb(-1), WHITE);
        assert_eq!(ansi256_to_rgb(256), WHITE);
    }

    #[test]
    fn test_token_to_rgb() {
        assert_eq!(token_to_rgb("#000000"), Rgb::new(0, 0, 0));
        assert_eq!(token_to_rgb("9"), Rgb::new(255, 0, 0));
        assert_eq!(token_to_rgb(" 232 "), Rgb::new(8, 8, 8));
        assert_eq!(token_to_rgb(""), WHITE);
        assert_eq!(token_to_rgb("purple"), WHITE);
        assert_eq!(token_to_rgb("300"), WHITE);
        assert_eq!(token_to_rgb("#12"), WHITE);
    }
}
