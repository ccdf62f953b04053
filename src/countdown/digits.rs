//! Block-art rendering of integers for big-digit mode.

/// Rows per glyph.
pub const GLYPH_HEIGHT: usize = 4;

type Glyph = [&'static str; GLYPH_HEIGHT];

const DIGIT_GLYPHS: [Glyph; 10] = [
    ["┏━┓", "┃ ┃", "┃ ┃", "┗━┛"], // 0
    ["╺┓ ", " ┃ ", " ┃ ", "╺┻╸"], // 1
    ["┏━┓", "  ┃", "┏━┛", "┗━╸"], // 2
    ["┏━┓", " ━┫", "  ┃", "┗━┛"], // 3
    ["╻ ╻", "┃ ┃", "┗━┫", "  ╹"], // 4
    ["┏━╸", "┗━┓", "  ┃", "┗━┛"], // 5
    ["┏━╸", "┣━┓", "┃ ┃", "┗━┛"], // 6
    ["╺━┓", "  ┃", "  ┃", "  ╹"], // 7
    ["┏━┓", "┣━┫", "┃ ┃", "┗━┛"], // 8
    ["┏━┓", "┗━┫", "  ┃", "┗━┛"], // 9
];

const MINUS_GLYPH: Glyph = ["   ", "╺━╸", "   ", "   "];

/// Render `value` as one string per glyph row, glyphs separated by a space.
pub fn big_digit_lines(value: i64) -> Vec<String> {
    let mut glyphs: Vec<&Glyph> = Vec::new();
    if value < 0 {
        glyphs.push(&MINUS_GLYPH);
    }
    glyphs.extend(
        value
            .unsigned_abs()
            .to_string()
            .bytes()
            .map(|b| &DIGIT_GLYPHS[(b - b'0') as usize]),
    );

    (0..GLYPH_HEIGHT)
        .map(|row| {
            glyphs
                .iter()
                .map(|glyph| glyph[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Render `value` as a multi-line block-art string.
pub fn render_big_digits(value: i64) -> String {
    big_digit_lines(value).join("\n")
}
