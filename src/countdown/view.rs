//! Frame composition: spinner, title and counter, styled and padded.
//!
//! Styles are plain values. The final-phase look is derived from the
//! configuration by [`final_phase_style`] instead of mutating the base styles.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::color::{self, ColorHandle};
use super::contrast;
use super::digits::{self, GLYPH_HEIGHT};
use super::model::{Countdown, Phase};
use crate::config::{ColorPair, Config, Padding};

/// Marker appended to the title when the user stops the countdown.
pub const KILLED_MARKER: &str = "(killed)";

/// One rendered frame. An empty frame draws nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    lines: Vec<Line<'static>>,
}

impl Frame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_text(&self) -> Text<'static> {
        Text::from(self.lines.clone())
    }

    /// The frame's text without any styling, rows joined by `\n`.
    pub fn to_plain_string(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Immutable description of how a piece of text is drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub foreground: ColorHandle,
    pub background: ColorHandle,
    pub bold: bool,
    pub reversed: bool,
}

impl TextStyle {
    pub fn from_pair(pair: &ColorPair) -> Self {
        Self {
            foreground: color::resolve(&pair.foreground),
            background: color::resolve(&pair.background),
            ..Self::default()
        }
    }

    pub fn to_style(&self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.foreground.to_color() {
            style = style.fg(fg);
        }
        if let Some(bg) = self.background.to_color() {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.reversed {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    fn span(&self, content: impl Into<String>) -> Span<'static> {
        Span::styled(content.into(), self.to_style())
    }
}

/// Style of the title and counter once the final phase starts.
///
/// The configured foreground (title first, then spinner) becomes the
/// background, and the text switches to black or white for contrast. With no
/// foreground configured anywhere, the terminal's default colors are reversed.
pub fn final_phase_style(config: &Config) -> TextStyle {
    let highlight = [&config.title_style.foreground, &config.spinner_style.foreground]
        .into_iter()
        .map(|token| token.trim())
        .find(|token| !token.is_empty());

    match highlight {
        Some(token) => TextStyle {
            foreground: contrast::high_contrast(token),
            background: color::resolve(token),
            bold: true,
            reversed: false,
        },
        None => TextStyle {
            bold: true,
            reversed: true,
            ..TextStyle::default()
        },
    }
}

/// Rows the frame occupies for a given configuration, padding included.
/// Saturates at `u16::MAX`; the terminal clamps the viewport anyway.
pub fn frame_height(config: &Config) -> u16 {
    let content = if config.big { 1 + GLYPH_HEIGHT as u16 } else { 1 };
    content.saturating_add(config.padding.vertical.saturating_mul(2))
}

/// Compose the frame for the current state.
pub fn compose(countdown: &Countdown) -> Frame {
    let config = countdown.config();
    let spinner_style = TextStyle::from_pair(&config.spinner_style);
    let title_style = TextStyle::from_pair(&config.title_style);

    let spinner = spinner_style.span(countdown.spinner().view());
    let title = format!("{} ", config.title);

    let lines = match countdown.phase() {
        Phase::Completed => return Frame::empty(),
        Phase::Killed => vec![Line::from(vec![
            spinner,
            Span::raw(" "),
            title_style.span(title),
            title_style.span(KILLED_MARKER),
        ])],
        Phase::Running => {
            let current = countdown.current();
            let inverted = countdown.is_in_final_phase()
                && (!config.flash || current.rem_euclid(2) == 1);
            let text_style = if inverted {
                final_phase_style(config)
            } else {
                title_style
            };

            if config.big {
                let mut lines = vec![Line::from(vec![
                    spinner,
                    Span::raw(" "),
                    text_style.span(title),
                ])];
                lines.extend(
                    digits::render_big_digits(current)
                        .lines()
                        .map(|row| Line::from(text_style.span(row))),
                );
                lines
            } else {
                vec![Line::from(vec![
                    spinner,
                    Span::raw(" "),
                    text_style.span(title),
                    text_style.span(current.to_string()),
                ])]
            }
        }
    };

    Frame {
        lines: pad(lines, config.padding),
    }
}

/// Surround the content with padding, filling every row to the width of the
/// widest one so the block stays rectangular.
fn pad(lines: Vec<Line<'static>>, padding: Padding) -> Vec<Line<'static>> {
    let horizontal = padding.horizontal as usize;
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0);
    let blank = || Line::raw(" ".repeat(content_width + 2 * horizontal));

    let mut padded: Vec<Line<'static>> = (0..padding.vertical).map(|_| blank()).collect();
    for line in lines {
        let fill = content_width - line.width();
        let mut spans = Vec::with_capacity(line.spans.len() + 2);
        if horizontal > 0 {
            spans.push(Span::raw(" ".repeat(horizontal)));
        }
        spans.extend(line.spans);
        if horizontal + fill > 0 {
            spans.push(Span::raw(" ".repeat(horizontal + fill)));
        }
        padded.push(Line::from(spans));
    }
    padded.extend((0..padding.vertical).map(|_| blank()));
    padded
}
