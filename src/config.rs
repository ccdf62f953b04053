//! Validated countdown configuration.
//!
//! The CLI hands over raw strings; everything here is parsed and checked once
//! before the countdown starts so the runtime never sees malformed input.

use std::time::Duration;
use tracing::warn;

use crate::cli::Cli;
use crate::countdown::SpinnerKind;

/// Errors raised while turning command-line values into a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid range format: {0} (expected format: start..end)")]
    InvalidRange(String),

    #[error("invalid start value in range: {0}")]
    InvalidRangeStart(String),

    #[error("invalid end value in range: {0}")]
    InvalidRangeEnd(String),

    #[error("invalid percentage in final-phase: {0}")]
    InvalidPercentage(String),

    #[error("invalid final-phase value: {0}")]
    InvalidFinalPhase(String),

    #[error("invalid padding value: {0}")]
    InvalidPadding(String),

    #[error("invalid padding format: {0} (expected 'v h' or 'v')")]
    InvalidPaddingFormat(String),

    #[error("decrement must be greater than zero (got {0})")]
    InvalidDecrement(i64),
}

/// Foreground/background color tokens for one styled element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorPair {
    pub foreground: String,
    pub background: String,
}

/// Blank space around the rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub vertical: u16,
    pub horizontal: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub spinner: SpinnerKind,
    pub title: String,
    pub start: i64,
    pub end: i64,
    pub interval: Duration,
    /// Always positive; direction comes from `start` and `end`.
    pub decrement: i64,
    /// Absolute counter value at which the final phase begins.
    pub final_phase: i64,
    /// Blink the final-phase highlight by inverting only on odd values.
    pub flash: bool,
    pub spinner_style: ColorPair,
    pub title_style: ColorPair,
    pub padding: Padding,
    pub big: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spinner: SpinnerKind::Dot,
            title: "Liftoff in".to_string(),
            start: 100,
            end: 0,
            interval: Duration::from_secs(1),
            decrement: 1,
            final_phase: 5,
            flash: true,
            spinner_style: ColorPair {
                foreground: "212".to_string(),
                background: String::new(),
            },
            title_style: ColorPair::default(),
            padding: Padding::default(),
            big: false,
        }
    }
}

impl Config {
    /// Parse and validate command-line values.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let (start, end) = parse_range(&cli.range)?;
        let final_phase = parse_final_phase(&cli.final_phase, start, end)?;
        let padding = parse_padding(&cli.padding)?;

        if cli.decrement <= 0 {
            return Err(ConfigError::InvalidDecrement(cli.decrement));
        }

        let spinner = SpinnerKind::parse(&cli.spinner).unwrap_or_else(|| {
            warn!(spinner = %cli.spinner, "config:unknown spinner, using dot");
            SpinnerKind::Dot
        });

        Ok(Self {
            spinner,
            title: cli.title.clone(),
            start,
            end,
            interval: Duration::from_secs(cli.time_interval),
            decrement: cli.decrement,
            final_phase,
            flash: !cli.no_flash,
            spinner_style: ColorPair {
                foreground: cli.spinner_style.foreground.clone(),
                background: cli.spinner_style.background.clone(),
            },
            title_style: ColorPair {
                foreground: cli.title_style.foreground.clone(),
                background: cli.title_style.background.clone(),
            },
            padding,
            big: cli.big,
        })
    }
}

/// Parse a range string like "100..0" into start and end values.
pub fn parse_range(range: &str) -> Result<(i64, i64), ConfigError> {
    let parts: Vec<&str> = range.split("..").collect();
    let [start, end] = parts.as_slice() else {
        return Err(ConfigError::InvalidRange(range.to_string()));
    };

    let start = start
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidRangeStart(start.to_string()))?;
    let end = end
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidRangeEnd(end.to_string()))?;

    Ok((start, end))
}

/// Parse the final phase, either an absolute number or a percentage of the
/// range measured from `end`.
pub fn parse_final_phase(value: &str, start: i64, end: i64) -> Result<i64, ConfigError> {
    let value = value.trim();

    if let Some(percent) = value.strip_suffix('%') {
        let percent: i64 = percent
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPercentage(value.to_string()))?;

        let total = i128::from(start.abs_diff(end));
        let threshold = i128::from(end) + total * i128::from(percent) / 100;
        return i64::try_from(threshold)
            .map_err(|_| ConfigError::InvalidPercentage(value.to_string()));
    }

    value
        .parse()
        .map_err(|_| ConfigError::InvalidFinalPhase(value.to_string()))
}

/// Parse padding as "vertical horizontal" or a single value for both.
pub fn parse_padding(padding: &str) -> Result<Padding, ConfigError> {
    let parse = |part: &str| {
        part.parse::<u16>()
            .map_err(|_| ConfigError::InvalidPadding(part.to_string()))
    };

    match padding.split_whitespace().collect::<Vec<_>>().as_slice() {
        [both] => {
            let value = parse(*both)?;
            Ok(Padding {
                vertical: value,
                horizontal: value,
            })
        }
        [vertical, horizontal] => Ok(Padding {
            vertical: parse(*vertical)?,
            horizontal: parse(*horizontal)?,
        }),
        _ => Err(ConfigError::InvalidPaddingFormat(padding.to_string())),
    }
}
