//! Terminal-backed substrate: ratatui inline viewport over crossterm.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::Paragraph;
use ratatui::{Terminal, TerminalOptions, Viewport};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

use super::runtime::{Msg, Substrate, Timer};
use super::view::Frame;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Longest single wait for input, so a pending signal is noticed promptly.
const MAX_POLL: Duration = Duration::from_millis(50);

/// Map a key press to a message. Only quit keys mean anything.
pub fn key_to_msg(key: KeyEvent) -> Option<Msg> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Msg::Interrupt),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Msg::Interrupt)
        }
        _ => None,
    }
}

/// Consume a pending SIGINT/SIGTERM, if any, as an interrupt.
pub fn signal_to_msg(signalled: &AtomicBool) -> Option<Msg> {
    signalled
        .swap(false, Ordering::Relaxed)
        .then_some(Msg::Interrupt)
}

/// Route SIGINT and SIGTERM into `signalled` instead of terminating, so the
/// loop can draw the killed frame and restore the terminal.
#[cfg(unix)]
fn register_signals(signalled: &Arc<AtomicBool>) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};

    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(signalled))
            .with_context(|| format!("Failed to register handler for signal {signal}"))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn register_signals(_signalled: &Arc<AtomicBool>) -> Result<()> {
    Ok(())
}

/// Renders into a fixed-height region below the cursor and turns timers into
/// deadlines checked between input polls.
///
/// Raw mode is on for the lifetime of the value so Ctrl+C arrives as a key
/// event. Interrupt and terminate signals from outside are caught as well.
pub struct TerminalSubstrate {
    terminal: Term,
    signalled: Arc<AtomicBool>,
    countdown_at: Option<Instant>,
    spinner_at: Option<Instant>,
    area: Rect,
    last_frame_empty: bool,
}

impl TerminalSubstrate {
    pub fn new(height: u16) -> Result<Self> {
        let signalled = Arc::new(AtomicBool::new(false));
        register_signals(&signalled)?;

        enable_raw_mode().context("Failed to enable raw mode")?;

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = match Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        ) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                return Err(e).context("Failed to initialize terminal");
            }
        };

        debug!(height, "terminal:init");
        Ok(Self {
            terminal,
            signalled,
            countdown_at: None,
            spinner_at: None,
            area: Rect::default(),
            last_frame_empty: false,
        })
    }

    /// Leave the terminal usable: a blank final frame is erased, anything else
    /// stays on screen with the cursor placed below it.
    pub fn restore(&mut self) -> Result<()> {
        if self.last_frame_empty {
            self.terminal.clear().context("Failed to clear viewport")?;
            self.terminal
                .set_cursor_position(Position::new(0, self.area.y))
                .context("Failed to move cursor")?;
        } else {
            self.terminal
                .set_cursor_position(Position::new(0, self.area.bottom().saturating_sub(1)))
                .context("Failed to move cursor")?;
        }
        self.terminal.show_cursor().context("Failed to show cursor")?;
        disable_raw_mode().context("Failed to disable raw mode")?;
        if !self.last_frame_empty {
            println!();
        }
        debug!(cleared = self.last_frame_empty, "terminal:restore");
        Ok(())
    }

    fn earliest(&self) -> Option<(Timer, Instant)> {
        match (self.countdown_at, self.spinner_at) {
            (Some(countdown), Some(spinner)) if spinner < countdown => {
                Some((Timer::Spinner, spinner))
            }
            (Some(countdown), _) => Some((Timer::Countdown, countdown)),
            (None, Some(spinner)) => Some((Timer::Spinner, spinner)),
            (None, None) => None,
        }
    }

    fn slot(&mut self, timer: Timer) -> &mut Option<Instant> {
        match timer {
            Timer::Countdown => &mut self.countdown_at,
            Timer::Spinner => &mut self.spinner_at,
        }
    }
}

impl Substrate for TerminalSubstrate {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        let text = frame.to_text();
        let completed = self
            .terminal
            .draw(|f| f.render_widget(Paragraph::new(text), f.area()))
            .context("Failed to draw frame")?;
        self.area = completed.area;
        self.last_frame_empty = frame.is_empty();
        Ok(())
    }

    fn schedule(&mut self, timer: Timer, after: Duration) {
        *self.slot(timer) = Some(Instant::now() + after);
    }

    fn cancel_all(&mut self) {
        self.countdown_at = None;
        self.spinner_at = None;
    }

    fn next_msg(&mut self) -> Result<Msg> {
        loop {
            if let Some(msg) = signal_to_msg(&self.signalled) {
                debug!("terminal:signal");
                return Ok(msg);
            }

            let now = Instant::now();
            let next = self.earliest();
            if let Some((timer, at)) = next
                && at <= now
            {
                *self.slot(timer) = None;
                return Ok(timer.message());
            }

            let timeout = next.map_or(MAX_POLL, |(_, at)| {
                at.saturating_duration_since(now).min(MAX_POLL)
            });
            let ready = match event::poll(timeout) {
                Ok(ready) => ready,
                // A caught signal can cut the wait short
                Err(e) if e.kind() == io::ErrorKind::Interrupted => false,
                Err(e) => return Err(e).context("Failed to poll terminal events"),
            };
            if !ready {
                continue;
            }
            if let Event::Key(key) = event::read().context("Failed to read terminal event")?
                && let Some(msg) = key_to_msg(key)
            {
                debug!(code = ?key.code, "terminal:quit key");
                return Ok(msg);
            }
        }
    }
}

impl Drop for TerminalSubstrate {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            assert_eq!(
                key_to_msg(KeyEvent::new(code, KeyModifiers::NONE)),
                Some(Msg::Interrupt)
            );
        }
        assert_eq!(
            key_to_msg(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Msg::Interrupt)
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(
            key_to_msg(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            key_to_msg(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_signal_flag_maps_to_interrupt_once() {
        let signalled = AtomicBool::new(false);
        assert_eq!(signal_to_msg(&signalled), None);

        signalled.store(true, Ordering::Relaxed);
        assert_eq!(signal_to_msg(&signalled), Some(Msg::Interrupt));
        assert_eq!(signal_to_msg(&signalled), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_sigterm_is_caught() {
        let signalled = Arc::new(AtomicBool::new(false));
        register_signals(&signalled).unwrap();

        signal_hook::low_level::raise(signal_hook::consts::SIGTERM).unwrap();

        assert_eq!(signal_to_msg(&signalled), Some(Msg::Interrupt));
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_msg(key), None);
    }
}
