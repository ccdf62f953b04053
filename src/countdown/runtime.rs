//! Single-threaded event loop driving the countdown.
//!
//! The model reacts to messages and returns commands; the substrate renders
//! frames, arms timers and delivers the next message. Messages are handled
//! one at a time and a timer is only re-armed by the command its own message
//! produced, so ticks never overlap.

use anyhow::Result;
use std::time::Duration;
use tracing::trace;

use super::model::{Countdown, Phase};
use super::view::Frame;

/// Events delivered to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// Countdown interval elapsed.
    Tick,
    /// Spinner frame interval elapsed.
    SpinnerTick,
    /// User asked to stop (q, Esc, Ctrl+C).
    Interrupt,
}

/// Side effects requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    #[default]
    None,
    /// Deliver `Msg::Tick` after the duration.
    Tick(Duration),
    /// Deliver `Msg::SpinnerTick` after the duration.
    SpinnerTick(Duration),
    Batch(Vec<Cmd>),
    /// Render one last frame and stop.
    Quit,
}

/// Timers a substrate must be able to arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    Countdown,
    Spinner,
}

impl Timer {
    /// Message delivered when this timer fires.
    pub fn message(self) -> Msg {
        match self {
            Timer::Countdown => Msg::Tick,
            Timer::Spinner => Msg::SpinnerTick,
        }
    }
}

/// How the countdown ended. Both are clean exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Killed,
}

/// Rendering and event delivery the countdown is built on.
pub trait Substrate {
    /// Replace whatever was drawn last with `frame`.
    fn render(&mut self, frame: &Frame) -> Result<()>;

    /// Arm `timer` to fire once after `after`.
    fn schedule(&mut self, timer: Timer, after: Duration);

    /// Disarm every pending timer.
    fn cancel_all(&mut self);

    /// Block until the next timer fires or input arrives.
    fn next_msg(&mut self) -> Result<Msg>;
}

/// Run the countdown until it completes or is killed.
pub fn run<S: Substrate>(model: &mut Countdown, substrate: &mut S) -> Result<Outcome> {
    let mut cmd = model.init();
    loop {
        let quit = execute(cmd, substrate);
        substrate.render(&model.view())?;
        if quit {
            substrate.cancel_all();
            break;
        }

        let msg = substrate.next_msg()?;
        trace!(?msg, "runtime:msg");
        cmd = model.update(msg);
    }

    Ok(match model.phase() {
        Phase::Killed => Outcome::Killed,
        Phase::Completed | Phase::Running => Outcome::Completed,
    })
}

/// Apply a command to the substrate. Returns true when the command asks to quit.
fn execute<S: Substrate>(cmd: Cmd, substrate: &mut S) -> bool {
    match cmd {
        Cmd::None => false,
        Cmd::Tick(after) => {
            substrate.schedule(Timer::Countdown, after);
            false
        }
        Cmd::SpinnerTick(after) => {
            substrate.schedule(Timer::Spinner, after);
            false
        }
        Cmd::Batch(cmds) => cmds
            .into_iter()
            .fold(false, |quit, cmd| execute(cmd, substrate) || quit),
        Cmd::Quit => true,
    }
}
