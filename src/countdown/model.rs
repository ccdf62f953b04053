//! Countdown state machine.

use tracing::{debug, info};

use super::runtime::{Cmd, Msg};
use super::spinner::SpinnerState;
use super::view::{self, Frame};
use crate::config::Config;

/// Lifecycle of a countdown. `Completed` and `Killed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Reached the end value.
    Completed,
    /// Stopped by the user before reaching the end value.
    Killed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `start > end`
    Descending,
    /// `start <= end`
    Ascending,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    config: Config,
    current: i64,
    phase: Phase,
    spinner: SpinnerState,
    ticks: u64,
}

impl Countdown {
    pub fn new(config: Config) -> Self {
        // An empty range has nothing to count
        let phase = if config.start == config.end {
            Phase::Completed
        } else {
            Phase::Running
        };
        Self {
            current: config.start,
            spinner: SpinnerState::new(config.spinner),
            phase,
            ticks: 0,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn spinner(&self) -> &SpinnerState {
        &self.spinner
    }

    pub fn direction(&self) -> Direction {
        if self.config.start > self.config.end {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Whether the counter has crossed the final-phase threshold.
    pub fn is_in_final_phase(&self) -> bool {
        match self.direction() {
            Direction::Descending => self.current <= self.config.final_phase,
            Direction::Ascending => self.current >= self.config.final_phase,
        }
    }

    /// Commands to run at start-up: both timers, or an immediate quit when
    /// there is nothing to count.
    pub fn init(&self) -> Cmd {
        if !self.is_running() {
            return Cmd::Quit;
        }
        Cmd::Batch(vec![
            Cmd::SpinnerTick(self.spinner.interval()),
            Cmd::Tick(self.config.interval),
        ])
    }

    pub fn update(&mut self, msg: Msg) -> Cmd {
        match msg {
            Msg::Interrupt => {
                if self.is_running() {
                    self.phase = Phase::Killed;
                    info!(current = self.current, "countdown:killed");
                }
                Cmd::Quit
            }
            Msg::Tick => {
                if !self.is_running() {
                    return Cmd::None;
                }
                self.advance()
            }
            Msg::SpinnerTick => {
                if !self.is_running() {
                    return Cmd::None;
                }
                self.spinner.advance();
                Cmd::SpinnerTick(self.spinner.interval())
            }
        }
    }

    pub fn view(&self) -> Frame {
        view::compose(self)
    }

    fn advance(&mut self) -> Cmd {
        self.ticks += 1;
        let end = self.config.end;
        let reached_end = match self.direction() {
            Direction::Descending => {
                self.current = self.current.saturating_sub(self.config.decrement);
                self.current <= end
            }
            Direction::Ascending => {
                self.current = self.current.saturating_add(self.config.decrement);
                self.current >= end
            }
        };

        if reached_end {
            self.current = end;
            self.phase = Phase::Completed;
            info!(ticks = self.ticks, end, "countdown:completed");
            return Cmd::Quit;
        }

        debug!(
            current = self.current,
            final_phase = self.is_in_final_phase(),
            "countdown:tick"
        );
        Cmd::Tick(self.config.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::SpinnerKind;
    use std::time::Duration;

    fn config(start: i64, end: i64, decrement: i64, final_phase: i64) -> Config {
        Config {
            spinner: SpinnerKind::None,
            title: "Test".to_string(),
            start,
            end,
            decrement,
            final_phase,
            ..Config::default()
        }
    }

    /// Feed ticks until the model quits; returns the number of ticks sent.
    fn run_to_completion(model: &mut Countdown) -> u64 {
        let mut sent = 0;
        loop {
            sent += 1;
            assert!(sent < 10_000, "countdown never completed");
            if model.update(Msg::Tick) == Cmd::Quit {
                return sent;
            }
        }
    }

    #[test]
    fn test_new_model() {
        let model = Countdown::new(config(10, 0, 1, 2));
        assert_eq!(model.current(), 10);
        assert_eq!(model.phase(), Phase::Running);
        assert_eq!(model.config().title, "Test");
        assert_eq!(model.direction(), Direction::Descending);
    }

    #[test]
    fn test_direction() {
        assert_eq!(
            Countdown::new(config(0, 10, 1, 8)).direction(),
            Direction::Ascending
        );
        assert_eq!(
            Countdown::new(config(-5, -10, 1, -8)).direction(),
            Direction::Descending
        );
    }

    #[test]
    fn test_is_in_final_phase() {
        let cases = [
            // (start, end, current, final_phase, want)
            (100, 0, 50, 5, false),
            (100, 0, 3, 5, true),
            (100, 0, 5, 5, true),
            (100, 0, 6, 5, false),
            (0, 100, 50, 95, false),
            (0, 100, 97, 95, true),
            (0, 100, 95, 95, true),
            (0, 100, 94, 95, false),
        ];
        for (start, end, current, final_phase, want) in cases {
            let mut model = Countdown::new(config(start, end, 1, final_phase));
            model.current = current;
            assert_eq!(
                model.is_in_final_phase(),
                want,
                "{start}..{end} at {current} (final {final_phase})"
            );
        }
    }

    #[test]
    fn test_init_schedules_both_timers() {
        let mut cfg = config(10, 0, 1, 2);
        cfg.interval = Duration::from_secs(3);
        let model = Countdown::new(cfg);
        assert_eq!(
            model.init(),
            Cmd::Batch(vec![
                Cmd::SpinnerTick(Duration::from_secs(1)),
                Cmd::Tick(Duration::from_secs(3)),
            ])
        );
    }

    #[test]
    fn test_tick_descending() {
        let mut model = Countdown::new(config(10, 0, 3, 2));
        assert_eq!(model.update(Msg::Tick), Cmd::Tick(Duration::from_secs(1)));
        assert_eq!(model.current(), 7);
        assert_eq!(model.phase(), Phase::Running);
    }

    #[test]
    fn test_tick_ascending() {
        let mut model = Countdown::new(config(-4, 4, 2, 2));
        model.update(Msg::Tick);
        assert_eq!(model.current(), -2);
    }

    #[test]
    fn test_completion_tick_count_and_clamp() {
        let cases = [(100, 0, 1), (100, 0, 7), (10, 0, 3), (0, 10, 3), (-5, 5, 4), (0, 1, 100)];
        for (start, end, decrement) in cases {
            let mut model = Countdown::new(config(start, end, decrement, end));
            let ticks = run_to_completion(&mut model);
            let want = (start - end).unsigned_abs().div_ceil(decrement as u64);
            assert_eq!(ticks, want, "{start}..{end} by {decrement}");
            assert_eq!(model.ticks, want);
            assert_eq!(model.current(), end, "never overshoots");
            assert_eq!(model.phase(), Phase::Completed);
        }
    }

    #[test]
    fn test_empty_range_completes_immediately() {
        let model = Countdown::new(config(5, 5, 1, 5));
        assert_eq!(model.phase(), Phase::Completed);
        assert_eq!(model.init(), Cmd::Quit);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let mut model = Countdown::new(config(i64::MIN + 1, i64::MAX, i64::MAX, 0));
        assert_eq!(run_to_completion(&mut model), 2);
        assert_eq!(model.current(), i64::MAX);
    }

    #[test]
    fn test_interrupt_kills() {
        let mut model = Countdown::new(config(10, 0, 1, 2));
        model.update(Msg::Tick);
        assert_eq!(model.update(Msg::Interrupt), Cmd::Quit);
        assert_eq!(model.phase(), Phase::Killed);
        assert_eq!(model.current(), 9);
    }

    #[test]
    fn test_terminal_states_are_frozen() {
        let mut model = Countdown::new(config(10, 0, 1, 2));
        model.update(Msg::Interrupt);
        assert_eq!(model.update(Msg::Tick), Cmd::None);
        assert_eq!(model.update(Msg::SpinnerTick), Cmd::None);
        assert_eq!(model.current(), 10);
        assert_eq!(model.phase(), Phase::Killed);

        let mut model = Countdown::new(config(1, 0, 1, 0));
        assert_eq!(model.update(Msg::Tick), Cmd::Quit);
        assert_eq!(model.update(Msg::Interrupt), Cmd::Quit);
        assert_eq!(model.phase(), Phase::Completed);
    }

    #[test]
    fn test_spinner_tick_does_not_touch_count() {
        let mut cfg = config(10, 0, 1, 2);
        cfg.spinner = SpinnerKind::Line;
        let mut model = Countdown::new(cfg);
        let cmd = model.update(Msg::SpinnerTick);
        assert_eq!(cmd, Cmd::SpinnerTick(Duration::from_millis(100)));
        assert_eq!(model.spinner().view(), "/");
        assert_eq!(model.current(), 10);
        assert_eq!(model.ticks, 0);
    }
}
