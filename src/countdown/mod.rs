//! Terminal countdown: state machine, rendering and the event loop.

mod color;
mod contrast;
mod digits;
mod model;
mod runtime;
mod spinner;
mod terminal;
mod view;

use anyhow::Result;

use crate::config::Config;
use model::Countdown;
use terminal::TerminalSubstrate;

pub use runtime::Outcome;
pub use spinner::SpinnerKind;

/// Run a countdown in the current terminal until it completes or the user
/// quits.
pub fn run(config: Config) -> Result<Outcome> {
    let height = view::frame_height(&config);
    let mut model = Countdown::new(config);
    let mut substrate = TerminalSubstrate::new(height)?;

    let result = runtime::run(&mut model, &mut substrate);
    let restored = substrate.restore();

    let outcome = result?;
    restored?;
    Ok(outcome)
}
