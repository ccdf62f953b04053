//! Spinner catalogue and animation state.

use std::time::Duration;

/// A named spinner: looping frames plus the time each frame is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinnerDef {
    pub frames: &'static [&'static str],
    pub interval: Duration,
}

const fn per_second(fps: u64) -> Duration {
    Duration::from_nanos(1_000_000_000 / fps)
}

const DOT: SpinnerDef = SpinnerDef {
    frames: &["⣾ ", "⣽ ", "⣻ ", "⢿ ", "⡿ ", "⣟ ", "⣯ ", "⣷ "],
    interval: per_second(10),
};
const LINE: SpinnerDef = SpinnerDef {
    frames: &["|", "/", "-", "\\"],
    interval: per_second(10),
};
const MINI_DOT: SpinnerDef = SpinnerDef {
    frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    interval: per_second(12),
};
const JUMP: SpinnerDef = SpinnerDef {
    frames: &["⢄", "⢂", "⢁", "⡁", "⡈", "⡐", "⡠"],
    interval: per_second(10),
};
const PULSE: SpinnerDef = SpinnerDef {
    frames: &["█", "▓", "▒", "░"],
    interval: per_second(8),
};
const POINTS: SpinnerDef = SpinnerDef {
    frames: &["∙∙∙", "●∙∙", "∙●∙", "∙∙●"],
    interval: per_second(7),
};
const GLOBE: SpinnerDef = SpinnerDef {
    frames: &["🌍", "🌎", "🌏"],
    interval: per_second(4),
};
const MOON: SpinnerDef = SpinnerDef {
    frames: &["🌑", "🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘"],
    interval: per_second(8),
};
const MONKEY: SpinnerDef = SpinnerDef {
    frames: &["🙈", "🙉", "🙊"],
    interval: per_second(3),
};
const METER: SpinnerDef = SpinnerDef {
    frames: &["▱▱▱", "▰▱▱", "▰▰▱", "▰▰▰", "▰▰▱", "▰▱▱", "▱▱▱"],
    interval: per_second(7),
};
const HAMBURGER: SpinnerDef = SpinnerDef {
    frames: &["☱", "☲", "☴", "☲"],
    interval: per_second(3),
};
const BOMB: SpinnerDef = SpinnerDef {
    frames: &["💣", "💥"],
    interval: per_second(2),
};
const NONE: SpinnerDef = SpinnerDef {
    frames: &[""],
    interval: per_second(1),
};

/// Available spinner styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerKind {
    #[default]
    Dot,
    Line,
    MiniDot,
    Jump,
    Pulse,
    Points,
    Globe,
    Moon,
    Monkey,
    Meter,
    Hamburger,
    Bomb,
    None,
}

impl SpinnerKind {
    pub const ALL: [SpinnerKind; 13] = [
        SpinnerKind::Dot,
        SpinnerKind::Line,
        SpinnerKind::MiniDot,
        SpinnerKind::Jump,
        SpinnerKind::Pulse,
        SpinnerKind::Points,
        SpinnerKind::Globe,
        SpinnerKind::Moon,
        SpinnerKind::Monkey,
        SpinnerKind::Meter,
        SpinnerKind::Hamburger,
        SpinnerKind::Bomb,
        SpinnerKind::None,
    ];

    /// Name as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            SpinnerKind::Dot => "dot",
            SpinnerKind::Line => "line",
            SpinnerKind::MiniDot => "minidot",
            SpinnerKind::Jump => "jump",
            SpinnerKind::Pulse => "pulse",
            SpinnerKind::Points => "points",
            SpinnerKind::Globe => "globe",
            SpinnerKind::Moon => "moon",
            SpinnerKind::Monkey => "monkey",
            SpinnerKind::Meter => "meter",
            SpinnerKind::Hamburger => "hamburger",
            SpinnerKind::Bomb => "bomb",
            SpinnerKind::None => "none",
        }
    }

    /// Look up a spinner by name. Returns None for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn def(self) -> &'static SpinnerDef {
        match self {
            SpinnerKind::Dot => &DOT,
            SpinnerKind::Line => &LINE,
            SpinnerKind::MiniDot => &MINI_DOT,
            SpinnerKind::Jump => &JUMP,
            SpinnerKind::Pulse => &PULSE,
            SpinnerKind::Points => &POINTS,
            SpinnerKind::Globe => &GLOBE,
            SpinnerKind::Moon => &MOON,
            SpinnerKind::Monkey => &MONKEY,
            SpinnerKind::Meter => &METER,
            SpinnerKind::Hamburger => &HAMBURGER,
            SpinnerKind::Bomb => &BOMB,
            SpinnerKind::None => &NONE,
        }
    }
}

/// Animation position of a spinner. Advances on its own timer, independent
/// of the countdown.
#[derive(Debug, Clone)]
pub struct SpinnerState {
    def: &'static SpinnerDef,
    frame: usize,
}

impl SpinnerState {
    pub fn new(kind: SpinnerKind) -> Self {
        Self {
            def: kind.def(),
            frame: 0,
        }
    }

    /// Move to the next frame, wrapping at the end
    pub fn advance(&mut self) {
        self.frame = (self.frame + 1) % self.def.frames.len();
    }

    /// Current glyph
    pub fn view(&self) -> &'static str {
        self.def.frames[self.frame]
    }

    pub fn interval(&self) -> Duration {
        self.def.interval
    }
}
