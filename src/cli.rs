use clap::{Args, Parser};

#[derive(Parser, Debug)]
#[command(name = "countdown")]
#[command(about = "Display spinner while displaying a number which counts downward")]
#[command(version)]
pub struct Cli {
    /// Spinner type: dot, line, minidot, jump, pulse, points, globe, moon,
    /// monkey, meter, hamburger, bomb, none
    #[arg(short, long, default_value = "dot", env = "COUNTDOWN_SPINNER")]
    pub spinner: String,

    /// Text to display to user while counting
    #[arg(long, default_value = "Liftoff in", env = "COUNTDOWN_TITLE")]
    pub title: String,

    /// Numbers to count from and to (e.g. "100..0" or "-10..10")
    #[arg(
        short,
        long,
        default_value = "100..0",
        env = "COUNTDOWN_RANGE",
        allow_hyphen_values = true
    )]
    pub range: String,

    /// Number of seconds between each iteration
    #[arg(short = 't', long, default_value_t = 1, env = "COUNTDOWN_TIME_INTERVAL")]
    pub time_interval: u64,

    /// Number subtracted from current count at each iteration
    #[arg(
        short,
        long,
        default_value_t = 1,
        env = "COUNTDOWN_DECREMENT",
        allow_negative_numbers = true
    )]
    pub decrement: i64,

    /// Number at which the final phase starts. At this number, the foreground
    /// and background colors are swapped. Can be a number such as '5' or a
    /// percentage such as '10%'
    #[arg(
        short,
        long,
        default_value = "5",
        env = "COUNTDOWN_FINAL_PHASE",
        allow_hyphen_values = true
    )]
    pub final_phase: String,

    /// Keep the final-phase highlight steady instead of blinking it on odd
    /// numbers
    #[arg(long, env = "COUNTDOWN_NO_FLASH")]
    pub no_flash: bool,

    #[command(flatten)]
    pub spinner_style: SpinnerStyleArgs,

    #[command(flatten)]
    pub title_style: TitleStyleArgs,

    /// Padding as "vertical horizontal" or a single value for both
    #[arg(long, default_value = "0 0", env = "COUNTDOWN_PADDING")]
    pub padding: String,

    /// Render the counter with large block digits
    #[arg(short, long, env = "COUNTDOWN_BIG")]
    pub big: bool,
}

#[derive(Args, Debug)]
pub struct SpinnerStyleArgs {
    /// Spinner foreground color
    #[arg(
        id = "spinner.foreground",
        long = "spinner.foreground",
        default_value = "212",
        env = "COUNTDOWN_SPINNER_FOREGROUND"
    )]
    pub foreground: String,

    /// Spinner background color
    #[arg(
        id = "spinner.background",
        long = "spinner.background",
        default_value = "",
        env = "COUNTDOWN_SPINNER_BACKGROUND"
    )]
    pub background: String,
}

#[derive(Args, Debug)]
pub struct TitleStyleArgs {
    /// Title foreground color
    #[arg(
        id = "title.foreground",
        long = "title.foreground",
        default_value = "",
        env = "COUNTDOWN_TITLE_FOREGROUND"
    )]
    pub foreground: String,

    /// Title background color
    #[arg(
        id = "title.background",
        long = "title.background",
        default_value = "",
        env = "COUNTDOWN_TITLE_BACKGROUND"
    )]
    pub background: String,
}
