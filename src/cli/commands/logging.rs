//! `-v` / `SITEGATE_LOG_LEVEL`: how much of the gate, unlock and mail
//! activity reaches the console.

use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in `-v` count order; `error` is the quiet default.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// `SITEGATE_LOG_LEVEL` takes a level name or the equivalent `-v` count.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        let level = level.trim();
        if let Ok(count) = level.parse::<u8>()
            && count <= 5
        {
            return Ok(count);
        }

        LEVELS
            .iter()
            .position(|name| name.eq_ignore_ascii_case(level))
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| format!("invalid log level '{level}', expected one of {LEVELS:?}"))
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Repeat for more detail: -v warn, -vv gate and mail info, -vvv debug, -vvvv trace")
            .env("SITEGATE_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
