//! Hand-rolled GNU-style argument scanning.
//!
//! Accepted forms for the back option: `-b`, `--back` (value 1), `-b 2`,
//! `--back 2`, `-b2`, `--back=2`. A separate value is only taken if it does
//! not look like an option itself, so `-b -h` means "back 1, then help".

use std::num::IntErrorKind;

use crate::domain::Options;
use crate::errors::ArgError;

/// Value used when `-b`/`--back` is given without one.
const IMPLICIT_BACK: &str = "1";

/// What the argument list asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch and print with these options.
    Run(Options),
    /// Print usage and stop.
    Help,
    /// Print version information and stop.
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Ready,
    /// Just saw a bare `-b`/`--back`; the next token may be its value.
    ExpectBackValue,
}

/// Scan the arguments (program name excluded).
///
/// Scanning stops at the first unknown token or at help/version. The back
/// value is checked only once scanning is done, and the last one given wins.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Command, ArgError> {
    let mut one_line = false;
    let mut verbose = false;
    let mut insecure = false;
    let mut back: Option<String> = None;
    let mut state = ScanState::Ready;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_ref();

        if state == ScanState::ExpectBackValue {
            state = ScanState::Ready;
            if takes_back_value(arg) {
                back = Some(arg.to_string());
                i += 1;
            }
            // otherwise the implicit value stands and `arg` is scanned as usual
            continue;
        }

        match arg {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-o" | "--one-line" => one_line = true,
            "-v" | "--verbose" => verbose = true,
            "-k" | "--insecure" => insecure = true,
            "-b" | "--back" => {
                back = Some(IMPLICIT_BACK.to_string());
                state = ScanState::ExpectBackValue;
            }
            _ => match fused_back_value(arg) {
                Some(value) => back = Some(value.to_string()),
                None => return Err(ArgError::UnknownOption(arg.to_string())),
            },
        }
        i += 1;
    }

    let previous = match back {
        Some(text) => parse_back(&text)?,
        None => 0,
    };

    Ok(Command::Run(Options {
        one_line,
        previous,
        verbose,
        insecure,
    }))
}

/// Whether the token after a bare `-b`/`--back` is its value.
///
/// Anything starting with `-` is treated as the next option instead.
pub fn takes_back_value(next: &str) -> bool {
    !next.starts_with('-')
}

/// Value fused onto the option: `--back=N` or `-bN`.
///
/// `-b` followed by something starting with `-` (e.g. `-b-9`) is not a back
/// option at all, so `None` is returned and the token is unknown.
/// `--back=` keeps its remainder verbatim, sign included.
fn fused_back_value(arg: &str) -> Option<&str> {
    if let Some(value) = arg.strip_prefix("--back=") {
        return Some(value);
    }
    arg.strip_prefix("-b")
        .filter(|rest| !rest.is_empty() && !rest.starts_with('-'))
}

/// Convert back value text into an offset.
pub fn parse_back(text: &str) -> Result<u32, ArgError> {
    match text.parse::<i64>() {
        Ok(value) if value < 0 => Err(ArgError::NegativeBack(text.to_string())),
        Ok(value) => u32::try_from(value).map_err(|_| ArgError::BackOutOfRange(text.to_string())),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Err(ArgError::BackOutOfRange(text.to_string()))
            }
            _ => Err(ArgError::InvalidBack(text.to_string())),
        },
    }
}
