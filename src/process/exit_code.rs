//! Shell exit code conventions.

use std::borrow::Cow;

pub const SUCCESS: i32 = 0;
pub const GENERAL_ERROR: i32 = 1;
pub const BUILTIN_MISUSE: i32 = 2;
pub const CANNOT_EXECUTE: i32 = 126;
pub const COMMAND_NOT_FOUND: i32 = 127;
pub const INVALID_EXIT_ARGUMENT: i32 = 128;
pub const CTRL_C: i32 = 130;
pub const OUT_OF_RANGE: i32 = 255;

/// Highest signal number reported as `128 + n`.
const MAX_SIGNAL: i32 = 64;

/// Human-readable description of an exit code.
pub fn describe(code: i32) -> Cow<'static, str> {
    match code {
        SUCCESS => Cow::Borrowed("Success"),
        GENERAL_ERROR => Cow::Borrowed("General error"),
        BUILTIN_MISUSE => Cow::Borrowed("Misuse of shell builtins"),
        CANNOT_EXECUTE => Cow::Borrowed("Command invoked cannot execute"),
        COMMAND_NOT_FOUND => Cow::Borrowed("Command not found"),
        INVALID_EXIT_ARGUMENT => Cow::Borrowed("Invalid argument to exit"),
        CTRL_C => Cow::Borrowed("Script terminated by Control-C"),
        OUT_OF_RANGE => Cow::Borrowed("Exit status out of range"),
        c if c > INVALID_EXIT_ARGUMENT && c <= INVALID_EXIT_ARGUMENT + MAX_SIGNAL => {
            Cow::Owned(format!("Fatal error signal {}", c - INVALID_EXIT_ARGUMENT))
        }
        _ => Cow::Borrowed("Unknown error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(describe(SUCCESS), "Success");
        assert_eq!(describe(GENERAL_ERROR), "General error");
        assert_eq!(describe(COMMAND_NOT_FOUND), "Command not found");
        assert_eq!(describe(CANNOT_EXECUTE), "Command invoked cannot execute");
        assert_eq!(describe(CTRL_C), "Script terminated by Control-C");
    }

    #[test]
    fn test_signal_codes() {
        assert_eq!(describe(128 + 9), "Fatal error signal 9");
        assert_eq!(describe(128 + 15), "Fatal error signal 15");
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(describe(3), "Unknown error");
        assert_eq!(describe(-1), "Unknown error");
    }
}
