//! Exit code constants for the promptc CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, unwritable output)
//! - 2: Template source not found
//! - 3: Unresolved placeholders under `--strict`

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or I/O failure.
pub const USER_ERROR: i32 = 1;

/// The named template file does not exist.
pub const NOT_FOUND: i32 = 2;

/// The compiled prompt still contains placeholders and `--strict` was given.
pub const UNRESOLVED: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, NOT_FOUND, UNRESOLVED];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_have_expected_values() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(NOT_FOUND, 2);
        assert_eq!(UNRESOLVED, 3);
    }
}
