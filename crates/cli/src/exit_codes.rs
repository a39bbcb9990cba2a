//! CLI Exit Code Registry
//!
//! This is the single source of truth for all `salesboard` exit codes.
//! Scripts rely on them, so a code never changes meaning once released.
//!
//! | Code | Meaning                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | Success                                                  |
//! | 1    | General error (unspecified)                              |
//! | 2    | Usage error (bad args)                                   |
//! | 3    | Invalid sales data (malformed JSON, out-of-range field)  |
//! | 4    | Invalid config or options                                |
//! | 5    | Referential integrity (unknown seller/product, dup key)  |
//! | 6    | IO error (cannot read input, cannot write output)        |

use salesboard_analytics::SalesError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// clap exits with this code on its own parse failures.
pub const EXIT_USAGE: u8 = 2;

/// Data document failed to parse or failed validation.
pub const EXIT_INVALID_INPUT: u8 = 3;

/// Config file failed to parse, or an option is out of range.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// A record references an unknown seller or product, or a key repeats.
pub const EXIT_INTEGRITY: u8 = 5;

/// Cannot read an input file or write an output file.
pub const EXIT_IO: u8 = 6;

/// Map an engine error to its exit code.
pub fn sales_exit_code(err: &SalesError) -> u8 {
    match err {
        SalesError::InvalidInput(_) | SalesError::DataParse(_) => EXIT_INVALID_INPUT,
        SalesError::InvalidOptions(_) | SalesError::ConfigParse(_) => EXIT_INVALID_CONFIG,
        SalesError::UnknownSeller { .. }
        | SalesError::UnknownProduct { .. }
        | SalesError::DuplicateKey { .. } => EXIT_INTEGRITY,
    }
}
