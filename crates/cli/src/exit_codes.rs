//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                      |
//! |------|----------------------------------------------|
//! | 0    | Success                                      |
//! | 1    | General error (unspecified)                  |
//! | 2    | CLI usage error (bad args, unreadable job)   |
//! | 3    | Job file invalid (parse or validation)       |
//! | 4    | Document I/O error (import/export)           |
//! | 5    | Row window outside the document              |
//! | 6    | Price decreases found (--fail-on-decrease)   |
//!
//! New codes get the next free number, a constant here, and a row in the
//! table above.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable job file.
pub const EXIT_USAGE: u8 = 2;

/// Job file failed to parse or validate.
pub const EXIT_CONFIG: u8 = 3;

/// A document could not be imported or exported.
pub const EXIT_IO: u8 = 4;

/// A configured row window falls outside the document.
pub const EXIT_WINDOW: u8 = 5;

/// Compare found price decreases and --fail-on-decrease is set.
pub const EXIT_DECREASES: u8 = 6;
