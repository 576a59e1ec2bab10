//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (import/export failure)    |
//! | 2       | Universal | CLI usage error (bad args, clap)         |
//! | 10-19   | ai        | AI provider configuration codes          |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - import or export failed.
pub const EXIT_ERROR: u8 = 1;

/// AI disabled (provider=none) — not an error, just informational.
pub const EXIT_AI_DISABLED: u8 = 10;

/// AI provider configured but API key missing.
pub const EXIT_AI_MISSING_KEY: u8 = 11;
