//! exit codes for bdisp commands
//!
//! these follow Unix conventions where 0 = success and non-zero = error
//! specific codes help scripts distinguish between failure types

/// command completed successfully
pub const SUCCESS: i32 = 0;

/// general or unknown error
pub const ERROR: i32 = 1;

/// no rule matched the URL (`test`)
pub const NO_MATCH: i32 = 2;

/// invalid command-line arguments
pub const INVALID_ARGS: i32 = 4;

/// configuration file error, including rules that fail to evaluate
pub const CONFIG_ERROR: i32 = 5;

/// named rule doesn't exist
pub const RULE_NOT_FOUND: i32 = 6;

/// named application doesn't exist
pub const APP_NOT_FOUND: i32 = 7;

/// rule rejected by the store
pub const INVALID_RULE: i32 = 8;
