pub mod errors;

pub const DEFAULT_PATTERN: &str = "command-hub-2026*.db";

pub const DEFAULT_TARGET: &str = "def.db";

pub const ENV_PREFIX: &str = "REPLACER_";

/// Number of mutating steps reported on the console (`[1/2]`, `[2/2]`).
pub const TOTAL_STEPS: usize = 2;
