pub mod bootstrap;
pub mod common;
pub mod config;
pub mod operations;
pub mod utils;

pub use common::errors::{ReplaceError, ReplaceResult};
pub use config::{ReplaceStrategy, ReplacerConfig};
pub use operations::replace::{ReplaceOutcome, Replacer};
