//! Git invocation: the executor interface and its process-backed implementation.

pub mod executor;
pub mod records;
pub mod system;

pub use executor::GitExecutor;
pub use records::{os_string_from_bytes, parse_path_list, split_nul};
pub use system::{GIT_PROGRAM_ENV_VAR, SystemGit};
