//! Shared helpers for commands and the binary

pub mod env;
pub mod logging;

pub use env::load_dotenv;
pub use logging::{execute_logged, log_command_execution, run_logged};
