mod cli_launcher;
mod log_format;

pub use cli_launcher::*;
pub use log_format::*;
