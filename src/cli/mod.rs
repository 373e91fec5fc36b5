pub mod parser;
pub mod usage;

pub use parser::{parse_args, takes_back_value, Command};
pub use usage::{help_text, version_text};
