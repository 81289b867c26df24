mod command;
mod input;
mod mode;

pub use command::{parse_command, Command, CommandError};
pub use input::InputBuffer;
pub use mode::VimMode;
