/// Editing modes of the portal, after vim: normal for navigation, insert for
/// text fields, command for the `:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VimMode {
    #[default]
    Normal,
    Insert,
    Command,
}

impl VimMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            VimMode::Normal => "NORMAL",
            VimMode::Insert => "INSERT",
            VimMode::Command => "COMMAND",
        }
    }

    /// `i`/`a` on an editable field. Only normal mode can enter insert.
    pub fn enter_insert(self) -> VimMode {
        match self {
            VimMode::Normal => VimMode::Insert,
            other => other,
        }
    }

    /// `:` opens the command line. Only normal mode can enter command.
    pub fn enter_command(self) -> VimMode {
        match self {
            VimMode::Normal => VimMode::Command,
            other => other,
        }
    }

    /// Esc (or a finished `:` command) falls back to normal mode.
    pub fn escape(self) -> VimMode {
        VimMode::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_normal_mode_switches() {
        assert_eq!(VimMode::Insert.enter_command(), VimMode::Insert);
        assert_eq!(VimMode::Command.enter_insert(), VimMode::Command);
        assert_eq!(VimMode::Normal.enter_insert(), VimMode::Insert);
    }

    #[test]
    fn escape_always_returns_to_normal() {
        assert_eq!(VimMode::Insert.escape(), VimMode::Normal);
        assert_eq!(VimMode::Command.escape(), VimMode::Normal);
        assert_eq!(VimMode::Normal.escape(), VimMode::Normal);
    }
}
