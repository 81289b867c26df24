use thiserror::Error;

/// Ex-style commands accepted on the `:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Dashboard,
    Training,
    Courses,
    Assessment,
    Profile,
    /// Advance the registration wizard
    Next,
    /// Return to the wizard's selection screen
    Back,
    Submit,
    Restart,
    Help,
    Quit,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
}

pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    match input.trim().to_lowercase().as_str() {
        "dashboard" | "dash" | "d" => Ok(Command::Dashboard),
        "training" | "register" | "t" => Ok(Command::Training),
        "courses" | "c" => Ok(Command::Courses),
        "assessment" | "a" => Ok(Command::Assessment),
        "profile" | "p" => Ok(Command::Profile),
        "next" | "n" => Ok(Command::Next),
        "back" | "b" => Ok(Command::Back),
        "submit" | "s" => Ok(Command::Submit),
        "restart" | "again" => Ok(Command::Restart),
        "help" | "h" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "" => Err(CommandError::Unknown("empty command".to_string())),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_commands() {
        assert_eq!(parse_command("dashboard").unwrap(), Command::Dashboard);
        assert_eq!(parse_command(" courses ").unwrap(), Command::Courses);
        assert_eq!(parse_command("P").unwrap(), Command::Profile);
    }

    #[test]
    fn parses_wizard_commands() {
        assert_eq!(parse_command("next").unwrap(), Command::Next);
        assert_eq!(parse_command("b").unwrap(), Command::Back);
        assert_eq!(parse_command("submit").unwrap(), Command::Submit);
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(parse_command("frobnicate").is_err());
        assert!(parse_command("").is_err());
    }
}
