#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,            // /help
    Quit,            // /quit or /exit
    Unknown(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    let verb = trimmed.split_whitespace().next().unwrap_or_default();
    match verb {
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Lines that start with `/` are commands; everything else is a tweet.
pub fn is_command(input: &str) -> bool {
    input.trim_start().starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_verbs() {
        assert_eq!(parse_command("/help"), Command::Help);
        assert_eq!(parse_command("  /exit now"), Command::Quit);
        assert_eq!(
            parse_command("/like 3"),
            Command::Unknown("/like 3".to_string())
        );
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert!(!is_command("hello /help"));
        assert!(is_command(" /quit"));
    }
}
