//! Slash command parsing

/// Parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Memory(bool),
    Forget,
    Status,
    Write(String),
    Code(String),
    Ctf(String),
    Sign,
    Points,
    Rank(Option<u64>),
    Backfill,
    History(Option<u64>),
    Notice(bool),
    Bot(bool),
    /// Starts with `/` but is not one of ours
    Unknown(String),
}

fn parse_switch(arg: &str) -> Option<bool> {
    match arg.to_ascii_lowercase().as_str() {
        "" | "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

fn parse_limit(arg: &str) -> Option<u64> {
    arg.parse().ok()
}

impl Command {
    /// Parse `text`; None when it is not a slash command
    pub fn parse(text: &str) -> Option<Self> {
        let body = text.trim().strip_prefix('/')?;
        let (name, arg) = match body.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (body, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "help" => Self::Help,
            "memory" => match parse_switch(arg) {
                Some(on) => Self::Memory(on),
                None => Self::Unknown(name.to_string()),
            },
            "forget" => Self::Forget,
            "status" => Self::Status,
            "write" => Self::Write(arg.to_string()),
            "code" => Self::Code(arg.to_string()),
            "ctf" => Self::Ctf(arg.to_string()),
            "sign" => Self::Sign,
            "points" => Self::Points,
            "rank" => Self::Rank(parse_limit(arg)),
            "backfill" => Self::Backfill,
            "history" => Self::History(parse_limit(arg)),
            "notice" => match parse_switch(arg) {
                Some(on) => Self::Notice(on),
                None => Self::Unknown(name.to_string()),
            },
            "bot" => match parse_switch(arg) {
                Some(on) => Self::Bot(on),
                None => Self::Unknown(name.to_string()),
            },
            _ => Self::Unknown(name.to_string()),
        };
        Some(command)
    }

    /// Whether the command reads or writes the group ledger
    pub fn needs_group(&self) -> bool {
        matches!(
            self,
            Self::Sign | Self::Points | Self::Rank(_) | Self::Backfill | Self::History(_)
        )
    }
}

/// Lines of the /help reply
pub fn help_lines(bot_name: &str) -> Vec<String> {
    vec![
        format!("{} commands:", bot_name),
        "1. Just talk to me: private messages, or mention me in a group".to_string(),
        "2. /write <text> - creative writing, reply to a message to continue it".to_string(),
        "3. /code <text> - programming help".to_string(),
        "4. /ctf <text> - CTF challenge analysis".to_string(),
        "5. /memory on|off - multi-turn conversation memory".to_string(),
        "6. /forget - clear the conversation memory".to_string(),
        "7. /status - memory status".to_string(),
        "8. /sign, /points, /rank [n], /backfill, /history [n] - daily sign-in and points".to_string(),
        "9. /notice on|off - startup notices, /bot on|off - points commands".to_string(),
        "10. Filtered words are masked; AI features pause while the model server is down".to_string(),
    ]
}
