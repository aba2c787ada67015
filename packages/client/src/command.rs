//! Input line parsing for client-side operations.
//!
//! This module contains pure functions that map terminal input to protocol
//! commands without side effects, making them easy to test.

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a chat message to the joined room
    Chat(String),
    /// Share a pomodoro timer status ("focusing" or anything else for idle)
    Status(String),
    /// Leave the room but keep the connection open
    Leave,
    /// End the client session
    Quit,
}

/// Parse one line of terminal input.
///
/// Empty lines parse to `None`. Lines starting with a known slash command
/// map to the corresponding protocol operation; everything else is chat.
pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(rest) = line.strip_prefix("/status") {
        return Some(Command::Status(rest.trim().to_string()));
    }

    match line {
        "/leave" => Some(Command::Leave),
        "/quit" | "/exit" => Some(Command::Quit),
        _ => Some(Command::Chat(line.to_string())),
    }
}
