//! Logical keypad commands and the key map that produces them.
//!
//! Front-ends translate whatever input they receive (button labels,
//! key names, typed text) into [`Command`]s and hand them to the engine.

use crate::calculator::{ExpressionEngine, is_allowed_char};

/// One user action on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Reset the expression and the result.
    Clear,
    /// Delete the last character.
    Backspace,
    /// Evaluate the expression.
    Evaluate,
    /// Type a character.
    Character(char),
}

impl Command {
    /// Map a key name to a command.
    ///
    /// Accepts single characters as well as the names of the special keys
    /// (`Enter`, `Backspace`, `Escape`). Unknown keys map to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Evaluate),
            "Backspace" | "←" => Some(Self::Backspace),
            "Escape" | "c" | "C" => Some(Self::Clear),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if is_allowed_char(c) => Some(Self::Character(c)),
                    _ => None,
                }
            }
        }
    }

    /// Map a single typed character to a command.
    pub fn from_char(c: char) -> Option<Self> {
        let mut buf = [0u8; 4];
        Self::from_key(c.encode_utf8(&mut buf))
    }

    /// Run this command against the engine.
    pub fn apply(self, engine: &mut ExpressionEngine) {
        match self {
            Self::Clear => engine.clear(),
            Self::Backspace => engine.backspace(),
            Self::Evaluate => engine.evaluate(),
            Self::Character(c) => engine.append_char(c),
        }
    }
}

/// Parse one line of typed input into commands.
///
/// A line consisting of a single word naming a special key
/// (`enter`, `backspace`, `escape`, `clear`, case-insensitive) yields that
/// key; anything else is read character by character through the key map.
/// Whitespace and unknown characters are skipped.
pub fn parse_line(line: &str) -> Vec<Command> {
    let word = line.trim();
    match word.to_ascii_lowercase().as_str() {
        "enter" => return vec![Command::Evaluate],
        "backspace" => return vec![Command::Backspace],
        "escape" | "clear" => return vec![Command::Clear],
        _ => {}
    }

    word.chars().filter_map(Command::from_char).collect()
}

/// Replay a key sequence against the engine.
pub fn replay(keys: &str, engine: &mut ExpressionEngine) {
    for command in parse_line(keys) {
        command.apply(engine);
    }
}
