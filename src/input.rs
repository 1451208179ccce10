//! Key mapping from typed characters to commands

use crate::types::Command;

/// Map a key to a command
pub fn command_for_key(key: char) -> Option<Command> {
    match key {
        ' ' => Some(Command::HardDrop),
        'a' | 'A' => Some(Command::MoveLeft),
        's' | 'S' => Some(Command::MoveRight),
        'k' | 'K' => Some(Command::RotateLeft),
        'l' | 'L' => Some(Command::RotateRight),
        'y' | 'Y' => Some(Command::ToggleAutoplay),
        'r' | 'R' => Some(Command::Restart),
        _ => None,
    }
}

/// Check if key should quit the runner.
pub fn should_quit(key: char) -> bool {
    matches!(key, 'q' | 'Q')
}
