//! Keyboard mapping
//!
//! Browser `KeyboardEvent.key` names map to game commands. Arrow keys and
//! WASD both work; letter keys are case-insensitive.

use crate::sim::Command;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    /// Toggle the autoplay bot
    ToggleAutoplay,
}

pub fn map_key(key: &str) -> Option<KeyAction> {
    let action = match key {
        "ArrowLeft" => KeyAction::Game(Command::Left),
        "ArrowRight" => KeyAction::Game(Command::Right),
        "ArrowDown" => KeyAction::Game(Command::SoftDrop),
        "ArrowUp" => KeyAction::Game(Command::Rotate),
        " " | "Spacebar" => KeyAction::Game(Command::HardDrop),
        "Escape" => KeyAction::Game(Command::Pause),
        _ => match key.to_ascii_lowercase().as_str() {
            "a" => KeyAction::Game(Command::Left),
            "d" => KeyAction::Game(Command::Right),
            "s" => KeyAction::Game(Command::SoftDrop),
            "w" | "x" => KeyAction::Game(Command::Rotate),
            "p" => KeyAction::Game(Command::Pause),
            "i" => KeyAction::ToggleAutoplay,
            _ => return None,
        },
    };
    Some(action)
}
