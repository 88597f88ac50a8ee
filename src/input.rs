//! Key to command mapping
//!
//! Recognized keys become a `KeyAction`; anything else maps to `None` and is
//! left for the host to ignore.

use crate::game::Command;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    Restart,
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub restart: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        tracing::warn!(key = s, "unknown key name in bindings, ignored");
                        return None;
                    }
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().filter_map(|s| Self::parse_key(s)).collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            rotate: Self::parse_keys(&settings.keys.rotate),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            restart: Self::parse_keys(&settings.keys.restart),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }

    /// Map a key event, `None` if the key is not bound or is not a press
    pub fn map(&self, key: KeyEvent) -> Option<KeyAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(KeyAction::Quit);
        }

        let code = normalize_key(key.code);
        if self.move_left.contains(&code) {
            Some(KeyAction::Game(Command::MoveLeft))
        } else if self.move_right.contains(&code) {
            Some(KeyAction::Game(Command::MoveRight))
        } else if self.rotate.contains(&code) {
            Some(KeyAction::Game(Command::Rotate))
        } else if self.hard_drop.contains(&code) {
            Some(KeyAction::Game(Command::HardDrop))
        } else if self.restart.contains(&code) {
            Some(KeyAction::Restart)
        } else if self.quit.contains(&code) {
            Some(KeyAction::Quit)
        } else {
            None
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec![KeyCode::Left],
            move_right: vec![KeyCode::Right],
            rotate: vec![KeyCode::Up],
            hard_drop: vec![KeyCode::Char(' ')],
            restart: vec![KeyCode::Enter],
            quit: vec![KeyCode::Char('q')],
        }
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.map(press(KeyCode::Left)), Some(KeyAction::Game(Command::MoveLeft)));
        assert_eq!(bindings.map(press(KeyCode::Right)), Some(KeyAction::Game(Command::MoveRight)));
        assert_eq!(bindings.map(press(KeyCode::Up)), Some(KeyAction::Game(Command::Rotate)));
        assert_eq!(
            bindings.map(press(KeyCode::Char(' '))),
            Some(KeyAction::Game(Command::HardDrop))
        );
    }

    #[test]
    fn test_unbound_keys_pass_through() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.map(press(KeyCode::Down)), None);
        assert_eq!(bindings.map(press(KeyCode::Char('x'))), None);
        assert_eq!(bindings.map(press(KeyCode::F(5))), None);
    }

    #[test]
    fn test_release_ignored() {
        let bindings = KeyBindings::default();
        let mut release = press(KeyCode::Left);
        release.kind = KeyEventKind::Release;
        assert_eq!(bindings.map(release), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let bindings = KeyBindings::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(bindings.map(key), Some(KeyAction::Quit));
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.keys.rotate = vec!["X".to_string(), "up".to_string()];
        settings.keys.hard_drop = vec!["bogus".to_string()];
        let bindings = KeyBindings::from_settings(&settings);
        assert_eq!(bindings.rotate, vec![KeyCode::Char('x'), KeyCode::Up]);
        assert!(bindings.hard_drop.is_empty());
        // uppercase input still matches
        assert_eq!(
            bindings.map(press(KeyCode::Char('X'))),
            Some(KeyAction::Game(Command::Rotate))
        );
    }
}
