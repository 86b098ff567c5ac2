//! Keyboard input from the terminal
//!
//! Expects the terminal in raw mode so keys arrive as they are pressed.
//! Polling uses a zero timeout and never blocks the tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::Controller;
use crate::sim::PlayerCommand;

/// What a single key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Command(PlayerCommand),
    /// Leave the game (raw mode swallows the Ctrl-C signal, so it arrives as a key)
    Quit,
    Ignore,
}

/// Map a key event to an action. Only presses count; repeats and releases are ignored.
pub fn action_for_key(key: &KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::Quit,
            _ => KeyAction::Ignore,
        };
    }

    let command = match key.code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => PlayerCommand::MoveShipUp,
            's' => PlayerCommand::MoveShipDown,
            'a' => PlayerCommand::MoveShipLeft,
            'd' => PlayerCommand::MoveShipRight,
            ' ' | 'f' => PlayerCommand::LaunchMissile,
            'p' => PlayerCommand::PauseGame,
            'q' => return KeyAction::Quit,
            _ => return KeyAction::Ignore,
        },
        KeyCode::Up => PlayerCommand::MoveShipUp,
        KeyCode::Down => PlayerCommand::MoveShipDown,
        KeyCode::Left => PlayerCommand::MoveShipLeft,
        KeyCode::Right => PlayerCommand::MoveShipRight,
        KeyCode::Esc => return KeyAction::Quit,
        _ => return KeyAction::Ignore,
    };
    KeyAction::Command(command)
}

/// Controller reading key events from the terminal
#[derive(Debug)]
pub struct KeyboardController {
    /// Raised when the player asks to quit
    shutdown: Arc<AtomicBool>,
}

impl KeyboardController {
    pub fn new(shutdown: Arc<AtomicBool>) -> Self {
        Self { shutdown }
    }

    /// Turn one terminal event into a command, raising the shutdown flag on quit keys
    pub fn handle_event(&mut self, event: &Event) -> Option<PlayerCommand> {
        let Event::Key(key) = event else {
            return None;
        };
        match action_for_key(key) {
            KeyAction::Command(command) => Some(command),
            KeyAction::Quit => {
                log::info!("Quit requested from keyboard");
                self.shutdown.store(true, Ordering::Relaxed);
                None
            }
            KeyAction::Ignore => None,
        }
    }
}

impl Controller for KeyboardController {
    /// Drain ready events until one maps to a command
    fn next_player_command(&mut self) -> Option<PlayerCommand> {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(err) => {
                    log::warn!("Keyboard poll failed: {}", err);
                    return None;
                }
            }

            match event::read() {
                Ok(event) => {
                    if let Some(command) = self.handle_event(&event) {
                        return Some(command);
                    }
                }
                Err(err) => {
                    log::warn!("Keyboard read failed: {}", err);
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        let cases = [
            (KeyCode::Char('w'), PlayerCommand::MoveShipUp),
            (KeyCode::Char('S'), PlayerCommand::MoveShipDown),
            (KeyCode::Char('a'), PlayerCommand::MoveShipLeft),
            (KeyCode::Right, PlayerCommand::MoveShipRight),
            (KeyCode::Char(' '), PlayerCommand::LaunchMissile),
            (KeyCode::Char('f'), PlayerCommand::LaunchMissile),
            (KeyCode::Char('p'), PlayerCommand::PauseGame),
        ];
        for (code, command) in cases {
            assert_eq!(action_for_key(&press(code)), KeyAction::Command(command));
        }
        assert_eq!(action_for_key(&press(KeyCode::Char('x'))), KeyAction::Ignore);
    }

    #[test]
    fn test_releases_and_repeats_are_ignored() {
        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            let key = KeyEvent::new_with_kind(KeyCode::Char('w'), KeyModifiers::NONE, kind);
            assert_eq!(action_for_key(&key), KeyAction::Ignore);
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for_key(&press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(action_for_key(&press(KeyCode::Esc)), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(&ctrl_c), KeyAction::Quit);
        let ctrl_w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(&ctrl_w), KeyAction::Ignore);
    }

    #[test]
    fn test_handle_event_raises_shutdown_on_quit() {
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut controller = KeyboardController::new(Arc::clone(&shutdown));

        let fire = controller.handle_event(&Event::Key(press(KeyCode::Char('f'))));
        assert_eq!(fire, Some(PlayerCommand::LaunchMissile));
        assert!(!shutdown.load(Ordering::Relaxed));

        assert_eq!(controller.handle_event(&Event::FocusLost), None);
        assert_eq!(controller.handle_event(&Event::Key(press(KeyCode::Esc))), None);
        assert!(shutdown.load(Ordering::Relaxed));
    }
}
