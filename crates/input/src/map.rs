//! Key mapping from terminal events to game actions.
//!
//! Which keys act depends on the game phase: before the start only start,
//! speed and mute keys do anything; while paused only the pause keys do.

use crate::types::{GameAction, Phase, Speed};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game action for the given phase.
pub fn map_key(key: KeyEvent, phase: Phase) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    if is_pause_key(key.code) {
        return match phase {
            Phase::Running | Phase::Paused => Some(GameAction::TogglePause),
            Phase::NotStarted | Phase::Over => None,
        };
    }

    match phase {
        Phase::Paused => None,
        Phase::NotStarted => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::Start),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::ToggleMute),
            KeyCode::Char(c) => speed_key(c),
            _ => None,
        },
        Phase::Over => match key.code {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::ToggleMute),
            KeyCode::Char(c) => speed_key(c),
            _ => None,
        },
        Phase::Running => match key.code {
            // Movement
            KeyCode::Left => Some(GameAction::MoveLeft),
            KeyCode::Right => Some(GameAction::MoveRight),
            KeyCode::Down => Some(GameAction::MoveDown),

            // Rotation
            KeyCode::Up => Some(GameAction::Rotate),

            // Actions
            KeyCode::Char(' ') => Some(GameAction::HardDrop),
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Hold),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::ToggleMute),

            _ => None,
        },
    }
}

fn is_pause_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc)
}

fn speed_key(c: char) -> Option<GameAction> {
    c.to_digit(10)
        .and_then(|d| Speed::new(d as u8))
        .map(GameAction::SetSpeed)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_movement_keys() {
        let run = Phase::Running;
        assert_eq!(map_key(key(KeyCode::Left), run), Some(GameAction::MoveLeft));
        assert_eq!(map_key(key(KeyCode::Right), run), Some(GameAction::MoveRight));
        assert_eq!(map_key(key(KeyCode::Down), run), Some(GameAction::MoveDown));
        assert_eq!(map_key(key(KeyCode::Up), run), Some(GameAction::Rotate));
    }

    #[test]
    fn test_action_keys() {
        let run = Phase::Running;
        assert_eq!(map_key(key(KeyCode::Char(' ')), run), Some(GameAction::HardDrop));
        assert_eq!(map_key(key(KeyCode::Char('c')), run), Some(GameAction::Hold));
        assert_eq!(map_key(key(KeyCode::Char('m')), run), Some(GameAction::ToggleMute));
        assert_eq!(map_key(key(KeyCode::Char('p')), run), Some(GameAction::TogglePause));
        assert_eq!(map_key(key(KeyCode::Esc), run), Some(GameAction::TogglePause));
    }

    #[test]
    fn test_paused_only_accepts_pause_keys() {
        let paused = Phase::Paused;
        assert_eq!(map_key(key(KeyCode::Char('P')), paused), Some(GameAction::TogglePause));
        assert_eq!(map_key(key(KeyCode::Left), paused), None);
        assert_eq!(map_key(key(KeyCode::Char(' ')), paused), None);
        assert_eq!(map_key(key(KeyCode::Char('m')), paused), None);
    }

    #[test]
    fn test_start_and_speed_before_game() {
        let idle = Phase::NotStarted;
        assert_eq!(map_key(key(KeyCode::Enter), idle), Some(GameAction::Start));
        assert_eq!(map_key(key(KeyCode::Char(' ')), idle), Some(GameAction::Start));
        assert_eq!(
            map_key(key(KeyCode::Char('4')), idle),
            Some(GameAction::SetSpeed(Speed::new(4).unwrap()))
        );
        assert_eq!(map_key(key(KeyCode::Char('9')), idle), None);
        assert_eq!(map_key(key(KeyCode::Left), idle), None);
        assert_eq!(map_key(key(KeyCode::Char('p')), idle), None);
    }

    #[test]
    fn test_restart_after_game_over() {
        let over = Phase::Over;
        assert_eq!(map_key(key(KeyCode::Enter), over), Some(GameAction::Restart));
        assert_eq!(map_key(key(KeyCode::Char('r')), over), Some(GameAction::Restart));
        assert_eq!(map_key(key(KeyCode::Char('r')), Phase::Running), None);
        assert_eq!(map_key(key(KeyCode::Char(' ')), over), None);
    }

    #[test]
    fn test_ctrl_c_is_not_hold() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, Phase::Running), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
