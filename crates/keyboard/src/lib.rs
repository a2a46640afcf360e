//! Key binding parsing.
//!
//! Bindings are configured as strings such as `ctrl+c`, `down` or `q`:
//! zero or more modifiers followed by a key name, joined with `+`.

use crossterm::event::{KeyCode, KeyModifiers};
use thiserror::Error;

use bufnav_core::KeyBinding;

/// Errors produced while parsing a key binding string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key binding")]
    Empty,

    #[error("unknown modifier '{modifier}' in '{input}'")]
    UnknownModifier { modifier: String, input: String },

    #[error("unknown key '{key}' in '{input}'")]
    UnknownKey { key: String, input: String },
}

/// Parse a binding string like `ctrl+c` into a `KeyBinding`.
///
/// Names are case-insensitive except for single characters, so `shift+a`
/// and `A` are different bindings.
pub fn parse_binding(input: &str) -> Result<KeyBinding, KeyParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(KeyParseError::Empty);
    }

    // A lone "+" is the plus key, not a separator.
    let (modifier_part, key_part) = match trimmed.rsplit_once('+') {
        Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(mods), "+"),
        Some((mods, key)) => (mods, key),
        None => ("", trimmed),
    };

    let mut modifiers = KeyModifiers::NONE;
    for name in modifier_part.split('+').filter(|m| !m.is_empty()) {
        modifiers |= parse_modifier(name).ok_or_else(|| KeyParseError::UnknownModifier {
            modifier: name.to_string(),
            input: input.to_string(),
        })?;
    }

    let code = parse_key_code(key_part).ok_or_else(|| KeyParseError::UnknownKey {
        key: key_part.to_string(),
        input: input.to_string(),
    })?;

    Ok(KeyBinding::new(code, modifiers))
}

fn parse_modifier(name: &str) -> Option<KeyModifiers> {
    match name.to_lowercase().as_str() {
        "ctrl" | "control" => Some(KeyModifiers::CONTROL),
        "alt" | "meta" => Some(KeyModifiers::ALT),
        "shift" => Some(KeyModifiers::SHIFT),
        _ => None,
    }
}

fn parse_key_code(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(ch));
    }

    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        _ => {
            let number = lower.strip_prefix('f')?.parse::<u8>().ok()?;
            if (1..=12).contains(&number) {
                KeyCode::F(number)
            } else {
                return None;
            }
        }
    };
    Some(code)
}
