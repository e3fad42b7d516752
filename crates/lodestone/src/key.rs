//! The layout-invariant key enumeration.
//!
//! A [`Key`] names a physical key by its position on the ANSI QWERTY
//! reference layout, independent of the keyboard layout the user currently
//! types with. Each key carries a fixed reference code
//! ([`qwerty_key_code`](Key::qwerty_key_code)); translating a `Key` to the
//! live layout's key code or printable character is the job of a
//! [`LayoutEngine`](crate::LayoutEngine).

use std::fmt;
use std::str::FromStr;

/// A layout-invariant identifier for a physical key.
///
/// Keys are looked up, never created: [`Key::from_qwerty_key_code`] is total
/// over the valid reference-code space and fails for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digit row
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Punctuation
    Minus, Equal, BracketLeft, BracketRight, Backslash,
    Semicolon, Quote, Comma, Period, Slash, Grave,

    // Editing
    Return, Tab, Space, Delete, ForwardDelete, Escape,

    // Navigation
    Home, End, PageUp, PageDown, Help,
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10,
    F11, F12, F13, F14, F15, F16, F17, F18, F19, F20,

    // Keypad
    Keypad0, Keypad1, Keypad2, Keypad3, Keypad4,
    Keypad5, Keypad6, Keypad7, Keypad8, Keypad9,
    KeypadClear, KeypadDecimal, KeypadDivide, KeypadEnter,
    KeypadEquals, KeypadMinus, KeypadMultiply, KeypadPlus,
}

impl Key {
    /// Look up the key with the given ANSI QWERTY reference code.
    ///
    /// Returns `None` when the code does not name any representable key.
    pub fn from_qwerty_key_code(code: u16) -> Option<Key> {
        let key = match code {
            0x00 => Key::A,
            0x01 => Key::S,
            0x02 => Key::D,
            0x03 => Key::F,
            0x04 => Key::H,
            0x05 => Key::G,
            0x06 => Key::Z,
            0x07 => Key::X,
            0x08 => Key::C,
            0x09 => Key::V,
            0x0B => Key::B,
            0x0C => Key::Q,
            0x0D => Key::W,
            0x0E => Key::E,
            0x0F => Key::R,
            0x10 => Key::Y,
            0x11 => Key::T,
            0x12 => Key::Digit1,
            0x13 => Key::Digit2,
            0x14 => Key::Digit3,
            0x15 => Key::Digit4,
            0x16 => Key::Digit6,
            0x17 => Key::Digit5,
            0x18 => Key::Equal,
            0x19 => Key::Digit9,
            0x1A => Key::Digit7,
            0x1B => Key::Minus,
            0x1C => Key::Digit8,
            0x1D => Key::Digit0,
            0x1E => Key::BracketRight,
            0x1F => Key::O,
            0x20 => Key::U,
            0x21 => Key::BracketLeft,
            0x22 => Key::I,
            0x23 => Key::P,
            0x24 => Key::Return,
            0x25 => Key::L,
            0x26 => Key::J,
            0x27 => Key::Quote,
            0x28 => Key::K,
            0x29 => Key::Semicolon,
            0x2A => Key::Backslash,
            0x2B => Key::Comma,
            0x2C => Key::Slash,
            0x2D => Key::N,
            0x2E => Key::M,
            0x2F => Key::Period,
            0x30 => Key::Tab,
            0x31 => Key::Space,
            0x32 => Key::Grave,
            0x33 => Key::Delete,
            0x35 => Key::Escape,
            0x40 => Key::F17,
            0x41 => Key::KeypadDecimal,
            0x43 => Key::KeypadMultiply,
            0x45 => Key::KeypadPlus,
            0x47 => Key::KeypadClear,
            0x4B => Key::KeypadDivide,
            0x4C => Key::KeypadEnter,
            0x4E => Key::KeypadMinus,
            0x4F => Key::F18,
            0x50 => Key::F19,
            0x51 => Key::KeypadEquals,
            0x52 => Key::Keypad0,
            0x53 => Key::Keypad1,
            0x54 => Key::Keypad2,
            0x55 => Key::Keypad3,
            0x56 => Key::Keypad4,
            0x57 => Key::Keypad5,
            0x58 => Key::Keypad6,
            0x59 => Key::Keypad7,
            0x5A => Key::F20,
            0x5B => Key::Keypad8,
            0x5C => Key::Keypad9,
            0x60 => Key::F5,
            0x61 => Key::F6,
            0x62 => Key::F7,
            0x63 => Key::F3,
            0x64 => Key::F8,
            0x65 => Key::F9,
            0x67 => Key::F11,
            0x69 => Key::F13,
            0x6A => Key::F16,
            0x6B => Key::F14,
            0x6D => Key::F10,
            0x6F => Key::F12,
            0x71 => Key::F15,
            0x72 => Key::Help,
            0x73 => Key::Home,
            0x74 => Key::PageUp,
            0x75 => Key::ForwardDelete,
            0x76 => Key::F4,
            0x77 => Key::End,
            0x78 => Key::F2,
            0x79 => Key::PageDown,
            0x7A => Key::F1,
            0x7B => Key::ArrowLeft,
            0x7C => Key::ArrowRight,
            0x7D => Key::ArrowDown,
            0x7E => Key::ArrowUp,
            _ => return None,
        };
        Some(key)
    }

    /// The fixed ANSI QWERTY reference code for this key.
    pub fn qwerty_key_code(self) -> u16 {
        match self {
            Key::A => 0x00,
            Key::S => 0x01,
            Key::D => 0x02,
            Key::F => 0x03,
            Key::H => 0x04,
            Key::G => 0x05,
            Key::Z => 0x06,
            Key::X => 0x07,
            Key::C => 0x08,
            Key::V => 0x09,
            Key::B => 0x0B,
            Key::Q => 0x0C,
            Key::W => 0x0D,
            Key::E => 0x0E,
            Key::R => 0x0F,
            Key::Y => 0x10,
            Key::T => 0x11,
            Key::Digit1 => 0x12,
            Key::Digit2 => 0x13,
            Key::Digit3 => 0x14,
            Key::Digit4 => 0x15,
            Key::Digit6 => 0x16,
            Key::Digit5 => 0x17,
            Key::Equal => 0x18,
            Key::Digit9 => 0x19,
            Key::Digit7 => 0x1A,
            Key::Minus => 0x1B,
            Key::Digit8 => 0x1C,
            Key::Digit0 => 0x1D,
            Key::BracketRight => 0x1E,
            Key::O => 0x1F,
            Key::U => 0x20,
            Key::BracketLeft => 0x21,
            Key::I => 0x22,
            Key::P => 0x23,
            Key::Return => 0x24,
            Key::L => 0x25,
            Key::J => 0x26,
            Key::Quote => 0x27,
            Key::K => 0x28,
            Key::Semicolon => 0x29,
            Key::Backslash => 0x2A,
            Key::Comma => 0x2B,
            Key::Slash => 0x2C,
            Key::N => 0x2D,
            Key::M => 0x2E,
            Key::Period => 0x2F,
            Key::Tab => 0x30,
            Key::Space => 0x31,
            Key::Grave => 0x32,
            Key::Delete => 0x33,
            Key::Escape => 0x35,
            Key::F17 => 0x40,
            Key::KeypadDecimal => 0x41,
            Key::KeypadMultiply => 0x43,
            Key::KeypadPlus => 0x45,
            Key::KeypadClear => 0x47,
            Key::KeypadDivide => 0x4B,
            Key::KeypadEnter => 0x4C,
            Key::KeypadMinus => 0x4E,
            Key::F18 => 0x4F,
            Key::F19 => 0x50,
            Key::KeypadEquals => 0x51,
            Key::Keypad0 => 0x52,
            Key::Keypad1 => 0x53,
            Key::Keypad2 => 0x54,
            Key::Keypad3 => 0x55,
            Key::Keypad4 => 0x56,
            Key::Keypad5 => 0x57,
            Key::Keypad6 => 0x58,
            Key::Keypad7 => 0x59,
            Key::F20 => 0x5A,
            Key::Keypad8 => 0x5B,
            Key::Keypad9 => 0x5C,
            Key::F5 => 0x60,
            Key::F6 => 0x61,
            Key::F7 => 0x62,
            Key::F3 => 0x63,
            Key::F8 => 0x64,
            Key::F9 => 0x65,
            Key::F11 => 0x67,
            Key::F13 => 0x69,
            Key::F16 => 0x6A,
            Key::F14 => 0x6B,
            Key::F10 => 0x6D,
            Key::F12 => 0x6F,
            Key::F15 => 0x71,
            Key::Help => 0x72,
            Key::Home => 0x73,
            Key::PageUp => 0x74,
            Key::ForwardDelete => 0x75,
            Key::F4 => 0x76,
            Key::End => 0x77,
            Key::F2 => 0x78,
            Key::PageDown => 0x79,
            Key::F1 => 0x7A,
            Key::ArrowLeft => 0x7B,
            Key::ArrowRight => 0x7C,
            Key::ArrowDown => 0x7D,
            Key::ArrowUp => 0x7E,
        }
    }

    /// Check if this is one of the function keys F1–F20.
    ///
    /// Function keys are conventionally only deliverable with the Function
    /// flag set, so shortcut construction inserts it for them automatically.
    pub fn is_function_key(self) -> bool {
        matches!(
            self,
            Key::F1
                | Key::F2
                | Key::F3
                | Key::F4
                | Key::F5
                | Key::F6
                | Key::F7
                | Key::F8
                | Key::F9
                | Key::F10
                | Key::F11
                | Key::F12
                | Key::F13
                | Key::F14
                | Key::F15
                | Key::F16
                | Key::F17
                | Key::F18
                | Key::F19
                | Key::F20
        )
    }

    /// Look up a key by its stable name, case-insensitively.
    ///
    /// Accepts the names produced by `Display` plus a few common aliases
    /// ("enter", "backspace", "esc", "pgup", ...).
    pub fn from_name(name: &str) -> Option<Key> {
        let name = name.trim();

        if name.chars().count() == 1 {
            let ch = name.chars().next()?;
            return match ch.to_ascii_lowercase() {
                'a' => Some(Key::A),
                'b' => Some(Key::B),
                'c' => Some(Key::C),
                'd' => Some(Key::D),
                'e' => Some(Key::E),
                'f' => Some(Key::F),
                'g' => Some(Key::G),
                'h' => Some(Key::H),
                'i' => Some(Key::I),
                'j' => Some(Key::J),
                'k' => Some(Key::K),
                'l' => Some(Key::L),
                'm' => Some(Key::M),
                'n' => Some(Key::N),
                'o' => Some(Key::O),
                'p' => Some(Key::P),
                'q' => Some(Key::Q),
                'r' => Some(Key::R),
                's' => Some(Key::S),
                't' => Some(Key::T),
                'u' => Some(Key::U),
                'v' => Some(Key::V),
                'w' => Some(Key::W),
                'x' => Some(Key::X),
                'y' => Some(Key::Y),
                'z' => Some(Key::Z),
                '0' => Some(Key::Digit0),
                '1' => Some(Key::Digit1),
                '2' => Some(Key::Digit2),
                '3' => Some(Key::Digit3),
                '4' => Some(Key::Digit4),
                '5' => Some(Key::Digit5),
                '6' => Some(Key::Digit6),
                '7' => Some(Key::Digit7),
                '8' => Some(Key::Digit8),
                '9' => Some(Key::Digit9),
                '-' => Some(Key::Minus),
                '=' => Some(Key::Equal),
                '[' => Some(Key::BracketLeft),
                ']' => Some(Key::BracketRight),
                '\\' => Some(Key::Backslash),
                ';' => Some(Key::Semicolon),
                '\'' => Some(Key::Quote),
                ',' => Some(Key::Comma),
                '.' => Some(Key::Period),
                '/' => Some(Key::Slash),
                '`' => Some(Key::Grave),
                _ => None,
            };
        }

        match name.to_lowercase().as_str() {
            "return" | "enter" => Some(Key::Return),
            "tab" => Some(Key::Tab),
            "space" | "spacebar" => Some(Key::Space),
            "delete" | "backspace" => Some(Key::Delete),
            "forwarddelete" | "del" => Some(Key::ForwardDelete),
            "escape" | "esc" => Some(Key::Escape),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "pageup" | "pgup" => Some(Key::PageUp),
            "pagedown" | "pgdn" => Some(Key::PageDown),
            "help" => Some(Key::Help),
            "up" | "arrowup" => Some(Key::ArrowUp),
            "down" | "arrowdown" => Some(Key::ArrowDown),
            "left" | "arrowleft" => Some(Key::ArrowLeft),
            "right" | "arrowright" => Some(Key::ArrowRight),
            "f1" => Some(Key::F1),
            "f2" => Some(Key::F2),
            "f3" => Some(Key::F3),
            "f4" => Some(Key::F4),
            "f5" => Some(Key::F5),
            "f6" => Some(Key::F6),
            "f7" => Some(Key::F7),
            "f8" => Some(Key::F8),
            "f9" => Some(Key::F9),
            "f10" => Some(Key::F10),
            "f11" => Some(Key::F11),
            "f12" => Some(Key::F12),
            "f13" => Some(Key::F13),
            "f14" => Some(Key::F14),
            "f15" => Some(Key::F15),
            "f16" => Some(Key::F16),
            "f17" => Some(Key::F17),
            "f18" => Some(Key::F18),
            "f19" => Some(Key::F19),
            "f20" => Some(Key::F20),
            "keypad0" => Some(Key::Keypad0),
            "keypad1" => Some(Key::Keypad1),
            "keypad2" => Some(Key::Keypad2),
            "keypad3" => Some(Key::Keypad3),
            "keypad4" => Some(Key::Keypad4),
            "keypad5" => Some(Key::Keypad5),
            "keypad6" => Some(Key::Keypad6),
            "keypad7" => Some(Key::Keypad7),
            "keypad8" => Some(Key::Keypad8),
            "keypad9" => Some(Key::Keypad9),
            "keypadclear" => Some(Key::KeypadClear),
            "keypaddecimal" => Some(Key::KeypadDecimal),
            "keypaddivide" => Some(Key::KeypadDivide),
            "keypadenter" => Some(Key::KeypadEnter),
            "keypadequals" => Some(Key::KeypadEquals),
            "keypadminus" => Some(Key::KeypadMinus),
            "keypadmultiply" => Some(Key::KeypadMultiply),
            "keypadplus" => Some(Key::KeypadPlus),
            _ => None,
        }
    }

    /// The stable name of this key, as accepted by [`Key::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Key::A => "A",
            Key::B => "B",
            Key::C => "C",
            Key::D => "D",
            Key::E => "E",
            Key::F => "F",
            Key::G => "G",
            Key::H => "H",
            Key::I => "I",
            Key::J => "J",
            Key::K => "K",
            Key::L => "L",
            Key::M => "M",
            Key::N => "N",
            Key::O => "O",
            Key::P => "P",
            Key::Q => "Q",
            Key::R => "R",
            Key::S => "S",
            Key::T => "T",
            Key::U => "U",
            Key::V => "V",
            Key::W => "W",
            Key::X => "X",
            Key::Y => "Y",
            Key::Z => "Z",
            Key::Digit0 => "0",
            Key::Digit1 => "1",
            Key::Digit2 => "2",
            Key::Digit3 => "3",
            Key::Digit4 => "4",
            Key::Digit5 => "5",
            Key::Digit6 => "6",
            Key::Digit7 => "7",
            Key::Digit8 => "8",
            Key::Digit9 => "9",
            Key::Minus => "-",
            Key::Equal => "=",
            Key::BracketLeft => "[",
            Key::BracketRight => "]",
            Key::Backslash => "\\",
            Key::Semicolon => ";",
            Key::Quote => "'",
            Key::Comma => ",",
            Key::Period => ".",
            Key::Slash => "/",
            Key::Grave => "`",
            Key::Return => "Return",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Delete => "Delete",
            Key::ForwardDelete => "ForwardDelete",
            Key::Escape => "Escape",
            Key::Home => "Home",
            Key::End => "End",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::Help => "Help",
            Key::ArrowUp => "Up",
            Key::ArrowDown => "Down",
            Key::ArrowLeft => "Left",
            Key::ArrowRight => "Right",
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::F10 => "F10",
            Key::F11 => "F11",
            Key::F12 => "F12",
            Key::F13 => "F13",
            Key::F14 => "F14",
            Key::F15 => "F15",
            Key::F16 => "F16",
            Key::F17 => "F17",
            Key::F18 => "F18",
            Key::F19 => "F19",
            Key::F20 => "F20",
            Key::Keypad0 => "Keypad0",
            Key::Keypad1 => "Keypad1",
            Key::Keypad2 => "Keypad2",
            Key::Keypad3 => "Keypad3",
            Key::Keypad4 => "Keypad4",
            Key::Keypad5 => "Keypad5",
            Key::Keypad6 => "Keypad6",
            Key::Keypad7 => "Keypad7",
            Key::Keypad8 => "Keypad8",
            Key::Keypad9 => "Keypad9",
            Key::KeypadClear => "KeypadClear",
            Key::KeypadDecimal => "KeypadDecimal",
            Key::KeypadDivide => "KeypadDivide",
            Key::KeypadEnter => "KeypadEnter",
            Key::KeypadEquals => "KeypadEquals",
            Key::KeypadMinus => "KeypadMinus",
            Key::KeypadMultiply => "KeypadMultiply",
            Key::KeypadPlus => "KeypadPlus",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for parsing a key name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name: {0}")]
pub struct UnknownKeyName(pub String);

impl FromStr for Key {
    type Err = UnknownKeyName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::from_name(s).ok_or_else(|| UnknownKeyName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_code_round_trip() {
        // Exhaustive over the full reference-code space: every resolvable
        // code maps back to itself.
        let mut resolved = 0;
        for code in 0u16..=0x7E {
            if let Some(key) = Key::from_qwerty_key_code(code) {
                assert_eq!(key.qwerty_key_code(), code);
                resolved += 1;
            }
        }
        assert_eq!(resolved, 100);
    }

    #[test]
    fn test_unknown_reference_code() {
        assert_eq!(Key::from_qwerty_key_code(0x0A), None); // ISO section key
        assert_eq!(Key::from_qwerty_key_code(0x7F), None);
        assert_eq!(Key::from_qwerty_key_code(0xFFFF), None);
    }

    #[test]
    fn test_well_known_codes() {
        assert_eq!(Key::from_qwerty_key_code(0x00), Some(Key::A));
        assert_eq!(Key::from_qwerty_key_code(0x31), Some(Key::Space));
        assert_eq!(Key::from_qwerty_key_code(0x7A), Some(Key::F1));
        assert_eq!(Key::A.qwerty_key_code(), 0);
    }

    #[test]
    fn test_is_function_key() {
        assert!(Key::F1.is_function_key());
        assert!(Key::F20.is_function_key());
        assert!(!Key::A.is_function_key());
        assert!(!Key::Keypad1.is_function_key());
        assert!(!Key::Escape.is_function_key());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Key::from_name("A"), Some(Key::A));
        assert_eq!(Key::from_name("a"), Some(Key::A));
        assert_eq!(Key::from_name("5"), Some(Key::Digit5));
        assert_eq!(Key::from_name("F5"), Some(Key::F5));
        assert_eq!(Key::from_name("return"), Some(Key::Return));
        assert_eq!(Key::from_name("enter"), Some(Key::Return));
        assert_eq!(Key::from_name("pgup"), Some(Key::PageUp));
        assert_eq!(Key::from_name("keypad7"), Some(Key::Keypad7));
        assert_eq!(Key::from_name("no-such-key"), None);
    }

    #[test]
    fn test_display_parses_back() {
        for key in [
            Key::A,
            Key::Digit0,
            Key::Minus,
            Key::Return,
            Key::ArrowUp,
            Key::F13,
            Key::KeypadDecimal,
        ] {
            assert_eq!(key.name().parse::<Key>().unwrap(), key);
        }
    }

    #[test]
    fn test_from_str_error() {
        let err = "wobble".parse::<Key>().unwrap_err();
        assert_eq!(err, UnknownKeyName("wobble".to_string()));
    }
}
