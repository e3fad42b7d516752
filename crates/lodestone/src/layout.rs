//! Keyboard-layout lookup.
//!
//! A [`KeyCombo`](crate::KeyCombo) stores its key in layout-invariant form;
//! deriving the live key code or the user-visible character requires a
//! [`LayoutEngine`]. The engine is an injected capability rather than
//! ambient global state, so the combo model stays pure and testable.
//!
//! Two implementations ship with the crate:
//!
//! - [`QwertyLayout`]: the deterministic ANSI QWERTY reference resolver.
//! - [`ActiveLayout`]: a shareable holder for whichever engine reflects the
//!   layout the user currently types with, swappable when the OS reports a
//!   layout change.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::key::Key;
use crate::modifiers::CarbonModifiers;

/// Maps layout-invariant keys to the live keyboard layout.
///
/// Implementations must reflect the layout that is active at call time.
/// Results for the same input may therefore differ between calls; callers
/// needing a stable snapshot cache the derived values themselves.
pub trait LayoutEngine {
    /// The live layout's key code for the given key.
    fn key_code(&self, key: Key) -> u16;

    /// The printable character produced by the given live key code under
    /// the given modifiers, or `None` when the code is unmapped.
    fn character(&self, key_code: u16, modifiers: CarbonModifiers) -> Option<String>;
}

// =============================================================================
// Reference QWERTY Resolver
// =============================================================================

/// The ANSI QWERTY reference layout.
///
/// Key codes are the identity mapping over the reference codes, and
/// characters come from the reference key caps: Shift folds into the shifted
/// symbol, all other modifiers leave the character untouched. Keys without a
/// printable cap (function keys, navigation keys) are unmapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct QwertyLayout;

impl QwertyLayout {
    /// Create the reference resolver.
    pub fn new() -> Self {
        Self
    }

    /// The (base, shifted) character pair printed on the reference key cap.
    fn key_caps(key: Key) -> Option<(&'static str, &'static str)> {
        let pair = match key {
            Key::A => ("a", "A"),
            Key::B => ("b", "B"),
            Key::C => ("c", "C"),
            Key::D => ("d", "D"),
            Key::E => ("e", "E"),
            Key::F => ("f", "F"),
            Key::G => ("g", "G"),
            Key::H => ("h", "H"),
            Key::I => ("i", "I"),
            Key::J => ("j", "J"),
            Key::K => ("k", "K"),
            Key::L => ("l", "L"),
            Key::M => ("m", "M"),
            Key::N => ("n", "N"),
            Key::O => ("o", "O"),
            Key::P => ("p", "P"),
            Key::Q => ("q", "Q"),
            Key::R => ("r", "R"),
            Key::S => ("s", "S"),
            Key::T => ("t", "T"),
            Key::U => ("u", "U"),
            Key::V => ("v", "V"),
            Key::W => ("w", "W"),
            Key::X => ("x", "X"),
            Key::Y => ("y", "Y"),
            Key::Z => ("z", "Z"),
            Key::Digit0 => ("0", ")"),
            Key::Digit1 => ("1", "!"),
            Key::Digit2 => ("2", "@"),
            Key::Digit3 => ("3", "#"),
            Key::Digit4 => ("4", "$"),
            Key::Digit5 => ("5", "%"),
            Key::Digit6 => ("6", "^"),
            Key::Digit7 => ("7", "&"),
            Key::Digit8 => ("8", "*"),
            Key::Digit9 => ("9", "("),
            Key::Minus => ("-", "_"),
            Key::Equal => ("=", "+"),
            Key::BracketLeft => ("[", "{"),
            Key::BracketRight => ("]", "}"),
            Key::Backslash => ("\\", "|"),
            Key::Semicolon => (";", ":"),
            Key::Quote => ("'", "\""),
            Key::Comma => (",", "<"),
            Key::Period => (".", ">"),
            Key::Slash => ("/", "?"),
            Key::Grave => ("`", "~"),
            Key::Space => (" ", " "),
            Key::Tab => ("\t", "\t"),
            Key::Return => ("\r", "\r"),
            Key::Keypad0 => ("0", "0"),
            Key::Keypad1 => ("1", "1"),
            Key::Keypad2 => ("2", "2"),
            Key::Keypad3 => ("3", "3"),
            Key::Keypad4 => ("4", "4"),
            Key::Keypad5 => ("5", "5"),
            Key::Keypad6 => ("6", "6"),
            Key::Keypad7 => ("7", "7"),
            Key::Keypad8 => ("8", "8"),
            Key::Keypad9 => ("9", "9"),
            Key::KeypadDecimal => (".", "."),
            Key::KeypadDivide => ("/", "/"),
            Key::KeypadEnter => ("\r", "\r"),
            Key::KeypadEquals => ("=", "="),
            Key::KeypadMinus => ("-", "-"),
            Key::KeypadMultiply => ("*", "*"),
            Key::KeypadPlus => ("+", "+"),
            _ => return None,
        };
        Some(pair)
    }
}

impl LayoutEngine for QwertyLayout {
    fn key_code(&self, key: Key) -> u16 {
        key.qwerty_key_code()
    }

    fn character(&self, key_code: u16, modifiers: CarbonModifiers) -> Option<String> {
        let key = Key::from_qwerty_key_code(key_code)?;
        let (base, shifted) = Self::key_caps(key)?;
        let character = if modifiers.contains(CarbonModifiers::SHIFT) {
            shifted
        } else {
            base
        };
        Some(character.to_string())
    }
}

// =============================================================================
// Active Layout Holder
// =============================================================================

/// Process-wide holder for the engine of the currently active layout.
///
/// The operating system switches layouts asynchronously; whatever component
/// observes those switches calls [`install`](Self::install) with a fresh
/// engine, and every reader sees it on their next lookup. `ActiveLayout`
/// itself implements [`LayoutEngine`] by delegating to the installed engine,
/// so it can be passed anywhere an engine is expected.
///
/// Starts out with the [`QwertyLayout`] reference resolver installed.
pub struct ActiveLayout {
    engine: RwLock<Arc<dyn LayoutEngine + Send + Sync>>,
}

impl ActiveLayout {
    /// Create a holder with the reference QWERTY resolver installed.
    pub fn new() -> Self {
        Self {
            engine: RwLock::new(Arc::new(QwertyLayout)),
        }
    }

    /// Replace the installed engine.
    pub fn install(&self, engine: Arc<dyn LayoutEngine + Send + Sync>) {
        tracing::debug!("installing new keyboard layout engine");
        *self.engine.write() = engine;
    }

    /// The currently installed engine.
    pub fn engine(&self) -> Arc<dyn LayoutEngine + Send + Sync> {
        self.engine.read().clone()
    }
}

impl Default for ActiveLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine for ActiveLayout {
    fn key_code(&self, key: Key) -> u16 {
        self.engine.read().key_code(key)
    }

    fn character(&self, key_code: u16, modifiers: CarbonModifiers) -> Option<String> {
        self.engine.read().character(key_code, modifiers)
    }
}

impl std::fmt::Debug for ActiveLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveLayout").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qwerty_key_code_is_identity() {
        let layout = QwertyLayout::new();
        assert_eq!(layout.key_code(Key::A), Key::A.qwerty_key_code());
        assert_eq!(layout.key_code(Key::F5), Key::F5.qwerty_key_code());
    }

    #[test]
    fn test_qwerty_characters() {
        let layout = QwertyLayout::new();
        let code = Key::Digit5.qwerty_key_code();
        assert_eq!(
            layout.character(code, CarbonModifiers::NONE),
            Some("5".to_string())
        );
        assert_eq!(
            layout.character(code, CarbonModifiers::SHIFT),
            Some("%".to_string())
        );
        // Non-Shift modifiers do not change the reference character.
        assert_eq!(
            layout.character(code, CarbonModifiers::COMMAND),
            Some("5".to_string())
        );
    }

    #[test]
    fn test_qwerty_unmapped_keys() {
        let layout = QwertyLayout::new();
        assert_eq!(
            layout.character(Key::F1.qwerty_key_code(), CarbonModifiers::NONE),
            None
        );
        assert_eq!(
            layout.character(Key::ArrowUp.qwerty_key_code(), CarbonModifiers::NONE),
            None
        );
        assert_eq!(layout.character(0xFFFF, CarbonModifiers::NONE), None);
    }

    struct UpsideDownLayout;

    impl LayoutEngine for UpsideDownLayout {
        fn key_code(&self, _key: Key) -> u16 {
            42
        }

        fn character(&self, _key_code: u16, _modifiers: CarbonModifiers) -> Option<String> {
            Some("¡".to_string())
        }
    }

    #[test]
    fn test_active_layout_swap() {
        let active = ActiveLayout::new();
        let code = Key::A.qwerty_key_code();
        assert_eq!(
            active.character(code, CarbonModifiers::NONE),
            Some("a".to_string())
        );

        active.install(Arc::new(UpsideDownLayout));
        assert_eq!(active.key_code(Key::A), 42);
        assert_eq!(
            active.character(code, CarbonModifiers::NONE),
            Some("¡".to_string())
        );
    }
}
