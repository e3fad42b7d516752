//! Lodestone - layout-invariant keyboard shortcut descriptors.
//!
//! Keyboard shortcuts live a double life: the window server reports modifier
//! state as event flags, while hotkey registration and persistence use the
//! low-level flag encoding, and the key itself must stay stable while the
//! user switches keyboard layouts. This crate models that with three pieces:
//!
//! - [`EventModifiers`] and [`CarbonModifiers`]: the two modifier-flag
//!   encodings, each a plain flag set with lossless conversion between the
//!   four supported modifiers (Command, Option, Control, Shift).
//! - [`Key`]: the layout-invariant key identity, anchored to the ANSI QWERTY
//!   reference codes.
//! - [`KeyCombo`]: the validated shortcut descriptor, with parsing, display,
//!   and backward-compatible persistence.
//!
//! Layout-dependent views (live key code, printable character) go through
//! the [`LayoutEngine`] trait; [`QwertyLayout`] is the reference resolver
//! and [`ActiveLayout`] holds whichever engine tracks the user's current
//! layout.
//!
//! # Example
//!
//! ```
//! use lodestone::{EventModifiers, Key, KeyCombo, QwertyLayout};
//!
//! let combo = KeyCombo::new(Key::A, EventModifiers::COMMAND | EventModifiers::SHIFT)
//!     .expect("Command+Shift is a valid modifier set");
//! assert_eq!(combo.to_string(), "⇧⌘A");
//! assert_eq!(combo.characters(&QwertyLayout::new()), "A");
//!
//! let parsed: KeyCombo = "cmd+shift+a".parse().unwrap();
//! assert_eq!(parsed, combo);
//! ```

mod key;
mod key_combo;
mod layout;
mod modifiers;

pub use key::{Key, UnknownKeyName};
pub use key_combo::{DecodeError, KeyCombo, ParseKeyComboError};
pub use layout::{ActiveLayout, LayoutEngine, QwertyLayout};
pub use modifiers::{CarbonModifiers, EventModifiers};
