//! The canonical keyboard-shortcut descriptor.
//!
//! A [`KeyCombo`] pairs a layout-invariant [`Key`] with a canonical modifier
//! set, stored in the low-level encoding. Construction is the only
//! transition: every constructor validates, and an invalid combination
//! yields `None` rather than a partially-valid value. Once built, a combo is
//! an immutable `Copy` value that is safe to share between threads.
//!
//! # Doubled modifiers
//!
//! A combo can also describe the degenerate "press one modifier twice in
//! quick succession" hotkey. Such combos carry no real key: the key field
//! holds a placeholder, and every key-derived view returns its empty/zero
//! form.
//!
//! ```
//! use lodestone::{EventModifiers, Key, KeyCombo};
//!
//! let combo = KeyCombo::new(Key::A, EventModifiers::COMMAND).unwrap();
//! assert_eq!(combo.qwerty_key_code(), 0);
//! assert!(!combo.doubled_modifiers());
//!
//! // A shortcut with no modifiers would swallow ordinary typing.
//! assert!(KeyCombo::new(Key::A, EventModifiers::NONE).is_none());
//!
//! let doubled = KeyCombo::doubled(EventModifiers::SHIFT).unwrap();
//! assert!(doubled.doubled_modifiers());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::key::Key;
use crate::layout::LayoutEngine;
use crate::modifiers::{CarbonModifiers, EventModifiers};

/// The key stored for doubled-modifier combos. Semantically ignored; its
/// reference code (0) is what older persisted records carry in that branch.
const PLACEHOLDER_KEY: Key = Key::A;

/// An immutable keyboard-shortcut descriptor.
///
/// See the [module documentation](self) for construction rules.
#[derive(Debug, Clone, Copy)]
pub struct KeyCombo {
    key: Key,
    modifiers: CarbonModifiers,
    doubled_modifiers: bool,
}

impl KeyCombo {
    /// Create a shortcut from a key and window-server modifier flags.
    ///
    /// Unsupported flag bits are dropped. Function keys imply the Function
    /// flag regardless of what the caller passed. Returns `None` when the
    /// normalized set carries no modifier at all, since such a shortcut
    /// would intercept ordinary typing.
    pub fn new(key: Key, flags: EventModifiers) -> Option<KeyCombo> {
        let mut filtered = flags.filter_supported();
        if key.is_function_key() {
            filtered |= EventModifiers::FUNCTION;
        }
        if !filtered.contains_supported() && !filtered.contains(EventModifiers::FUNCTION) {
            return None;
        }
        Some(KeyCombo {
            key,
            modifiers: filtered.to_carbon_supporting_function(),
            doubled_modifiers: false,
        })
    }

    /// Create a shortcut from a key and low-level modifier flags.
    ///
    /// Thin re-encoding into [`KeyCombo::new`]; there is no separate
    /// validation path for the low-level encoding.
    pub fn from_carbon(key: Key, modifiers: CarbonModifiers) -> Option<KeyCombo> {
        Self::new(key, modifiers.to_event_flags())
    }

    /// Create a shortcut from a QWERTY reference code and window-server
    /// modifier flags. Returns `None` for unknown codes.
    pub fn from_qwerty_key_code(code: u16, flags: EventModifiers) -> Option<KeyCombo> {
        Self::new(Key::from_qwerty_key_code(code)?, flags)
    }

    /// Create a shortcut from a QWERTY reference code and low-level
    /// modifier flags.
    pub fn from_qwerty_key_code_carbon(code: u16, modifiers: CarbonModifiers) -> Option<KeyCombo> {
        Self::from_carbon(Key::from_qwerty_key_code(code)?, modifiers)
    }

    /// Create a doubled-modifier shortcut from window-server flags.
    ///
    /// Exactly one of the four supported modifiers must be present.
    pub fn doubled(flags: EventModifiers) -> Option<KeyCombo> {
        if !flags.is_single_supported() {
            return None;
        }
        Some(KeyCombo {
            key: PLACEHOLDER_KEY,
            modifiers: flags.filter_supported().to_carbon(),
            doubled_modifiers: true,
        })
    }

    /// Create a doubled-modifier shortcut from low-level flags.
    pub fn doubled_carbon(modifiers: CarbonModifiers) -> Option<KeyCombo> {
        Self::doubled(modifiers.to_event_flags())
    }

    /// The stored key. Meaningless when
    /// [`doubled_modifiers`](Self::doubled_modifiers) is true.
    pub fn key(&self) -> Key {
        self.key
    }

    /// The canonical modifier set in the low-level storage encoding.
    pub fn modifiers(&self) -> CarbonModifiers {
        self.modifiers
    }

    /// Whether this combo is a doubled single modifier.
    pub fn doubled_modifiers(&self) -> bool {
        self.doubled_modifiers
    }

    /// The key's fixed QWERTY reference code, or 0 when doubled.
    pub fn qwerty_key_code(&self) -> u16 {
        if self.doubled_modifiers {
            return 0;
        }
        self.key.qwerty_key_code()
    }

    /// The live layout's key code for this combo's key, or 0 when doubled.
    pub fn current_key_code(&self, layout: &dyn LayoutEngine) -> u16 {
        if self.doubled_modifiers {
            return 0;
        }
        layout.key_code(self.key)
    }

    /// The printable character this combo produces under the live layout,
    /// or the empty string when doubled or unmapped.
    pub fn characters(&self, layout: &dyn LayoutEngine) -> String {
        if self.doubled_modifiers {
            return String::new();
        }
        layout
            .character(layout.key_code(self.key), self.modifiers)
            .unwrap_or_default()
    }

    /// The menu key-equivalent character: the same lookup as
    /// [`characters`](Self::characters) with Shift removed from the
    /// modifier set first, since a key equivalent expresses Shift through
    /// the character's case rather than a glyph.
    pub fn key_equivalent(&self, layout: &dyn LayoutEngine) -> String {
        if self.doubled_modifiers {
            return String::new();
        }
        let modifiers = self.modifiers.to_event_flags().without_shift().to_carbon();
        layout
            .character(layout.key_code(self.key), modifiers)
            .unwrap_or_default()
    }

    /// The stored modifiers re-encoded as window-server flags.
    pub fn key_equivalent_modifier_mask(&self) -> EventModifiers {
        self.modifiers.to_event_flags()
    }

    /// The modifier mask rendered as glyphs in the fixed ⌃⌥⇧⌘ order.
    pub fn key_equivalent_modifier_mask_string(&self) -> String {
        self.key_equivalent_modifier_mask().glyphs()
    }

    /// Check whether an incoming key press activates this combo.
    ///
    /// Doubled-modifier combos never match a key press; their activation is
    /// the dispatcher's job.
    pub fn matches(&self, key: Key, flags: EventModifiers) -> bool {
        !self.doubled_modifiers
            && self.key == key
            && flags.filter_supported() == self.modifiers.to_event_flags()
    }
}

// Equality is structural over the persisted identity: reference code,
// stored modifiers, doubled flag.
impl PartialEq for KeyCombo {
    fn eq(&self, other: &Self) -> bool {
        self.qwerty_key_code() == other.qwerty_key_code()
            && self.modifiers == other.modifiers
            && self.doubled_modifiers == other.doubled_modifiers
    }
}

impl Eq for KeyCombo {}

impl Hash for KeyCombo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qwerty_key_code().hash(state);
        self.modifiers.hash(state);
        self.doubled_modifiers.hash(state);
    }
}

// =============================================================================
// Parsing and Display
// =============================================================================

/// Error type for parsing a shortcut string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseKeyComboError {
    /// The string is empty.
    #[error("empty shortcut string")]
    Empty,
    /// No key was specified (only modifiers).
    #[error("no key specified (only modifiers)")]
    NoKey,
    /// A token is neither a modifier name nor a known key name.
    #[error("unknown key: {0}")]
    UnknownKey(String),
    /// The combination carries no supported modifier.
    #[error("shortcut carries no supported modifier")]
    NoSupportedModifiers,
}

impl FromStr for KeyCombo {
    type Err = ParseKeyComboError;

    /// Parse a shortcut from a string like `"Cmd+Shift+A"` or `"ctrl+f5"`.
    ///
    /// Modifier aliases: `cmd`/`command`/`meta`/`super`, `opt`/`option`/
    /// `alt`, `ctrl`/`control`, `shift`, `fn`/`function`. Any other token is
    /// parsed as a key name; the result goes through the same validation as
    /// [`KeyCombo::new`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseKeyComboError::Empty);
        }

        let mut flags = EventModifiers::NONE;
        let mut key: Option<Key> = None;

        for part in s.split('+') {
            let part = part.trim();
            match part.to_lowercase().as_str() {
                "cmd" | "command" | "meta" | "super" => flags |= EventModifiers::COMMAND,
                "opt" | "option" | "alt" => flags |= EventModifiers::OPTION,
                "ctrl" | "control" => flags |= EventModifiers::CONTROL,
                "shift" => flags |= EventModifiers::SHIFT,
                "fn" | "function" => flags |= EventModifiers::FUNCTION,
                _ => {
                    key = Some(
                        Key::from_name(part)
                            .ok_or_else(|| ParseKeyComboError::UnknownKey(part.to_string()))?,
                    );
                }
            }
        }

        let key = key.ok_or(ParseKeyComboError::NoKey)?;
        KeyCombo::new(key, flags).ok_or(ParseKeyComboError::NoSupportedModifiers)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.doubled_modifiers {
            let glyph = self.key_equivalent_modifier_mask_string();
            return write!(f, "{glyph}{glyph}");
        }
        write!(
            f,
            "{}{}",
            self.key_equivalent_modifier_mask_string(),
            self.key.name()
        )
    }
}

// =============================================================================
// Persistence
// =============================================================================

/// Error produced when a persisted shortcut cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The persisted key identity does not resolve to any known key.
    #[error("no key with QWERTY key code {0}")]
    UnknownKeyCode(u16),
}

/// Raw persisted field set. `keyCode` is the field name written by older
/// format revisions; it is accepted on decode and never written back.
#[derive(Deserialize)]
struct KeyComboRecord {
    #[serde(rename = "keyCode", default)]
    key_code: Option<u16>,
    #[serde(rename = "QWERTYKeyCode", default)]
    qwerty_key_code: Option<u16>,
    modifiers: u32,
    #[serde(rename = "doubledModifiers")]
    doubled_modifiers: bool,
}

impl Serialize for KeyCombo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("KeyCombo", 3)?;
        record.serialize_field("QWERTYKeyCode", &self.qwerty_key_code())?;
        record.serialize_field("modifiers", &self.modifiers.bits())?;
        record.serialize_field("doubledModifiers", &self.doubled_modifiers)?;
        record.end()
    }
}

impl<'de> Deserialize<'de> for KeyCombo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = KeyComboRecord::deserialize(deserializer)?;
        let modifiers = CarbonModifiers::from_bits(record.modifiers);

        if record.doubled_modifiers {
            // No key to resolve; the key field is ignored in this branch.
            return Ok(KeyCombo {
                key: PLACEHOLDER_KEY,
                modifiers,
                doubled_modifiers: true,
            });
        }

        // Legacy field wins when both are present.
        let code = match (record.key_code, record.qwerty_key_code) {
            (Some(code), _) => {
                tracing::debug!(code, "accepted legacy keyCode field");
                code
            }
            (None, Some(code)) => code,
            (None, None) => return Err(D::Error::missing_field("QWERTYKeyCode")),
        };

        let key = Key::from_qwerty_key_code(code)
            .ok_or_else(|| D::Error::custom(DecodeError::UnknownKeyCode(code)))?;
        Ok(KeyCombo {
            key,
            modifiers,
            doubled_modifiers: false,
        })
    }
}
