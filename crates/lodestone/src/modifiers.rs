//! The two modifier-flag encodings and the normalization rules between them.
//!
//! The window server and the legacy low-level registration API disagree on
//! which bit means which modifier:
//!
//! - [`EventModifiers`]: flags as they arrive on window-server keyboard
//!   events. One bit per modifier inside a larger flag space that also
//!   carries caps lock, numeric pad, help, and other bits this crate does
//!   not support.
//! - [`CarbonModifiers`]: the small-integer encoding used for storage and
//!   for registration calls, with its own per-modifier bit assignment.
//!
//! Every crossing between the two encodings goes through the conversions in
//! this module; raw integers never travel across the boundary untyped.

use std::ops::{BitOr, BitOrAssign};

// =============================================================================
// Window-Server Encoding
// =============================================================================

/// Modifier flags in the window-server event encoding.
///
/// Values arriving from an event tap may contain bits outside the four
/// supported modifiers (Command, Option, Control, Shift). Use
/// [`filter_supported`](Self::filter_supported) to normalize a raw flag set
/// before acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventModifiers(u32);

impl EventModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self(0);
    /// Caps Lock is engaged. Not a supported shortcut modifier.
    pub const CAPS_LOCK: Self = Self(1 << 16);
    /// Shift key.
    pub const SHIFT: Self = Self(1 << 17);
    /// Control key.
    pub const CONTROL: Self = Self(1 << 18);
    /// Option (Alt) key.
    pub const OPTION: Self = Self(1 << 19);
    /// Command key.
    pub const COMMAND: Self = Self(1 << 20);
    /// A key on the numeric pad. Not a supported shortcut modifier.
    pub const NUMERIC_PAD: Self = Self(1 << 21);
    /// The Help key. Not a supported shortcut modifier.
    pub const HELP: Self = Self(1 << 22);
    /// The Function (fn) key. Carried internally when a function key is
    /// involved; excluded from the supported-modifier predicates.
    pub const FUNCTION: Self = Self(1 << 23);

    /// Create from a raw window-server flag word.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw flag word.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if all flags in `other` are present in this set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check if no flags are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Keep only the four supported modifier bits, silently dropping
    /// everything else (caps lock, numeric pad, help, function, unknown
    /// bits).
    pub fn filter_supported(self) -> Self {
        let mut filtered = Self::NONE;
        if self.contains(Self::COMMAND) {
            filtered |= Self::COMMAND;
        }
        if self.contains(Self::OPTION) {
            filtered |= Self::OPTION;
        }
        if self.contains(Self::CONTROL) {
            filtered |= Self::CONTROL;
        }
        if self.contains(Self::SHIFT) {
            filtered |= Self::SHIFT;
        }
        filtered
    }

    /// Check if at least one of the four supported modifiers is present.
    pub fn contains_supported(self) -> bool {
        self.contains(Self::COMMAND)
            || self.contains(Self::OPTION)
            || self.contains(Self::CONTROL)
            || self.contains(Self::SHIFT)
    }

    /// Check if exactly one of the four supported modifiers is present.
    pub fn is_single_supported(self) -> bool {
        let selected = [
            self.contains(Self::COMMAND),
            self.contains(Self::OPTION),
            self.contains(Self::CONTROL),
            self.contains(Self::SHIFT),
        ];
        selected.iter().filter(|&&on| on).count() == 1
    }

    /// The same set with Shift removed.
    ///
    /// Menu key-equivalents fold Shift into the character itself ("A" rather
    /// than "⇧a"), so the modifier mask used for the character lookup must
    /// not repeat it.
    pub fn without_shift(self) -> Self {
        Self(self.0 & !Self::SHIFT.0)
    }

    /// Convert to the low-level encoding, restricted to the four supported
    /// bits. The Function bit is never carried by this conversion.
    pub fn to_carbon(self) -> CarbonModifiers {
        self.to_carbon_inner(false)
    }

    /// Convert to the low-level encoding, additionally carrying the Function
    /// bit when present. Used during shortcut construction, where a function
    /// key implies the flag.
    pub fn to_carbon_supporting_function(self) -> CarbonModifiers {
        self.to_carbon_inner(true)
    }

    fn to_carbon_inner(self, support_function_key: bool) -> CarbonModifiers {
        let mut carbon = CarbonModifiers::NONE;
        if self.contains(Self::COMMAND) {
            carbon |= CarbonModifiers::COMMAND;
        }
        if self.contains(Self::OPTION) {
            carbon |= CarbonModifiers::OPTION;
        }
        if self.contains(Self::CONTROL) {
            carbon |= CarbonModifiers::CONTROL;
        }
        if self.contains(Self::SHIFT) {
            carbon |= CarbonModifiers::SHIFT;
        }
        if support_function_key && self.contains(Self::FUNCTION) {
            carbon |= CarbonModifiers::FUNCTION;
        }
        carbon
    }

    /// The modifier glyphs in canonical order: ⌃ ⌥ ⇧ ⌘.
    ///
    /// The order is fixed and stable across calls.
    pub fn glyphs(self) -> String {
        let mut glyphs = String::new();
        if self.contains(Self::CONTROL) {
            glyphs.push('⌃');
        }
        if self.contains(Self::OPTION) {
            glyphs.push('⌥');
        }
        if self.contains(Self::SHIFT) {
            glyphs.push('⇧');
        }
        if self.contains(Self::COMMAND) {
            glyphs.push('⌘');
        }
        glyphs
    }
}

impl BitOr for EventModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EventModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// =============================================================================
// Low-Level Encoding
// =============================================================================

/// Modifier flags in the legacy low-level encoding.
///
/// This is the storage form of a [`KeyCombo`](crate::KeyCombo) and the form
/// expected by registration calls. The bit positions are unrelated to
/// [`EventModifiers`]; convert with
/// [`to_event_flags`](Self::to_event_flags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CarbonModifiers(u32);

impl CarbonModifiers {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// Command key.
    pub const COMMAND: Self = Self(1 << 8);
    /// Shift key.
    pub const SHIFT: Self = Self(1 << 9);
    /// Option (Alt) key.
    pub const OPTION: Self = Self(1 << 11);
    /// Control key.
    pub const CONTROL: Self = Self(1 << 12);
    /// The Function (fn) key. The low-level API has no bit of its own for
    /// it, so the window-server bit is carried through verbatim.
    pub const FUNCTION: Self = Self(1 << 23);

    /// Create from raw stored bits. Unknown bits are retained verbatim so
    /// persisted values round-trip untouched.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw stored bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if all flags in `other` are present in this set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check if no flags are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Convert to the window-server encoding, restricted to the four
    /// supported bits. The Function bit is excluded from the general
    /// conversion.
    pub fn to_event_flags(self) -> EventModifiers {
        let mut flags = EventModifiers::NONE;
        if self.contains(Self::COMMAND) {
            flags |= EventModifiers::COMMAND;
        }
        if self.contains(Self::OPTION) {
            flags |= EventModifiers::OPTION;
        }
        if self.contains(Self::CONTROL) {
            flags |= EventModifiers::CONTROL;
        }
        if self.contains(Self::SHIFT) {
            flags |= EventModifiers::SHIFT;
        }
        flags
    }
}

impl BitOr for CarbonModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CarbonModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported_subsets() -> Vec<EventModifiers> {
        let singles = [
            EventModifiers::COMMAND,
            EventModifiers::OPTION,
            EventModifiers::CONTROL,
            EventModifiers::SHIFT,
        ];
        let mut subsets = Vec::new();
        for mask in 1u32..16 {
            let mut set = EventModifiers::NONE;
            for (i, single) in singles.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    set |= *single;
                }
            }
            subsets.push(set);
        }
        subsets
    }

    #[test]
    fn test_filter_drops_unsupported_bits() {
        let raw = EventModifiers::COMMAND
            | EventModifiers::CAPS_LOCK
            | EventModifiers::NUMERIC_PAD
            | EventModifiers::HELP
            | EventModifiers::from_bits(1 << 3);
        assert_eq!(raw.filter_supported(), EventModifiers::COMMAND);
    }

    #[test]
    fn test_filter_keeps_all_supported_bits() {
        let all = EventModifiers::COMMAND
            | EventModifiers::OPTION
            | EventModifiers::CONTROL
            | EventModifiers::SHIFT;
        assert_eq!(all.filter_supported(), all);
    }

    #[test]
    fn test_contains_supported() {
        assert!(EventModifiers::SHIFT.contains_supported());
        assert!(!EventModifiers::NONE.contains_supported());
        assert!(!EventModifiers::CAPS_LOCK.contains_supported());
        assert!(!EventModifiers::FUNCTION.contains_supported());
    }

    #[test]
    fn test_is_single_supported() {
        assert!(EventModifiers::COMMAND.is_single_supported());
        assert!(EventModifiers::OPTION.is_single_supported());
        assert!(EventModifiers::CONTROL.is_single_supported());
        assert!(EventModifiers::SHIFT.is_single_supported());

        assert!(!EventModifiers::NONE.is_single_supported());
        assert!(!(EventModifiers::COMMAND | EventModifiers::OPTION).is_single_supported());
        assert!(!EventModifiers::CAPS_LOCK.is_single_supported());

        // Extra unsupported bits do not disturb the count.
        assert!((EventModifiers::SHIFT | EventModifiers::CAPS_LOCK).is_single_supported());
    }

    #[test]
    fn test_without_shift() {
        let set = EventModifiers::COMMAND | EventModifiers::SHIFT;
        assert_eq!(set.without_shift(), EventModifiers::COMMAND);
        assert_eq!(EventModifiers::COMMAND.without_shift(), EventModifiers::COMMAND);
    }

    #[test]
    fn test_conversion_round_trips() {
        for set in supported_subsets() {
            let carbon = set.to_carbon();
            assert_eq!(carbon.to_event_flags(), set);
            assert_eq!(carbon.to_event_flags().to_carbon(), carbon);
        }
    }

    #[test]
    fn test_function_bit_only_carried_when_supported() {
        let set = EventModifiers::COMMAND | EventModifiers::FUNCTION;
        assert!(!set.to_carbon().contains(CarbonModifiers::FUNCTION));
        assert!(
            set.to_carbon_supporting_function()
                .contains(CarbonModifiers::FUNCTION)
        );
        // The general reverse conversion drops it again.
        assert_eq!(
            set.to_carbon_supporting_function().to_event_flags(),
            EventModifiers::COMMAND
        );
    }

    #[test]
    fn test_glyph_order_is_canonical() {
        let all = EventModifiers::COMMAND
            | EventModifiers::OPTION
            | EventModifiers::CONTROL
            | EventModifiers::SHIFT;
        assert_eq!(all.glyphs(), "⌃⌥⇧⌘");
        assert_eq!(EventModifiers::SHIFT.glyphs(), "⇧");
        assert_eq!(EventModifiers::NONE.glyphs(), "");
    }

    #[test]
    fn test_carbon_bits_round_trip_verbatim() {
        let stored = CarbonModifiers::from_bits(0x0042_1234);
        assert_eq!(stored.bits(), 0x0042_1234);
    }
}
