// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard input vocabulary shared by the keyboard-driven state machines.

use alloc::string::String;

/// A logical key value, as reported by the platform after layout mapping.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key that produces text. Usually one character, but dead keys and
    /// input methods can yield longer strings.
    Character(String),
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Enter / Return.
    Enter,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Any other named key.
    Other,
}

impl Key {
    /// Shorthand for a single-character [`Key::Character`].
    pub fn char(c: char) -> Self {
        let mut s = String::new();
        s.push(c);
        Self::Character(s)
    }

    /// The character this key produces, if it is exactly one character.
    pub fn single_char(&self) -> Option<char> {
        let Self::Character(s) = self else {
            return None;
        };
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

bitflags::bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows.
        const META  = 0b0000_1000;
    }
}

impl Modifiers {
    /// Whether a command-style modifier (Ctrl, Alt, or Meta) is held.
    ///
    /// Shift alone does not count: it only changes which character is typed.
    pub fn is_command(self) -> bool {
        self.intersects(Self::CTRL | Self::ALT | Self::META)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_char_rejects_named_and_multi_char_keys() {
        assert_eq!(Key::char('a').single_char(), Some('a'));
        assert_eq!(Key::Character("ab".into()).single_char(), None);
        assert_eq!(Key::Character(String::new()).single_char(), None);
        assert_eq!(Key::Enter.single_char(), None);
    }

    #[test]
    fn shift_is_not_a_command_modifier() {
        assert!(!Modifiers::SHIFT.is_command());
        assert!((Modifiers::SHIFT | Modifiers::CTRL).is_command());
        assert!(Modifiers::META.is_command());
    }
}
