// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which elements take part in sequential (Tab) focus navigation.

/// The kind of element, as far as focusability is concerned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A hyperlink; only focusable when it has an `href`.
    Link {
        /// Whether the link has a destination.
        has_href: bool,
    },
    /// A button.
    Button,
    /// A text or form input.
    Input {
        /// `type="hidden"` inputs never take focus.
        hidden_type: bool,
    },
    /// A select / combo box.
    Select,
    /// A multi-line text area.
    TextArea,
    /// Anything else; only focusable with an explicit tab index.
    #[default]
    Other,
}

impl ElementKind {
    const fn is_form_control(self) -> bool {
        matches!(
            self,
            Self::Button | Self::Input { .. } | Self::Select | Self::TextArea
        )
    }
}

/// The properties of an element that decide whether it is focusable.
///
/// `hidden`, `aria_hidden`, and `inert` should reflect the effective state,
/// including anything inherited from ancestors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FocusableProps {
    /// Element kind.
    pub kind: ElementKind,
    /// Disabled form control.
    pub disabled: bool,
    /// Not rendered (display none, visibility hidden, `hidden` attribute).
    pub hidden: bool,
    /// Removed from the accessibility tree.
    pub aria_hidden: bool,
    /// Inside an inert subtree.
    pub inert: bool,
    /// Explicit tab index, if any.
    pub tab_index: Option<i32>,
}

impl FocusableProps {
    /// Props for an enabled, visible element of the given kind.
    pub const fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            disabled: false,
            hidden: false,
            aria_hidden: false,
            inert: false,
            tab_index: None,
        }
    }

    /// Mark as disabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set an explicit tab index.
    #[must_use]
    pub const fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }
}

/// Whether an element is reachable with Tab.
///
/// ```
/// use understory_focus::focusable::{ElementKind, FocusableProps, is_focusable};
///
/// assert!(is_focusable(&FocusableProps::new(ElementKind::Button)));
/// assert!(!is_focusable(&FocusableProps::new(ElementKind::Button).disabled()));
/// assert!(!is_focusable(&FocusableProps::new(ElementKind::Link { has_href: false })));
/// assert!(is_focusable(&FocusableProps::new(ElementKind::Other).with_tab_index(0)));
/// ```
pub fn is_focusable(props: &FocusableProps) -> bool {
    if props.hidden || props.aria_hidden || props.inert {
        return false;
    }
    if props.disabled && props.kind.is_form_control() {
        return false;
    }
    if let Some(tab_index) = props.tab_index {
        return tab_index >= 0;
    }
    match props.kind {
        ElementKind::Link { has_href } => has_href,
        ElementKind::Input { hidden_type } => !hidden_type,
        ElementKind::Button | ElementKind::Select | ElementKind::TextArea => true,
        ElementKind::Other => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_controls_are_focusable_when_enabled() {
        for kind in [
            ElementKind::Button,
            ElementKind::Select,
            ElementKind::TextArea,
            ElementKind::Input { hidden_type: false },
        ] {
            assert!(is_focusable(&FocusableProps::new(kind)), "{kind:?} should be focusable");
            assert!(
                !is_focusable(&FocusableProps::new(kind).disabled()),
                "disabled {kind:?} should not be focusable"
            );
        }
    }

    #[test]
    fn hidden_inputs_and_bare_links_are_skipped() {
        assert!(!is_focusable(&FocusableProps::new(ElementKind::Input {
            hidden_type: true
        })));
        assert!(!is_focusable(&FocusableProps::new(ElementKind::Link {
            has_href: false
        })));
        assert!(is_focusable(&FocusableProps::new(ElementKind::Link {
            has_href: true
        })));
    }

    #[test]
    fn tab_index_overrides_kind() {
        assert!(is_focusable(&FocusableProps::new(ElementKind::Other).with_tab_index(2)));
        assert!(!is_focusable(&FocusableProps::new(ElementKind::Button).with_tab_index(-1)));
        assert!(!is_focusable(&FocusableProps::new(ElementKind::Other)));
    }

    #[test]
    fn hidden_aria_hidden_and_inert_exclude_everything() {
        let base = FocusableProps::new(ElementKind::Button).with_tab_index(0);
        assert!(!is_focusable(&FocusableProps { hidden: true, ..base }));
        assert!(!is_focusable(&FocusableProps { aria_hidden: true, ..base }));
        assert!(!is_focusable(&FocusableProps { inert: true, ..base }));
    }

    #[test]
    fn disabled_only_applies_to_form_controls() {
        let div = FocusableProps::new(ElementKind::Other).with_tab_index(0).disabled();
        assert!(is_focusable(&div));
    }
}
