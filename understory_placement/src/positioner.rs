// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stateful positioner that recomputes on registration and environment changes.

use kurbo::{Rect, Size};

use crate::compute::{Position, PositionOptions, Viewport, compute_position};

/// Keeps the last known inputs and output of [`compute_position`].
///
/// The host forwards each recomputation trigger through a setter:
///
/// - anchor or floating element registered, resized, or removed:
///   [`Positioner::set_anchor`], [`Positioner::set_floating`];
/// - window scroll or resize: [`Positioner::set_viewport`];
/// - placement, offset, or strategy changes: [`Positioner::set_options`].
///
/// Every setter returns `Some(position)` only when the newly computed position
/// differs from the last one delivered, so the host can forward the result
/// downstream without redundant notifications. While either element is
/// missing the last known position is retained.
///
/// ```rust
/// use kurbo::{Rect, Size};
/// use understory_placement::{Placement, PositionOptions, Positioner, Viewport};
///
/// let mut positioner = Positioner::new(
///     PositionOptions { placement: Placement::BOTTOM_START, ..PositionOptions::default() },
///     Viewport::new(Size::new(800.0, 600.0)),
/// );
/// assert!(positioner.set_anchor(Some(Rect::new(10.0, 10.0, 50.0, 30.0))).is_none());
///
/// let pos = positioner.set_floating(Some(Size::new(100.0, 40.0))).unwrap();
/// assert_eq!((pos.x, pos.y), (10.0, 30.0));
///
/// // Same geometry again: nothing to report.
/// assert!(positioner.set_anchor(Some(Rect::new(10.0, 10.0, 50.0, 30.0))).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Positioner {
    options: PositionOptions,
    viewport: Viewport,
    anchor: Option<Rect>,
    floating: Option<Size>,
    last: Option<Position>,
}

impl Positioner {
    /// Create a positioner with no registered elements.
    pub fn new(options: PositionOptions, viewport: Viewport) -> Self {
        Self {
            options,
            viewport,
            anchor: None,
            floating: None,
            last: None,
        }
    }

    /// Register, resize, or (with `None`) unregister the anchor element.
    pub fn set_anchor(&mut self, anchor: Option<Rect>) -> Option<Position> {
        self.anchor = anchor;
        self.update()
    }

    /// Register, resize, or (with `None`) unregister the floating element.
    pub fn set_floating(&mut self, floating: Option<Size>) -> Option<Position> {
        self.floating = floating;
        self.update()
    }

    /// Register, resize, or (with `None`) remove the arrow element.
    pub fn set_arrow(&mut self, arrow: Option<Size>) -> Option<Position> {
        self.options.arrow = arrow;
        self.update()
    }

    /// Report a window scroll or resize.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Option<Position> {
        self.viewport = viewport;
        self.update()
    }

    /// Replace the placement options.
    pub fn set_options(&mut self, options: PositionOptions) -> Option<Position> {
        self.options = options;
        self.update()
    }

    /// Current options.
    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// Last computed position, if any has been computed yet.
    pub fn position(&self) -> Option<&Position> {
        self.last.as_ref()
    }

    /// Recompute from the current inputs.
    ///
    /// Returns `None` when an element is missing or when the result is
    /// bit-identical to the last delivered position.
    pub fn update(&mut self) -> Option<Position> {
        let (Some(anchor), Some(floating)) = (self.anchor, self.floating) else {
            return None;
        };
        let next = compute_position(anchor, floating, &self.viewport, &self.options);
        if self.last.is_some_and(|last| last.bitwise_eq(&next)) {
            return None;
        }
        tracing::trace!(x = next.x, y = next.y, placement = ?next.placement, "position changed");
        self.last = Some(next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Strategy;
    use crate::placement::Placement;
    use kurbo::Vec2;

    fn positioner() -> Positioner {
        Positioner::new(
            PositionOptions {
                placement: Placement::BOTTOM_START,
                ..PositionOptions::default()
            },
            Viewport::new(Size::new(1024.0, 800.0)),
        )
    }

    fn anchor() -> Rect {
        Rect::from_origin_size((100.0, 100.0), (50.0, 40.0))
    }

    #[test]
    fn waits_for_both_elements() {
        let mut p = positioner();
        assert!(p.set_floating(Some(Size::new(80.0, 30.0))).is_none());
        assert!(p.position().is_none());
        let pos = p.set_anchor(Some(anchor())).unwrap();
        assert_eq!((pos.x, pos.y), (100.0, 140.0));
    }

    #[test]
    fn unchanged_inputs_do_not_notify() {
        let mut p = positioner();
        p.set_anchor(Some(anchor()));
        assert!(p.set_floating(Some(Size::new(80.0, 30.0))).is_some());
        assert!(p.update().is_none());
        assert!(p.set_viewport(Viewport::new(Size::new(1024.0, 800.0))).is_none());
        assert!(p.set_options(*p.options()).is_none());
    }

    #[test]
    fn missing_anchor_retains_last_position() {
        let mut p = positioner();
        p.set_anchor(Some(anchor()));
        let first = p.set_floating(Some(Size::new(80.0, 30.0))).unwrap();
        assert!(p.set_anchor(None).is_none());
        assert_eq!(p.position(), Some(&first));
    }

    #[test]
    fn scroll_and_strategy_changes_notify() {
        let mut p = positioner();
        p.set_anchor(Some(anchor()));
        p.set_floating(Some(Size::new(80.0, 30.0)));

        let scrolled = Viewport::new(Size::new(1024.0, 800.0)).with_scroll(Vec2::new(0.0, 50.0));
        let pos = p.set_viewport(scrolled).unwrap();
        assert_eq!(pos.y, 190.0);

        let fixed = PositionOptions {
            strategy: Strategy::Fixed,
            ..*p.options()
        };
        let pos = p.set_options(fixed).unwrap();
        assert_eq!(pos.y, 140.0);
    }

    #[test]
    fn anchor_resize_repositions() {
        let mut p = positioner();
        p.set_anchor(Some(anchor()));
        p.set_floating(Some(Size::new(80.0, 30.0)));
        let pos = p
            .set_anchor(Some(Rect::from_origin_size((100.0, 100.0), (50.0, 60.0))))
            .unwrap();
        assert_eq!(pos.y, 160.0);
    }

    #[test]
    fn arrow_registration_adds_offset() {
        let mut p = positioner();
        p.set_anchor(Some(anchor()));
        p.set_floating(Some(Size::new(80.0, 30.0)));
        let pos = p.set_arrow(Some(Size::new(10.0, 5.0))).unwrap();
        assert_eq!(pos.arrow.and_then(|a| a.x), Some(20.0));
    }
}
