// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure placement computation: base position, flip, shift, arrow.

use kurbo::{Point, Rect, Size, Vec2};

use crate::placement::{Align, Placement, Side};

/// Coordinate space of the computed position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Document-relative: the viewport scroll offset is added.
    #[default]
    Absolute,
    /// Viewport-relative: the scroll offset is ignored.
    Fixed,
}

impl Strategy {
    /// The CSS `position` keyword for this strategy.
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
        }
    }
}

/// The visible area the floating element must stay within.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Extent of the viewport.
    pub size: Size,
    /// Current scroll offset of the document within the viewport.
    pub scroll: Vec2,
}

impl Viewport {
    /// A viewport of the given size with no scroll offset.
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            scroll: Vec2::ZERO,
        }
    }

    /// Replace the scroll offset.
    #[must_use]
    pub const fn with_scroll(mut self, scroll: Vec2) -> Self {
        self.scroll = scroll;
        self
    }
}

/// Options for [`compute_position`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PositionOptions {
    /// Requested placement.
    pub placement: Placement,
    /// Gap between anchor and floating element along the main axis.
    pub offset: f64,
    /// Coordinate space of the result.
    pub strategy: Strategy,
    /// Move to the opposite side when the requested side overflows the viewport.
    pub flip: bool,
    /// Clamp the cross-axis coordinate into the viewport.
    pub shift: bool,
    /// Size of an arrow element, when one should be positioned.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub arrow: Option<Size>,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            offset: 0.0,
            strategy: Strategy::Absolute,
            flip: true,
            shift: true,
            arrow: None,
        }
    }
}

/// Offset of the arrow within the floating element.
///
/// Only the cross-axis coordinate is set; the main-axis edge is left to the
/// renderer (the arrow sits on the side facing the anchor).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArrowOffset {
    /// Horizontal offset, set for `top`/`bottom` placements.
    pub x: Option<f64>,
    /// Vertical offset, set for `left`/`right` placements.
    pub y: Option<f64>,
}

/// A computed floating-element position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position {
    /// Left coordinate of the floating element.
    pub x: f64,
    /// Top coordinate of the floating element.
    pub y: f64,
    /// Placement after flipping.
    pub placement: Placement,
    /// Coordinate space of `x` and `y`.
    pub strategy: Strategy,
    /// Arrow offset, when an arrow size was supplied.
    pub arrow: Option<ArrowOffset>,
}

impl Position {
    /// Whether two positions are identical bit for bit.
    ///
    /// Unlike `==`, this treats equal `NaN` payloads as equal and `0.0` and
    /// `-0.0` as different, which is what change notification needs.
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        fn arrow_bits(a: Option<ArrowOffset>) -> Option<(Option<u64>, Option<u64>)> {
            a.map(|a| (a.x.map(f64::to_bits), a.y.map(f64::to_bits)))
        }
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.placement == other.placement
            && self.strategy == other.strategy
            && arrow_bits(self.arrow) == arrow_bits(other.arrow)
    }

    /// The top-left corner as a point.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Compute where a floating element of size `floating` goes relative to `anchor`.
///
/// `anchor` is in viewport coordinates (as reported by a bounding-box query).
/// Flip and shift are evaluated against `viewport`; the scroll offset is added
/// last when the strategy is [`Strategy::Absolute`].
///
/// ```rust
/// use kurbo::{Rect, Size};
/// use understory_placement::{Placement, PositionOptions, Viewport, compute_position};
///
/// let anchor = Rect::new(100.0, 100.0, 150.0, 140.0);
/// let floating = Size::new(80.0, 30.0);
/// let viewport = Viewport::new(Size::new(1024.0, 768.0));
/// let options = PositionOptions {
///     placement: Placement::BOTTOM_START,
///     ..PositionOptions::default()
/// };
///
/// let pos = compute_position(anchor, floating, &viewport, &options);
/// assert_eq!((pos.x, pos.y), (100.0, 140.0));
/// ```
pub fn compute_position(
    anchor: Rect,
    floating: Size,
    viewport: &Viewport,
    options: &PositionOptions,
) -> Position {
    let mut placement = options.placement;
    let mut origin = base_origin(anchor, floating, placement, options.offset);

    if options.flip && overflows_main_axis(origin, floating, placement.side, viewport.size) {
        let flipped = placement.flipped();
        tracing::trace!(from = ?placement, to = ?flipped, "placement flipped");
        placement = flipped;
        origin = base_origin(anchor, floating, placement, options.offset);
    }

    if options.shift {
        if placement.side.is_vertical() {
            origin.x = clamp_into(origin.x, viewport.size.width - floating.width);
        } else {
            origin.y = clamp_into(origin.y, viewport.size.height - floating.height);
        }
    }

    let arrow = options
        .arrow
        .map(|arrow| arrow_offset(anchor, origin, arrow, placement.side));

    let origin = match options.strategy {
        Strategy::Absolute => origin + viewport.scroll,
        Strategy::Fixed => origin,
    };

    Position {
        x: origin.x,
        y: origin.y,
        placement,
        strategy: options.strategy,
        arrow,
    }
}

fn base_origin(anchor: Rect, floating: Size, placement: Placement, offset: f64) -> Point {
    let center = anchor.center();
    if placement.side.is_vertical() {
        let x = match placement.align {
            Align::Start => anchor.x0,
            Align::Center => center.x - floating.width / 2.0,
            Align::End => anchor.x1 - floating.width,
        };
        let y = match placement.side {
            Side::Bottom => anchor.y1 + offset,
            _ => anchor.y0 - floating.height - offset,
        };
        Point::new(x, y)
    } else {
        let y = match placement.align {
            Align::Start => anchor.y0,
            Align::Center => center.y - floating.height / 2.0,
            Align::End => anchor.y1 - floating.height,
        };
        let x = match placement.side {
            Side::Right => anchor.x1 + offset,
            _ => anchor.x0 - floating.width - offset,
        };
        Point::new(x, y)
    }
}

fn overflows_main_axis(origin: Point, floating: Size, side: Side, viewport: Size) -> bool {
    match side {
        Side::Top => origin.y < 0.0,
        Side::Bottom => origin.y + floating.height > viewport.height,
        Side::Left => origin.x < 0.0,
        Side::Right => origin.x + floating.width > viewport.width,
    }
}

/// Clamp into `[0, max]`; a negative `max` pins to `0`.
fn clamp_into(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}

fn arrow_offset(anchor: Rect, origin: Point, arrow: Size, side: Side) -> ArrowOffset {
    let center = anchor.center();
    if side.is_vertical() {
        ArrowOffset {
            x: Some(center.x - origin.x - arrow.width / 2.0),
            y: None,
        }
    } else {
        ArrowOffset {
            x: None,
            y: Some(center.y - origin.y - arrow.height / 2.0),
        }
    }
}
