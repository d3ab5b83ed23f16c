// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement tokens: a side of the anchor plus an alignment along that side.

use core::fmt;
use core::str::FromStr;

/// Side of the anchor the floating element is placed against.
///
/// The side determines the main axis: `Top`/`Bottom` place along the y axis,
/// `Left`/`Right` along the x axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
    /// To the right of the anchor.
    Right,
}

impl Side {
    /// The side across the anchor from this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the main axis of this side is vertical (`Top` or `Bottom`).
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Alignment of the floating element along the cross axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    /// Align the leading edges.
    Start,
    /// Center on the anchor.
    #[default]
    Center,
    /// Align the trailing edges.
    End,
}

/// A compound placement such as `bottom-start`.
///
/// Formats and parses as a single token. Center alignment is written as the
/// bare side (`"bottom"`); `"bottom-center"` is accepted when parsing.
///
/// ```rust
/// use understory_placement::{Align, Placement, Side};
///
/// let p: Placement = "top-end".parse().unwrap();
/// assert_eq!(p, Placement::new(Side::Top, Align::End));
/// assert_eq!(p.to_string(), "top-end");
/// assert_eq!(Placement::BOTTOM.to_string(), "bottom");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Side of the anchor.
    pub side: Side,
    /// Cross-axis alignment.
    pub align: Align,
}

impl Placement {
    /// `top`
    pub const TOP: Self = Self::new(Side::Top, Align::Center);
    /// `top-start`
    pub const TOP_START: Self = Self::new(Side::Top, Align::Start);
    /// `top-end`
    pub const TOP_END: Self = Self::new(Side::Top, Align::End);
    /// `bottom`
    pub const BOTTOM: Self = Self::new(Side::Bottom, Align::Center);
    /// `bottom-start`
    pub const BOTTOM_START: Self = Self::new(Side::Bottom, Align::Start);
    /// `bottom-end`
    pub const BOTTOM_END: Self = Self::new(Side::Bottom, Align::End);
    /// `left`
    pub const LEFT: Self = Self::new(Side::Left, Align::Center);
    /// `left-start`
    pub const LEFT_START: Self = Self::new(Side::Left, Align::Start);
    /// `left-end`
    pub const LEFT_END: Self = Self::new(Side::Left, Align::End);
    /// `right`
    pub const RIGHT: Self = Self::new(Side::Right, Align::Center);
    /// `right-start`
    pub const RIGHT_START: Self = Self::new(Side::Right, Align::Start);
    /// `right-end`
    pub const RIGHT_END: Self = Self::new(Side::Right, Align::End);

    /// All twelve placements.
    pub const ALL: [Self; 12] = [
        Self::TOP,
        Self::TOP_START,
        Self::TOP_END,
        Self::BOTTOM,
        Self::BOTTOM_START,
        Self::BOTTOM_END,
        Self::LEFT,
        Self::LEFT_START,
        Self::LEFT_END,
        Self::RIGHT,
        Self::RIGHT_START,
        Self::RIGHT_END,
    ];

    /// Create a placement from its parts.
    pub const fn new(side: Side, align: Align) -> Self {
        Self { side, align }
    }

    /// The same alignment on the opposite side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self::new(self.side.opposite(), self.align)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::BOTTOM
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side.as_str();
        match self.align {
            Align::Start => write!(f, "{side}-start"),
            Align::Center => f.write_str(side),
            Align::End => write!(f, "{side}-end"),
        }
    }
}

/// Error returned when a placement token cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParsePlacementError {
    /// The side part was not one of `top`, `bottom`, `left`, `right`.
    #[error("unknown placement side `{0}`")]
    UnknownSide(alloc::string::String),
    /// The alignment part was not one of `start`, `center`, `end`.
    #[error("unknown placement alignment `{0}`")]
    UnknownAlign(alloc::string::String),
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (side, align) = match s.split_once('-') {
            Some((side, align)) => (side, Some(align)),
            None => (s, None),
        };
        let side = match side {
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            other => return Err(ParsePlacementError::UnknownSide(other.into())),
        };
        let align = match align {
            None | Some("center") => Align::Center,
            Some("start") => Align::Start,
            Some("end") => Align::End,
            Some(other) => return Err(ParsePlacementError::UnknownAlign(other.into())),
        };
        Ok(Self::new(side, align))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn tokens_round_trip_for_all_placements() {
        for p in Placement::ALL {
            let parsed: Placement = p.to_string().parse().unwrap();
            assert_eq!(parsed, p, "token {p} should parse back to itself");
        }
    }

    #[test]
    fn explicit_center_is_accepted() {
        assert_eq!("left-center".parse::<Placement>(), Ok(Placement::LEFT));
    }

    #[test]
    fn unknown_parts_are_rejected() {
        assert_eq!(
            "middle-start".parse::<Placement>(),
            Err(ParsePlacementError::UnknownSide("middle".into()))
        );
        assert_eq!(
            "top-left".parse::<Placement>(),
            Err(ParsePlacementError::UnknownAlign("left".into()))
        );
    }

    #[test]
    fn flipping_keeps_alignment() {
        assert_eq!(Placement::BOTTOM_START.flipped(), Placement::TOP_START);
        assert_eq!(Placement::RIGHT_END.flipped(), Placement::LEFT_END);
    }
}
