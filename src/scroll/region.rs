use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{ScrollFxError, ScrollFxResult};
use std::fmt;

/// Vertical scroll interval `[start, end]` over which progress runs from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRegion {
    /// Scroll position where progress is 0.
    pub start: f64,
    /// Scroll position where progress is 1.
    pub end: f64,
}

impl ScrollRegion {
    /// Region between two explicit scroll positions.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Region between two trigger positions measured against `rect` and `viewport`.
    pub fn resolve(start: &TriggerPos, end: &TriggerPos, rect: Rect, viewport: Viewport) -> Self {
        Self {
            start: start.scroll_offset(rect, viewport),
            end: end.scroll_offset(rect, viewport),
        }
    }

    /// Normalized position of `scroll` in the region, clamped to `[0, 1]`.
    ///
    /// A degenerate region (`end <= start`) behaves as a step at `start`.
    pub fn progress(&self, scroll: f64) -> f64 {
        let span = self.end - self.start;
        if span.is_nan() || span <= 0.0 {
            return if scroll >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Length with an optional percentage unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// Absolute pixels.
    Px(f64),
    /// Percentage of the reference extent.
    Percent(f64),
}

impl Length {
    fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => extent * p / 100.0,
        }
    }

    fn parse(s: &str) -> ScrollFxResult<Self> {
        let bad = || ScrollFxError::trigger(format!("invalid length '{s}'"));
        let (num, pct) = if let Some(n) = s.strip_suffix('%') {
            (n, true)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, false)
        } else {
            (s, false)
        };
        let v: f64 = num.trim().parse().map_err(|_| bad())?;
        if !v.is_finite() {
            return Err(bad());
        }
        Ok(if pct { Self::Percent(v) } else { Self::Px(v) })
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Reference point along one vertical extent (element or viewport).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnchorBase {
    /// Top edge.
    Top,
    /// Vertical middle.
    Center,
    /// Bottom edge.
    Bottom,
    /// Explicit distance from the top edge.
    At(Length),
}

/// Anchor base plus optional relative adjustment (`+=`/`-=`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Base point.
    pub base: AnchorBase,
    /// Signed adjustment added to the base.
    pub adjust: Option<(f64, Length)>,
}

impl Anchor {
    /// Distance from the top of an extent of size `extent`.
    pub fn resolve(&self, extent: f64) -> f64 {
        let base = match self.base {
            AnchorBase::Top => 0.0,
            AnchorBase::Center => extent / 2.0,
            AnchorBase::Bottom => extent,
            AnchorBase::At(len) => len.resolve(extent),
        };
        match self.adjust {
            Some((sign, len)) => base + sign * len.resolve(extent),
            None => base,
        }
    }

    fn parse(token: &str) -> ScrollFxResult<Self> {
        let (base_str, adjust) = match token.find("+=").or_else(|| token.find("-=")) {
            Some(i) => {
                let sign = if token[i..].starts_with('+') { 1.0 } else { -1.0 };
                let len = Length::parse(&token[i + 2..])?;
                (&token[..i], Some((sign, len)))
            }
            None => (token, None),
        };
        let base = match base_str {
            "top" => AnchorBase::Top,
            "center" => AnchorBase::Center,
            "bottom" => AnchorBase::Bottom,
            "" => return Err(ScrollFxError::trigger(format!("missing anchor in '{token}'"))),
            other => AnchorBase::At(Length::parse(other)?),
        };
        Ok(Self { base, adjust })
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base {
            AnchorBase::Top => f.write_str("top")?,
            AnchorBase::Center => f.write_str("center")?,
            AnchorBase::Bottom => f.write_str("bottom")?,
            AnchorBase::At(len) => write!(f, "{len}")?,
        }
        if let Some((sign, len)) = self.adjust {
            let op = if sign < 0.0 { "-=" } else { "+=" };
            write!(f, "{op}{len}")?;
        }
        Ok(())
    }
}

/// Scroll trigger position: `"<element-anchor> <viewport-anchor>"`.
///
/// The trigger fires when the element anchor (percentages relative to element height) meets
/// the viewport anchor (percentages relative to viewport height). Examples: `"top top"`,
/// `"bottom top"`, `"center-=30% center"`, `"top 80%"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerPos {
    /// Point on the trigger element.
    pub element: Anchor,
    /// Point on the viewport.
    pub viewport: Anchor,
}

impl TriggerPos {
    /// Scroll position at which the two anchors coincide.
    pub fn scroll_offset(&self, rect: Rect, viewport: Viewport) -> f64 {
        rect.y0 + self.element.resolve(rect.height()) - self.viewport.resolve(viewport.height)
    }
}

impl std::str::FromStr for TriggerPos {
    type Err = ScrollFxError;

    fn from_str(s: &str) -> ScrollFxResult<Self> {
        let mut parts = s.split_whitespace();
        let (Some(el), Some(vp), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ScrollFxError::trigger(format!(
                "expected '<element> <viewport>' in '{s}'"
            )));
        };
        Ok(Self {
            element: Anchor::parse(el)?,
            viewport: Anchor::parse(vp)?,
        })
    }
}

impl fmt::Display for TriggerPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/region.rs"]
mod tests;
