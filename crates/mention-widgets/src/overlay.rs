#![forbid(unsafe_code)]

//! Suggestion-list overlay placement.
//!
//! The suggestion list floats next to the trigger span's on-screen location.
//! Placement prefers below the span, flips above when there isn't enough
//! space, and hides entirely when a constrained container cannot fit the
//! list either way. The list is never rendered off-screen and never covers
//! the text being typed directly above the caret.
//!
//! This is pure geometry over host-supplied measurements: the composer never
//! reads layout itself. An absent measurement is an empty [`Rect`], which is
//! simply ignored.

use mention_core::{Rect, Size};

/// Placement of a suggestion overlay relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Below the anchor, the preferred side.
    Below,
    /// Above the anchor, used when below would overflow.
    Above,
}

/// Computes where the suggestion list goes.
///
/// Built once per layout pass from the trigger span's rectangle and the
/// measured size of the list, then refined with the viewport and the active
/// scroll container if there is one.
#[derive(Debug, Clone)]
pub struct SuggestionOverlay {
    /// On-screen rectangle of the trigger span.
    anchor: Rect,
    /// Measured size of the suggestion list.
    size: Size,
    /// Viewport size; the overlay must stay inside it.
    viewport: Size,
    /// Active scrollable container, if the composer sits inside one.
    container: Option<Rect>,
    /// Vertical gap between the anchor and the overlay.
    gap: f32,
}

impl SuggestionOverlay {
    /// Create an overlay computation for the given anchor and list size.
    #[must_use]
    pub fn new(anchor: Rect, size: Size) -> Self {
        Self {
            anchor,
            size,
            viewport: Size::ZERO,
            container: None,
            gap: 0.0,
        }
    }

    /// Set the viewport size.
    #[must_use]
    pub fn viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Constrain the overlay to a scrollable container.
    ///
    /// An empty rectangle (a missing measurement) is ignored.
    #[must_use]
    pub fn container(mut self, container: Rect) -> Self {
        self.container = (!container.is_empty()).then_some(container);
        self
    }

    /// Set the vertical gap between anchor and overlay.
    #[must_use]
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Compute the overlay rectangle, or `None` when it must stay hidden.
    #[must_use]
    pub fn compute(&self) -> Option<Rect> {
        self.compute_placed().map(|(rect, _)| rect)
    }

    /// Like [`compute`](Self::compute), also reporting which side was used.
    #[must_use]
    pub fn compute_placed(&self) -> Option<(Rect, Placement)> {
        if self.size.is_empty() {
            return None;
        }

        let vp = Rect::from_size(self.viewport);
        let (top_bound, bottom_bound) = match &self.container {
            Some(c) => (c.top().max(vp.top()), c.bottom().min(vp.bottom())),
            None => (vp.top(), vp.bottom()),
        };

        let below = self.anchor.bottom() + self.gap;
        let (y, placement) = if below + self.size.height <= bottom_bound {
            (below, Placement::Below)
        } else {
            // Flip above the anchor; above it sits flush, never covering the
            // line being typed.
            let above = self.anchor.top() - self.gap - self.size.height;
            if above >= top_bound {
                (above, Placement::Above)
            } else {
                return None;
            }
        };

        let right_bound = match &self.container {
            Some(c) => c.right().min(vp.right()),
            None => vp.right(),
        };
        let mut x = self.anchor.left();
        if x + self.size.width > right_bound {
            // Right-align to the anchor instead of spilling past the edge.
            x = self.anchor.right() - self.size.width;
        }
        if x < vp.left() {
            x = vp.left();
        }

        Some((
            Rect::new(x, y, self.size.width, self.size.height),
            placement,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800.0, 600.0);

    fn overlay(anchor: Rect) -> SuggestionOverlay {
        SuggestionOverlay::new(anchor, Size::new(200.0, 120.0)).viewport(VIEWPORT)
    }

    #[test]
    fn prefers_below_the_anchor() {
        let anchor = Rect::new(100.0, 50.0, 40.0, 16.0);
        let (rect, placement) = overlay(anchor).compute_placed().expect("placed");
        assert_eq!(placement, Placement::Below);
        assert_eq!(rect, Rect::new(100.0, 66.0, 200.0, 120.0));
    }

    #[test]
    fn gap_offsets_below_placement() {
        let anchor = Rect::new(100.0, 50.0, 40.0, 16.0);
        let rect = overlay(anchor).gap(8.0).compute().expect("placed");
        assert_eq!(rect.y, 74.0);
    }

    #[test]
    fn flips_above_near_viewport_bottom() {
        let anchor = Rect::new(100.0, 560.0, 40.0, 16.0);
        let (rect, placement) = overlay(anchor).compute_placed().expect("placed");
        assert_eq!(placement, Placement::Above);
        assert_eq!(rect.bottom(), anchor.top());
        assert!(rect.y >= 0.0);
    }

    #[test]
    fn flips_above_when_container_bottom_is_closer() {
        let anchor = Rect::new(100.0, 200.0, 40.0, 16.0);
        let container = Rect::new(0.0, 0.0, 800.0, 280.0);
        let (_, placement) = overlay(anchor)
            .container(container)
            .compute_placed()
            .expect("placed");
        assert_eq!(placement, Placement::Above);
    }

    #[test]
    fn hides_when_container_fits_neither_side() {
        // Anchor near the top of a short container: no room below, no room
        // above, and flipping cannot resolve it.
        let anchor = Rect::new(100.0, 40.0, 40.0, 16.0);
        let container = Rect::new(0.0, 20.0, 800.0, 100.0);
        assert!(overlay(anchor).container(container).compute().is_none());
    }

    #[test]
    fn hides_when_viewport_fits_neither_side() {
        let anchor = Rect::new(100.0, 40.0, 40.0, 16.0);
        let tight = SuggestionOverlay::new(anchor, Size::new(200.0, 120.0))
            .viewport(Size::new(800.0, 100.0));
        assert!(tight.compute().is_none());
    }

    #[test]
    fn right_aligns_at_the_right_edge() {
        let anchor = Rect::new(700.0, 50.0, 60.0, 16.0);
        let rect = overlay(anchor).compute().expect("placed");
        assert_eq!(rect.right(), anchor.right());
        assert!(rect.right() <= VIEWPORT.width);
    }

    #[test]
    fn never_leaves_the_left_edge() {
        let anchor = Rect::new(10.0, 50.0, 20.0, 16.0);
        let narrow = Rect::new(0.0, 0.0, 100.0, 600.0);
        let rect = overlay(anchor).container(narrow).compute().expect("placed");
        assert_eq!(rect.x, 0.0);
    }

    #[test]
    fn empty_list_size_is_hidden() {
        let anchor = Rect::new(100.0, 50.0, 40.0, 16.0);
        let o = SuggestionOverlay::new(anchor, Size::ZERO).viewport(VIEWPORT);
        assert!(o.compute().is_none());
    }

    #[test]
    fn empty_container_measurement_is_ignored() {
        let anchor = Rect::new(100.0, 50.0, 40.0, 16.0);
        let rect = overlay(anchor).container(Rect::ZERO).compute();
        assert!(rect.is_some());
    }

    #[test]
    fn zero_viewport_hides_everything() {
        // All measurements missing: nothing sensible to place against.
        let o = SuggestionOverlay::new(Rect::ZERO, Size::new(200.0, 120.0));
        assert!(o.compute().is_none());
    }
}
