//! src/scroll/edge.rs
//! ============================================================================
//! # ScrollEdgeDetector: Direction-Aware Edge Callbacks
//!
//! Fires a callback when a scrollable element nears its bottom (or top)
//! bound while moving toward it. The detector is a disposable subscription:
//! whatever owns the element feeds it [`ScrollFrame`]s and calls
//! [`ScrollEdgeDetector::unbind`] when done. Each detector owns its own
//! direction/offset state; detectors never share state.

/// One sampled scroll event from whatever owns the scrollable element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    pub offset: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Down,
    Up,
}

pub type EdgeCallback = Box<dyn FnMut() + Send>;

pub struct ScrollEdgeDetector {
    bottom_margin: f64,
    top_margin: f64,
    on_bottom: EdgeCallback,
    /// Absent means the top edge is simply not watched.
    on_top: Option<EdgeCallback>,
    last_offset: f64,
    last_direction: ScrollDirection,
    bound: bool,
}

impl ScrollEdgeDetector {
    /// Binds a detector with pixel margins for each edge. The element
    /// starts at the top, so the initial direction is `Up`.
    pub fn bind(
        bottom_margin: f64,
        top_margin: f64,
        on_bottom: impl FnMut() + Send + 'static,
        on_top: Option<EdgeCallback>,
    ) -> Self {
        Self {
            bottom_margin,
            top_margin,
            on_bottom: Box::new(on_bottom),
            on_top,
            last_offset: 0.0,
            last_direction: ScrollDirection::Up,
            bound: true,
        }
    }

    /// Feed one scroll event. Moving down within `bottom_margin` px of the
    /// true bottom fires the bottom callback; moving up within
    /// `top_margin` px of the top fires the top callback, if one was
    /// supplied.
    pub fn on_scroll(&mut self, frame: ScrollFrame) {
        if !self.bound {
            return;
        }

        let direction = if frame.offset > self.last_offset {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };

        match direction {
            ScrollDirection::Down => {
                let bottom_edge = frame.scroll_height - frame.client_height - self.bottom_margin;
                if frame.offset >= bottom_edge {
                    (self.on_bottom)();
                }
            }
            ScrollDirection::Up => {
                if frame.offset <= self.top_margin
                    && let Some(on_top) = self.on_top.as_mut()
                {
                    on_top();
                }
            }
        }

        self.last_offset = frame.offset;
        self.last_direction = direction;
    }

    pub fn last_direction(&self) -> ScrollDirection {
        self.last_direction
    }

    /// Detach the detector; further frames are no-ops.
    pub fn unbind(&mut self) {
        self.bound = false;
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }
}
