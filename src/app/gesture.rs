// app/gesture.rs - Drag Selection Gesture
//
// Mouse-down anchors a corner, mouse-up finishes the rectangle.

use crate::capture::{CaptureRect, Point};

/// Progress of the rubber-band selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionGesture {
    /// Nothing selected yet
    #[default]
    Idle,
    /// Button held, `anchor` is where it went down
    Dragging { anchor: Point },
    /// Button released, selection is final
    Done(CaptureRect),
}

impl SelectionGesture {
    /// Button pressed at `at`. Starts a new selection unless one is already
    /// being dragged.
    pub fn press(&mut self, at: Point) {
        if !matches!(self, Self::Dragging { .. }) {
            *self = Self::Dragging { anchor: at };
        }
    }

    /// Button released at `at`. Returns the finished selection, if any.
    pub fn release(&mut self, at: Point) -> Option<CaptureRect> {
        let Self::Dragging { anchor } = *self else {
            return None;
        };
        let rect = CaptureRect::from_corners(anchor, at);
        if rect.is_empty() {
            *self = Self::Idle;
            None
        } else {
            *self = Self::Done(rect);
            Some(rect)
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Rectangle to draw with the cursor at `cursor`
    pub fn visible_rect(&self, cursor: Point) -> Option<CaptureRect> {
        match *self {
            Self::Idle => None,
            Self::Dragging { anchor } => Some(CaptureRect::from_corners(anchor, cursor)),
            Self::Done(rect) => Some(rect),
        }
    }

    /// The finished selection, if there is one
    pub fn selection(&self) -> Option<CaptureRect> {
        match *self {
            Self::Done(rect) => Some(rect),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_up_left_normalizes() {
        let mut gesture = SelectionGesture::default();
        gesture.press(Point::new(200, 150));
        assert_eq!(
            gesture.visible_rect(Point::new(100, 100)),
            Some(CaptureRect::new(100, 100, 100, 50))
        );
        let rect = gesture.release(Point::new(50, 50));
        assert_eq!(rect, Some(CaptureRect::new(50, 50, 150, 100)));
        assert_eq!(gesture.selection(), rect);
    }

    #[test]
    fn click_without_drag_selects_nothing() {
        let mut gesture = SelectionGesture::default();
        gesture.press(Point::new(10, 10));
        assert_eq!(gesture.release(Point::new(10, 40)), None);
        assert_eq!(gesture, SelectionGesture::Idle);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut gesture = SelectionGesture::default();
        assert_eq!(gesture.release(Point::new(5, 5)), None);
        assert_eq!(gesture.visible_rect(Point::new(5, 5)), None);
    }

    #[test]
    fn press_after_done_starts_over() {
        let mut gesture = SelectionGesture::Done(CaptureRect::new(0, 0, 10, 10));
        gesture.press(Point::new(30, 30));
        assert_eq!(gesture, SelectionGesture::Dragging { anchor: Point::new(30, 30) });
        assert_eq!(gesture.selection(), None);
    }

    #[test]
    fn second_press_keeps_original_anchor() {
        let mut gesture = SelectionGesture::default();
        gesture.press(Point::new(1, 1));
        gesture.press(Point::new(50, 50));
        assert_eq!(gesture.release(Point::new(11, 21)), Some(CaptureRect::new(1, 1, 10, 20)));
    }
}
