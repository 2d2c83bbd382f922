use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen units, bottom-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.bottom + self.height
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.bottom
            && point.y <= self.top()
    }

    /// Intersection with another rectangle. Empty intersections have zero size.
    pub fn intersect(&self, other: &Rectangle) -> Rectangle {
        let left = self.left.max(other.left);
        let bottom = self.bottom.max(other.bottom);
        let right = self.right().min(other.right());
        let top = self.top().min(other.top());
        Rectangle {
            left,
            bottom,
            width: (right - left).max(0.0),
            height: (top - bottom).max(0.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Euclidean distance from a point to the rectangle (0 inside)
    pub fn distance_to(&self, point: Vec2) -> f32 {
        let dx = (self.left - point.x).max(point.x - self.right()).max(0.0);
        let dy = (self.bottom - point.y).max(point.y - self.top()).max(0.0);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Which painting edges a resize drag moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeHandle {
    pub right: bool,
    pub top: bool,
}

impl ResizeHandle {
    /// Handle grabbed at `point`, if it lies within `radius` of the
    /// rectangle's right or top edge
    pub fn at(rect: &Rectangle, point: Vec2, radius: f32) -> Option<ResizeHandle> {
        let within_x = point.x >= rect.left - radius && point.x <= rect.right() + radius;
        let within_y = point.y >= rect.bottom - radius && point.y <= rect.top() + radius;
        let handle = ResizeHandle {
            right: within_y && (point.x - rect.right()).abs() <= radius,
            top: within_x && (point.y - rect.top()).abs() <= radius,
        };
        (handle.right || handle.top).then_some(handle)
    }
}

/// Current pointer interaction
///
/// Only `Painting` triggers splats; only `Resizing` uses the feathered
/// resize preview when compositing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Painting,
    /// Dragging the painting's right/top edge; `preview` is the rectangle
    /// that will be committed on release
    Resizing {
        preview: Rectangle,
        handle: ResizeHandle,
    },
    /// Dragging the painting around the canvas
    Panning { last: Vec2 },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    pub fn is_painting(&self) -> bool {
        matches!(self, Interaction::Painting)
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Interaction::Resizing { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Interaction::Panning { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_edges() {
        let rect = Rectangle::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.top(), 70.0);
        assert!(rect.contains(Vec2::new(50.0, 40.0)));
        assert!(!rect.contains(Vec2::new(5.0, 40.0)));
    }

    #[test]
    fn test_rectangle_intersect() {
        let a = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let b = Rectangle::new(50.0, -20.0, 100.0, 60.0);
        assert_eq!(a.intersect(&b), Rectangle::new(50.0, 0.0, 50.0, 40.0));

        let far = Rectangle::new(500.0, 500.0, 10.0, 10.0);
        assert!(a.intersect(&far).is_empty());
    }

    #[test]
    fn test_rectangle_distance() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(rect.distance_to(Vec2::new(5.0, 5.0)), 0.0);
        assert_eq!(rect.distance_to(Vec2::new(13.0, 5.0)), 3.0);
        assert!((rect.distance_to(Vec2::new(13.0, 14.0)) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_resize_handle_edges() {
        let rect = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let right = ResizeHandle::at(&rect, Vec2::new(95.0, 50.0), 20.0);
        assert_eq!(right, Some(ResizeHandle { right: true, top: false }));
        let corner = ResizeHandle::at(&rect, Vec2::new(110.0, 105.0), 20.0);
        assert_eq!(corner, Some(ResizeHandle { right: true, top: true }));
        assert_eq!(ResizeHandle::at(&rect, Vec2::new(50.0, 50.0), 20.0), None);
        // Level with the right edge but far below the painting
        assert_eq!(ResizeHandle::at(&rect, Vec2::new(100.0, -60.0), 20.0), None);
    }

    #[test]
    fn test_interaction_default_is_idle() {
        let interaction = Interaction::default();
        assert!(interaction.is_idle());
        assert!(!interaction.is_painting());
    }
}
