// src/utils/geometry.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn translated(&self, delta: &Vector2D) -> Point2D {
        Point2D::new(self.x + delta.x, self.y + delta.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Vector2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Axis-aligned rectangle: origin (top-left corner) plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: &Point2D) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn translate(&mut self, delta: &Vector2D) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_distance_between_points() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_approx_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 160.0, 75.0);
        let center = rect.center();
        assert_approx_eq!(center.x, 90.0);
        assert_approx_eq!(center.y, 57.5);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(rect.contains(&Point2D::new(50.0, 25.0)));
        assert!(rect.contains(&Point2D::new(0.0, 0.0)));
        assert!(!rect.contains(&Point2D::new(101.0, 25.0)));
        assert!(!rect.contains(&Point2D::new(50.0, -1.0)));
    }

    #[test]
    fn test_rect_translate() {
        let mut rect = Rect::new(5.0, 5.0, 10.0, 10.0);
        rect.translate(&Vector2D::new(-5.0, 15.0));
        assert_approx_eq!(rect.x, 0.0);
        assert_approx_eq!(rect.y, 20.0);
        assert_approx_eq!(rect.width, 10.0);
    }

    #[test]
    fn test_point_translated() {
        let p = Point2D::new(1.0, 2.0).translated(&Vector2D::new(2.0, -2.0));
        assert_approx_eq!(p.x, 3.0);
        assert_approx_eq!(p.y, 0.0);
    }

    #[test]
    fn test_vector_accumulation() {
        let mut acc = Vector2D::default();
        acc += Vector2D::new(3.0, 0.0);
        acc += Vector2D::new(0.0, 4.0);
        assert_approx_eq!(acc.length(), 5.0);
    }
}
