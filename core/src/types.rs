use serde::{Deserialize, Serialize};

/// Position in scene space: origin at the bottom-left corner, y grows upwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// Axis-aligned rectangle described by its center, matching how nodes are anchored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    pub center: Point,
    pub size: Size,
}

impl Frame {
    pub const fn new(center: Point, size: Size) -> Self {
        Self { center, size }
    }

    pub fn contains(&self, point: Point) -> bool {
        let half_width = self.size.width / 2.0;
        let half_height = self.size.height / 2.0;
        point.x >= self.center.x - half_width
            && point.x <= self.center.x + half_width
            && point.y >= self.center.y - half_height
            && point.y <= self.center.y + half_height
    }
}
