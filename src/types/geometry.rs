use serde::{Deserialize, Serialize};

/// Integer rectangle in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin with the given size.
    pub fn of_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }
}
