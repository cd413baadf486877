use serde::{Deserialize, Serialize};

/// A point in the desktop-wide coordinate space spanning all monitors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalPoint {
    pub x: i32,
    pub y: i32,
}

impl GlobalPoint {
    pub fn at_coordinates(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A point relative to one display's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalPoint {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: GlobalPoint) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width as i32
            && point.y < self.y + self.height as i32
    }

    /// Pure coordinate subtraction; only meaningful when `self` contains the
    /// point, which the caller is responsible for checking.
    pub fn to_local(&self, point: GlobalPoint) -> LocalPoint {
        LocalPoint {
            x: point.x - self.x,
            y: point.y - self.y,
        }
    }
}

/// Immutable snapshot of one physical display taken at enumeration time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayDescriptor {
    pub id: u32,
    pub bounds: ScreenRect,
}

impl DisplayDescriptor {
    pub fn with_bounds(id: u32, bounds: ScreenRect) -> Self {
        Self { id, bounds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_inside_bounds() {
        let bounds = ScreenRect::new(1920, 0, 1920, 1080);

        assert!(bounds.contains(GlobalPoint::at_coordinates(1920, 0)));
        assert!(bounds.contains(GlobalPoint::at_coordinates(3000, 500)));
        assert!(bounds.contains(GlobalPoint::at_coordinates(3839, 1079)));
    }

    #[test]
    fn test_contains_excludes_right_and_bottom_edges() {
        let bounds = ScreenRect::new(0, 0, 1920, 1080);

        assert!(!bounds.contains(GlobalPoint::at_coordinates(1920, 500)));
        assert!(!bounds.contains(GlobalPoint::at_coordinates(500, 1080)));
    }

    #[test]
    fn test_contains_rejects_points_before_origin() {
        let bounds = ScreenRect::new(100, 100, 800, 600);

        assert!(!bounds.contains(GlobalPoint::at_coordinates(99, 300)));
        assert!(!bounds.contains(GlobalPoint::at_coordinates(300, 99)));
    }

    #[test]
    fn test_to_local_subtracts_display_origin() {
        let bounds = ScreenRect::new(1920, 200, 1920, 1080);
        let local = bounds.to_local(GlobalPoint::at_coordinates(2000, 250));

        assert_eq!(local, LocalPoint { x: 80, y: 50 });
    }

    #[test]
    fn test_to_local_round_trips_through_origin() {
        let bounds = ScreenRect::new(-1920, -80, 1920, 1080);
        let global = GlobalPoint::at_coordinates(-100, 400);
        let local = bounds.to_local(global);

        assert_eq!(local.x + bounds.x, global.x);
        assert_eq!(local.y + bounds.y, global.y);
    }

    #[test]
    fn test_contains_handles_negative_origin_displays() {
        let bounds = ScreenRect::new(-1920, 0, 1920, 1080);

        assert!(bounds.contains(GlobalPoint::at_coordinates(-1, 500)));
        assert!(!bounds.contains(GlobalPoint::at_coordinates(0, 500)));
    }
}
