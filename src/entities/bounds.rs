/// Axis-aligned bounding box in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Open-interval overlap test: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let enemy = Bounds::new(0.0, 100.0, 40.0, 40.0);
        let bullet = Bounds::new(10.0, 105.0, 20.0, 10.0);
        assert!(enemy.intersects(&bullet));
        assert!(bullet.intersects(&enemy));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let right = Bounds::new(10.0, 0.0, 10.0, 10.0);
        let below = Bounds::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_contained_box_intersects() {
        let outer = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let inner = Bounds::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
    }

    #[test]
    fn test_far_apart_boxes() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(50.0, 50.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }
}
