use super::bounds::Bounds;

pub const BULLET_WIDTH: f32 = 20.0;
pub const BULLET_HEIGHT: f32 = 10.0;

/// A player shot travelling to the right
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Bullet {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            speed,
        }
    }

    pub fn update(&mut self) {
        self.x += self.speed;
    }

    pub fn is_out_of_bounds(&self, screen_width: f32) -> bool {
        self.x > screen_width
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}
