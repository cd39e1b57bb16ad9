use super::bounds::Bounds;

pub const ENEMY_WIDTH: f32 = 40.0;
pub const ENEMY_HEIGHT: f32 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            speed,
        }
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    /// True once the right edge has passed the left side of the screen
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        vec![" /=\\ ", "<(o)<", " \\=/ "]
    }
}
