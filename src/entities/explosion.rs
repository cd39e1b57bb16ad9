/// Cosmetic blast left behind by a destroyed enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    /// Frames left before the explosion disappears
    pub timer: u32,
}

impl Explosion {
    pub fn new(x: f32, y: f32, timer: u32) -> Self {
        Self { x, y, timer }
    }

    pub fn update(&mut self) {
        self.timer = self.timer.saturating_sub(1);
    }

    pub fn is_done(&self) -> bool {
        self.timer == 0
    }

    /// Glyph used while the blast fades
    pub fn get_char(&self) -> char {
        if self.timer > 10 { '*' } else { 'o' }
    }
}
