use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::entities::{Bounds, ENEMY_HEIGHT, ENEMY_WIDTH, GameState};
use crate::world::Snapshot;

/// Maps world coordinates onto terminal cells of the playfield
#[derive(Debug, Clone, Copy)]
struct Viewport {
    area: Rect,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(area: Rect, world_width: f32, world_height: f32) -> Self {
        Self {
            area,
            scale_x: area.width as f32 / world_width,
            scale_y: area.height as f32 / world_height,
        }
    }

    /// Projects a world box onto the playfield, clipped. None if fully outside.
    fn project(&self, bounds: Bounds) -> Option<Rect> {
        let left = (bounds.x * self.scale_x).floor();
        let top = (bounds.y * self.scale_y).floor();
        let right = (bounds.right() * self.scale_x).ceil().max(left + 1.0);
        let bottom = (bounds.bottom() * self.scale_y).ceil().max(top + 1.0);

        let left = left.max(0.0);
        let top = top.max(0.0);
        let right = right.min(self.area.width as f32);
        let bottom = bottom.min(self.area.height as f32);
        if left >= right || top >= bottom {
            return None;
        }

        Some(Rect {
            x: self.area.x + left as u16,
            y: self.area.y + top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer {}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Draws the playfield, then the overlay for the current state
    pub fn render(&self, frame: &mut Frame, view: &Snapshot) {
        self.render_game(frame, view);

        match view.state {
            GameState::Running => {}
            GameState::Idle => self.render_overlay(
                frame,
                vec![
                    Line::from(""),
                    Line::from("Press ENTER to Start").centered().bold().yellow(),
                ],
                Color::Yellow,
            ),
            GameState::Paused => self.render_overlay(
                frame,
                vec![
                    Line::from(""),
                    Line::from("PAUSED").centered().bold().yellow(),
                    Line::from(""),
                    Line::from("Press P to resume").centered().white(),
                ],
                Color::Yellow,
            ),
            GameState::GameOver => self.render_overlay(
                frame,
                vec![
                    Line::from(""),
                    Line::from("GAME OVER").centered().bold().red(),
                    Line::from(""),
                    Line::from(format!("Final Score: {}", view.score))
                        .centered()
                        .yellow()
                        .bold(),
                    Line::from(""),
                    Line::from("Press ENTER to Restart").centered().yellow(),
                ],
                Color::Red,
            ),
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &Snapshot) {
        let area = frame.area();
        if area.height < 3 || area.width < 3 {
            return;
        }

        // One row for the HUD on top, one for the controls hint at the bottom
        let field = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        };
        let viewport = Viewport::new(field, view.screen_width, view.screen_height);
        let buffer = frame.buffer_mut();

        render_stars(buffer, field, view);

        for explosion in view.explosions {
            // Explosions cover the enemy they replaced
            let bounds = Bounds::new(explosion.x, explosion.y, ENEMY_WIDTH, ENEMY_HEIGHT);
            if let Some(rect) = viewport.project(bounds) {
                let color = if explosion.timer > 13 {
                    Color::Yellow
                } else if explosion.timer > 6 {
                    Color::LightRed
                } else {
                    Color::Red
                };
                fill(
                    buffer,
                    rect,
                    explosion.get_char(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }

        for enemy in view.enemies {
            if let Some(rect) = viewport.project(enemy.bounds()) {
                draw_sprite(
                    buffer,
                    rect,
                    &enemy.get_sprite_lines(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                );
            }
        }

        for bullet in view.bullets {
            if let Some(rect) = viewport.project(bullet.bounds()) {
                fill(buffer, rect, '-', Style::default().fg(Color::Yellow));
            }
        }

        if let Some(rect) = viewport.project(view.player.bounds()) {
            draw_sprite(
                buffer,
                rect,
                &view.player.get_sprite_lines(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            );
        }

        // Stats overlay at the top
        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        let score = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let lives = Line::from(vec![
            Span::styled("Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.player.lives),
                if view.player.lives > 1 {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                },
            ),
        ]);
        frame.render_widget(Paragraph::new(score), stats_area);
        frame.render_widget(Paragraph::new(lives).right_aligned(), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[W/S/Arrows: Move] [Space: Fire] [P: Pause] [Enter: Start] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height - 1,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Centered boxed message on top of the playfield
    fn render_overlay(&self, frame: &mut Frame, text: Vec<Line>, border: Color) {
        let area = frame.area();
        let width = 34.min(area.width);
        let height = (text.len() as u16 + 3).min(area.height);
        let overlay_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, overlay_area);
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border)),
                )
                .alignment(Alignment::Center),
            overlay_area,
        );
    }
}

/// Star field tiled once per screen width and shifted by the background offset
fn render_stars(buffer: &mut Buffer, field: Rect, view: &Snapshot) {
    let cells_per_unit = field.width as f32 / view.screen_width;
    let shift = (-view.background_x * cells_per_unit) as i64;
    let width = field.width as i64;
    let style = Style::default().fg(Color::DarkGray);

    for row in 0..field.height {
        for col in 0..field.width {
            let tile_col = (col as i64 + shift).rem_euclid(width.max(1)) as u64;
            let seed = tile_col.wrapping_mul(73_856_093) ^ (row as u64).wrapping_mul(19_349_663);
            if seed % 37 == 0 {
                buffer.set_string(field.x + col, field.y + row, ".", style);
            }
        }
    }
}

fn fill(buffer: &mut Buffer, rect: Rect, ch: char, style: Style) {
    let line: String = std::iter::repeat_n(ch, rect.width as usize).collect();
    for row in 0..rect.height {
        buffer.set_string(rect.x, rect.y + row, &line, style);
    }
}

/// Writes sprite lines into the rect, cropped to fit
fn draw_sprite(buffer: &mut Buffer, rect: Rect, lines: &[&str], style: Style) {
    for (row, line) in lines.iter().take(rect.height as usize).enumerate() {
        let cropped: String = line.chars().take(rect.width as usize).collect();
        buffer.set_string(rect.x, rect.y + row as u16, cropped, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_scales_to_cells() {
        let viewport = Viewport::new(Rect::new(0, 1, 80, 20), 800.0, 400.0);
        let rect = viewport.project(Bounds::new(50.0, 100.0, 50.0, 50.0)).unwrap();
        assert_eq!(rect, Rect::new(5, 6, 5, 3));
    }

    #[test]
    fn test_viewport_clips_partially_visible() {
        let viewport = Viewport::new(Rect::new(0, 0, 80, 20), 800.0, 400.0);
        let rect = viewport.project(Bounds::new(-20.0, 0.0, 40.0, 40.0)).unwrap();
        assert_eq!(rect.x, 0);
        assert_eq!(rect.width, 2);
    }

    #[test]
    fn test_viewport_hides_offscreen() {
        let viewport = Viewport::new(Rect::new(0, 0, 80, 20), 800.0, 400.0);
        assert!(viewport.project(Bounds::new(-50.0, 0.0, 40.0, 40.0)).is_none());
        assert!(viewport.project(Bounds::new(808.0, 0.0, 20.0, 10.0)).is_none());
    }

    #[test]
    fn test_explosion_covers_enemy_footprint() {
        let viewport = Viewport::new(Rect::new(0, 0, 80, 20), 800.0, 400.0);
        let enemy = crate::entities::Enemy::new(200.0, 100.0, 2.5);
        let blast = Bounds::new(enemy.x, enemy.y, ENEMY_WIDTH, ENEMY_HEIGHT);
        assert_eq!(viewport.project(blast), viewport.project(enemy.bounds()));
    }

    #[test]
    fn test_tiny_entities_take_one_cell() {
        let viewport = Viewport::new(Rect::new(0, 0, 10, 10), 800.0, 400.0);
        let rect = viewport.project(Bounds::new(400.0, 200.0, 1.0, 1.0)).unwrap();
        assert_eq!(rect.width, 1);
        assert_eq!(rect.height, 1);
    }
}
