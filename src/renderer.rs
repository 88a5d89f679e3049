use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::entities::{Character, Facing, Platform, Projectile};
use crate::world::{ARENA_HEIGHT, ARENA_WIDTH, Outcome};

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub player: &'a Character,
    pub enemy: &'a Character,
    pub player_shots: &'a [Projectile],
    pub enemy_shots: &'a [Projectile],
    pub platforms: &'a [Platform],
    pub outcome: Option<Outcome>,
    pub area: Rect,
}

const HEALTH_SEGMENTS: u16 = 20;
const SPRITE_WIDTH: u16 = 6;
const SPRITE_HEIGHT: u16 = 3;

const MUSHMUSH_RIGHT: [&str; 3] = [" .--. ", "( oo)>", " |__| "];
const MUSHMUSH_LEFT: [&str; 3] = [" .--. ", "<(oo )", " |__| "];
const GROOOOOOM_RIGHT: [&str; 3] = ["[====]", "|o  o>", "[====]"];
const GROOOOOOM_LEFT: [&str; 3] = ["[====]", "<o  o|", "[====]"];

/// Lit segments for a given health: one per five points, rounded up, so
/// any sliver of remaining health still shows one segment.
fn filled_segments(health: i32) -> u16 {
    let health = health.clamp(0, 100) as u32;
    (health * HEALTH_SEGMENTS as u32).div_ceil(100) as u16
}

fn bar_color(health: i32) -> Color {
    if health > 50 {
        Color::Green
    } else if health > 25 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Arena x to a cell column relative to the drawn area.
fn cell_x(area: Rect, x: f32) -> i32 {
    (x / ARENA_WIDTH * area.width as f32).floor() as i32
}

/// Arena y to a cell row relative to the drawn area.
fn cell_y(area: Rect, y: f32) -> i32 {
    (y / ARENA_HEIGHT * area.height as f32).floor() as i32
}

/// Backdrop art resampled to the terminal grid, two vertically stacked
/// pixels per cell, drawn with the upper-half block.
struct Backdrop {
    source: image::DynamicImage,
    cells: Vec<(Color, Color)>,
    size: (u16, u16),
}

impl Backdrop {
    const PATH: &'static str = "assets/backdrop.png";

    fn load() -> Option<Self> {
        match image::open(Self::PATH) {
            Ok(source) => Some(Self {
                source,
                cells: Vec::new(),
                size: (0, 0),
            }),
            Err(err) => {
                eprintln!("Warning: no backdrop art at {}: {}", Self::PATH, err);
                eprintln!("Continuing with the procedural sky...");
                None
            }
        }
    }

    /// Resample to the current cell grid. Cached until the terminal
    /// resizes.
    fn resample(&mut self, width: u16, height: u16) {
        if self.size == (width, height) || width == 0 || height == 0 {
            return;
        }
        let rgb = self
            .source
            .resize_exact(
                width as u32,
                height as u32 * 2,
                image::imageops::FilterType::Triangle,
            )
            .to_rgb8();

        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height as u32 {
            for col in 0..width as u32 {
                let upper = rgb.get_pixel(col, row * 2);
                let lower = rgb.get_pixel(col, row * 2 + 1);
                cells.push((
                    Color::Rgb(upper[0], upper[1], upper[2]),
                    Color::Rgb(lower[0], lower[1], lower[2]),
                ));
            }
        }
        self.cells = cells;
        self.size = (width, height);
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    backdrop: Option<Backdrop>,
}

impl GameRenderer {
    /// Creates a new GameRenderer, loading optional backdrop art. Missing
    /// art never fails a frame; it only changes what the sky looks like.
    pub fn new() -> Self {
        Self {
            backdrop: Backdrop::load(),
        }
    }

    /// Main render method; the end screen is an overlay on the frozen
    /// final frame.
    pub fn render(&mut self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        if let Some(outcome) = view.outcome {
            self.render_session_end(frame, view, outcome);
        }
    }

    fn render_game(&mut self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        if area.width == 0 || area.height == 0 {
            return;
        }

        self.render_backdrop(frame, area);
        self.render_platforms(frame, view);

        let player_sprite = match view.player.facing {
            Facing::Right => &MUSHMUSH_RIGHT,
            Facing::Left => &MUSHMUSH_LEFT,
        };
        Self::render_character(frame, area, view.player, player_sprite, Color::Green);

        let enemy_sprite = match view.enemy.facing {
            Facing::Right => &GROOOOOOM_RIGHT,
            Facing::Left => &GROOOOOOM_LEFT,
        };
        Self::render_character(frame, area, view.enemy, enemy_sprite, Color::Red);

        Self::render_shots(frame, area, view.player_shots, "o", Color::Yellow);
        Self::render_shots(frame, area, view.enemy_shots, "-", Color::LightRed);

        Self::render_health(frame, area, view.player, false);
        Self::render_health(frame, area, view.enemy, true);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D: Move] [W: Jump] [Space: Fire] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_backdrop(&mut self, frame: &mut Frame, area: Rect) {
        let buffer = frame.buffer_mut();
        match self.backdrop.as_mut() {
            Some(backdrop) => {
                backdrop.resample(area.width, area.height);
                for row in 0..area.height {
                    for col in 0..area.width {
                        let (upper, lower) =
                            backdrop.cells[(row as usize) * area.width as usize + col as usize];
                        buffer.set_string(
                            area.x + col,
                            area.y + row,
                            "▀",
                            Style::default().fg(upper).bg(lower),
                        );
                    }
                }
            }
            None => {
                // Dusk gradient, darkest at the top
                let blank = " ".repeat(area.width as usize);
                for row in 0..area.height {
                    let t = row as f32 / area.height.max(1) as f32;
                    let sky = Color::Rgb(
                        15 + (45.0 * t) as u8,
                        18 + (36.0 * t) as u8,
                        52 + (68.0 * t) as u8,
                    );
                    buffer.set_string(area.x, area.y + row, &blank, Style::default().bg(sky));
                }
            }
        }
    }

    fn render_platforms(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let buffer = frame.buffer_mut();
        for platform in view.platforms {
            let x0 = cell_x(area, platform.x).max(0);
            let x1 = cell_x(area, platform.x + platform.width).min(area.width as i32);
            let y0 = cell_y(area, platform.y).max(0);
            if x1 <= x0 || y0 >= area.height as i32 {
                continue;
            }
            let y1 = cell_y(area, platform.y + platform.height)
                .clamp(y0 + 1, area.height as i32);

            let tiles = "▒".repeat((x1 - x0) as usize);
            for row in y0..y1 {
                buffer.set_string(
                    area.x + x0 as u16,
                    area.y + row as u16,
                    &tiles,
                    Style::default().fg(Color::Rgb(110, 82, 46)).bg(Color::Rgb(52, 38, 22)),
                );
            }
        }
    }

    /// Sprites are anchored feet-down at the character's bottom center, so
    /// they visibly stand on the platform tiles at any terminal size.
    fn render_character(
        frame: &mut Frame,
        area: Rect,
        character: &Character,
        sprite: &[&'static str; 3],
        color: Color,
    ) {
        let col = cell_x(area, character.x + character.width / 2.0) - SPRITE_WIDTH as i32 / 2;
        let row = cell_y(area, character.bottom()) - SPRITE_HEIGHT as i32;
        if col < 0
            || row < 0
            || col + SPRITE_WIDTH as i32 > area.width as i32
            || row + SPRITE_HEIGHT as i32 > area.height as i32
        {
            return;
        }

        let text: Vec<Line> = sprite
            .iter()
            .map(|line| {
                Line::from(*line).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            })
            .collect();
        let sprite_area = Rect {
            x: area.x + col as u16,
            y: area.y + row as u16,
            width: SPRITE_WIDTH,
            height: SPRITE_HEIGHT,
        };
        frame.render_widget(Paragraph::new(text), sprite_area);
    }

    fn render_shots(
        frame: &mut Frame,
        area: Rect,
        shots: &[Projectile],
        symbol: &str,
        color: Color,
    ) {
        let buffer = frame.buffer_mut();
        for shot in shots {
            let col = cell_x(area, shot.x + shot.width / 2.0);
            let row = cell_y(area, shot.y + shot.height / 2.0);
            if col >= 0 && row >= 0 && col < area.width as i32 && row < area.height as i32 {
                buffer.set_string(
                    area.x + col as u16,
                    area.y + row as u16,
                    symbol,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }
    }

    /// Name label over a 20-segment bar; the player's sits top-left, the
    /// enemy's top-right.
    fn render_health(frame: &mut Frame, area: Rect, character: &Character, right_aligned: bool) {
        if area.width < HEALTH_SEGMENTS + 2 || area.height < 3 {
            return;
        }
        let x = if right_aligned {
            area.x + area.width - HEALTH_SEGMENTS - 1
        } else {
            area.x + 1
        };

        let name = Line::from(Span::styled(
            character.name,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
        let alignment = if right_aligned {
            Alignment::Right
        } else {
            Alignment::Left
        };
        let name_area = Rect {
            x,
            y: area.y,
            width: HEALTH_SEGMENTS,
            height: 1,
        };
        frame.render_widget(Paragraph::new(name).alignment(alignment), name_area);

        let filled = filled_segments(character.health);
        let bar = Line::from(vec![
            Span::styled(
                "█".repeat(filled as usize),
                Style::default().fg(bar_color(character.health)),
            ),
            Span::styled(
                "░".repeat((HEALTH_SEGMENTS - filled) as usize),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let bar_area = Rect {
            x,
            y: area.y + 1,
            width: HEALTH_SEGMENTS,
            height: 1,
        };
        frame.render_widget(Paragraph::new(bar), bar_area);
    }

    fn render_session_end(&self, frame: &mut Frame, view: &RenderView, outcome: Outcome) {
        let area = view.area;
        let title = match outcome {
            Outcome::Win => Line::from("YOU WIN!").centered().bold().green(),
            Outcome::Loss => Line::from("YOU LOSE!").centered().bold().red(),
        };
        let text = vec![
            Line::from(""),
            title,
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        let box_area = Rect {
            x: area.x + area.width.saturating_sub(31) / 2,
            y: area.y + area.height.saturating_sub(7) / 2,
            width: 31.min(area.width),
            height: 7.min(area.height),
        };
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::White)),
                )
                .alignment(Alignment::Center),
            box_area,
        );
    }
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}
