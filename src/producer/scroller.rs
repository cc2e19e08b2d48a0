//! Deterministic CPU-rasterized side-scroller scene.
//!
//! A small jumping game rendered without a GPU: gradient columns scroll past
//! a square player that falls under gravity and jumps on queued input. Two
//! scenes constructed with the same size and fed the same inputs produce
//! byte-identical frames, which is what makes it usable as the demo producer
//! and as a fixture in the lifecycle tests.

use std::path::Path;

use anyhow::Context;
use image::{Rgba, RgbaImage};

use super::FrameProducer;

const DT: f32 = 1.0 / 60.0;
const SCROLL_SPEED: f32 = 100.0;
const GRAVITY: f32 = 10.0;
const JUMP_SPEED: f32 = -5.0;
const COLUMN_START: f32 = 500.0;
const COLUMN_SPACING: f32 = 250.0;
const COLUMN_WIDTH: f32 = 48.0;
const COLUMN_HEIGHT: f32 = 300.0;
const COLUMN_GAP: f32 = 200.0;
const COLUMN_PAIRS: usize = 50;

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const COLUMN_RED: Rgba<u8> = Rgba([230, 41, 55, 255]);
const PLAYER_PINK: Rgba<u8> = Rgba([255, 109, 194, 255]);

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl Rect {
    fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

pub struct ScrollerScene {
    width: u32,
    height: u32,
    camera_x: f32,
    player: Rect,
    player_y_speed: f32,
    columns: Vec<Rect>,
    jump_queued: bool,
    dead: bool,
}

impl ScrollerScene {
    pub fn new(width: u32, height: u32) -> Self {
        let mut columns = Vec::with_capacity(COLUMN_PAIRS * 2);
        for i in 0..COLUMN_PAIRS {
            let x = COLUMN_START + i as f32 * COLUMN_SPACING;
            let top_y = -110.0;
            columns.push(Rect {
                x,
                y: top_y,
                w: COLUMN_WIDTH,
                h: COLUMN_HEIGHT,
            });
            columns.push(Rect {
                x,
                y: top_y + COLUMN_HEIGHT + COLUMN_GAP,
                w: COLUMN_WIDTH,
                h: COLUMN_HEIGHT,
            });
        }
        Self {
            width,
            height,
            camera_x: 0.0,
            player: Rect {
                x: 50.0,
                y: 300.0 - 42.0,
                w: 42.0,
                h: 42.0,
            },
            player_y_speed: 0.0,
            columns,
            jump_queued: false,
            dead: false,
        }
    }

    /// Queue a jump for the next step (stands in for physical input).
    pub fn queue_jump(&mut self) {
        self.jump_queued = true;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Column pairs the player has fully scrolled past.
    pub fn columns_passed(&self) -> u32 {
        let passed = (self.player.x - COLUMN_START - COLUMN_WIDTH) / COLUMN_SPACING;
        if passed < 0.0 {
            0
        } else {
            passed as u32 + 1
        }
    }

    fn render(&self) -> RgbaImage {
        let mut frame = RgbaImage::from_pixel(self.width, self.height, BACKGROUND);
        for (i, column) in self.columns.iter().enumerate() {
            let flipped = i % 2 == 1;
            self.draw_gradient_column(&mut frame, column, flipped);
        }
        self.draw_rect(&mut frame, &self.player, PLAYER_PINK);
        frame
    }

    fn draw_gradient_column(&self, frame: &mut RgbaImage, column: &Rect, flipped: bool) {
        let x0 = column.x - self.camera_x;
        for row in 0..column.h as u32 {
            let mut t = row as f32 / column.h;
            if flipped {
                t = 1.0 - t;
            }
            let color = lerp_color(BACKGROUND, COLUMN_RED, t);
            let y = column.y + row as f32;
            if y < 0.0 || y >= self.height as f32 {
                continue;
            }
            for col in 0..column.w as u32 {
                let x = x0 + col as f32;
                if x < 0.0 || x >= self.width as f32 {
                    continue;
                }
                frame.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    fn draw_rect(&self, frame: &mut RgbaImage, rect: &Rect, color: Rgba<u8>) {
        let x0 = rect.x - self.camera_x;
        for row in 0..rect.h as u32 {
            let y = rect.y + row as f32;
            if y < 0.0 || y >= self.height as f32 {
                continue;
            }
            for col in 0..rect.w as u32 {
                let x = x0 + col as f32;
                if x < 0.0 || x >= self.width as f32 {
                    continue;
                }
                frame.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

impl FrameProducer for ScrollerScene {
    fn step(&mut self) -> anyhow::Result<()> {
        if self.dead {
            return Ok(());
        }

        let speed = SCROLL_SPEED * DT;
        self.camera_x += speed;

        self.player_y_speed += GRAVITY * DT;
        self.player.x += speed;
        self.player.y += self.player_y_speed;

        if std::mem::take(&mut self.jump_queued) {
            self.player_y_speed = JUMP_SPEED;
        }

        if self.columns.iter().any(|c| c.overlaps(&self.player)) {
            self.dead = true;
        }
        if self.player.y > self.height as f32 + 50.0 || self.player.x < -50.0 {
            self.dead = true;
        }
        Ok(())
    }

    fn capture_frame(&mut self, path: &Path) -> anyhow::Result<()> {
        self.render()
            .save(path)
            .with_context(|| format!("write frame {}", path.display()))
    }

    fn is_running(&self) -> bool {
        true
    }
}

fn lerp_color(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let mix = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t) as u8;
    Rgba([
        mix(a.0[0], b.0[0]),
        mix(a.0[1], b.0[1]),
        mix(a.0[2], b.0[2]),
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_scenes_render_identically() {
        let mut a = ScrollerScene::new(160, 120);
        let mut b = ScrollerScene::new(160, 120);
        for _ in 0..10 {
            a.step().unwrap();
            b.step().unwrap();
        }
        assert_eq!(a.render().into_raw(), b.render().into_raw());
    }

    #[test]
    fn jump_changes_trajectory() {
        let mut plain = ScrollerScene::new(160, 120);
        let mut jumper = ScrollerScene::new(160, 120);
        jumper.queue_jump();
        for _ in 0..5 {
            plain.step().unwrap();
            jumper.step().unwrap();
        }
        assert!(jumper.player.y < plain.player.y);
    }

    #[test]
    fn falls_to_death_without_input() {
        let mut scene = ScrollerScene::new(160, 120);
        for _ in 0..2000 {
            scene.step().unwrap();
        }
        assert!(scene.is_dead());
    }
}
