//! Backend-neutral tessellation of a frame

use glam::Vec2;
use serde::Serialize;

use super::shapes::{circle, rect, ring, segments_for};
use super::vertex::{Vertex, colors};
use super::{Frame, GameOverSummary, Renderer};
use crate::rgba;
use crate::sim::PowerupKind;

const SHIELD_GAP: f32 = 10.0;
const SHIELD_WIDTH: f32 = 3.0;
const HEALTH_BAR_LIFT: f32 = 10.0;
const HEALTH_BAR_HEIGHT: f32 = 3.0;
const LIFE_RADIUS: f32 = 8.0;

/// Where a label's position sits relative to its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Center,
    TopLeft,
}

/// Text the host draws on top of the triangles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub pos: [f32; 2],
    pub color: [f32; 4],
    /// Font size in px
    pub size: f32,
    pub anchor: Anchor,
}

/// Triangle list and labels for the most recent frame
#[derive(Debug, Default)]
pub struct DrawList {
    pub vertices: Vec<Vertex>,
    pub labels: Vec<Label>,
    summary: Option<GameOverSummary>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices flattened to `[x, y, r, g, b, a, ...]`
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Summary of the session that just ended, while its overlay is up
    pub fn summary(&self) -> Option<&GameOverSummary> {
        self.summary.as_ref()
    }

    fn label(&mut self, text: impl Into<String>, pos: Vec2, color: [f32; 4], size: f32, anchor: Anchor) {
        self.labels.push(Label {
            text: text.into(),
            pos: pos.to_array(),
            color,
            size,
            anchor,
        });
    }

    fn draw_entities(&mut self, frame: &Frame<'_>) {
        let out = &mut self.vertices;

        for powerup in frame.powerups {
            let color = rgba(frame.colors.powerup, 1.0);
            circle(out, powerup.pos, powerup.radius, color, segments_for(powerup.radius));

            // Kind marker in place of an icon font
            let core = powerup.radius * 0.4;
            match powerup.kind {
                PowerupKind::Shield => {
                    ring(out, powerup.pos, core * 0.6, core, colors::POWERUP_CORE, 12);
                }
                PowerupKind::Speed => {
                    circle(out, powerup.pos, core * 0.6, colors::POWERUP_CORE, 8);
                }
                PowerupKind::Multishot => {
                    for dx in [-core, 0.0, core] {
                        let at = powerup.pos + Vec2::new(dx, 0.0);
                        circle(out, at, core * 0.35, colors::POWERUP_CORE, 8);
                    }
                }
            }
        }

        for projectile in frame.projectiles {
            let color = rgba(frame.colors.projectile, 1.0);
            circle(out, projectile.pos, projectile.radius, color, segments_for(projectile.radius));
        }

        for enemy in frame.enemies {
            let color = rgba(enemy.color, 1.0);
            circle(out, enemy.pos, enemy.radius, color, segments_for(enemy.radius));

            let health = enemy.health_fraction();
            if health < 1.0 {
                let min = enemy.pos - Vec2::new(enemy.radius, enemy.radius + HEALTH_BAR_LIFT);
                let width = enemy.radius * 2.0;
                rect(out, min, Vec2::new(width, HEALTH_BAR_HEIGHT), colors::HEALTH_BAR_BACK);
                rect(
                    out,
                    min,
                    Vec2::new(width * health, HEALTH_BAR_HEIGHT),
                    colors::HEALTH_BAR_FILL,
                );
            }
        }

        let player = frame.player;
        circle(
            out,
            player.pos,
            player.radius,
            rgba(frame.colors.player, 1.0),
            segments_for(player.radius),
        );
        if player.powerups.shield {
            let r = player.radius + SHIELD_GAP;
            ring(
                out,
                player.pos,
                r - SHIELD_WIDTH * 0.5,
                r + SHIELD_WIDTH * 0.5,
                colors::SHIELD_RING,
                segments_for(r),
            );
        }
    }

    fn draw_particles(&mut self, frame: &Frame<'_>) {
        for p in frame.particles {
            let color = rgba(p.color, p.alpha());
            match &p.text {
                Some(text) => self.label(text.clone(), p.pos, color, 16.0, Anchor::Center),
                None => circle(&mut self.vertices, p.pos, p.radius, color, 8),
            }
        }
    }

    fn draw_hud(&mut self, frame: &Frame<'_>) {
        self.label(
            format!("Score: {}", frame.score),
            Vec2::new(10.0, 10.0),
            colors::HUD_TEXT,
            20.0,
            Anchor::TopLeft,
        );

        for i in 0..frame.lives {
            let at = Vec2::new(20.0 + i as f32 * 30.0, 40.0);
            circle(&mut self.vertices, at, LIFE_RADIUS, colors::LIFE, 12);
        }

        let powerups = &frame.player.powerups;
        let active = [
            (powerups.shield, "SHIELD", colors::HUD_SHIELD),
            (powerups.speed(), "SPEED", colors::HUD_SPEED),
            (powerups.multishot(), "TRIPLE SHOT", colors::HUD_MULTISHOT),
        ];
        let mut y = 70.0;
        for (_, text, color) in active.into_iter().filter(|(on, _, _)| *on) {
            self.label(text, Vec2::new(10.0, y), color, 16.0, Anchor::TopLeft);
            y += 20.0;
        }
    }

    fn draw_game_over(&mut self, frame: &Frame<'_>) {
        let size = Vec2::new(frame.arena.width, frame.arena.height);
        rect(&mut self.vertices, Vec2::ZERO, size, colors::OVERLAY);

        let center = frame.arena.center();
        self.label("GAME OVER", center - Vec2::new(0.0, 40.0), colors::HUD_TEXT, 40.0, Anchor::Center);
        self.label(
            format!("Final Score: {}", frame.score),
            center + Vec2::new(0.0, 20.0),
            colors::HUD_TEXT,
            24.0,
            Anchor::Center,
        );
        self.label(
            "Click Start to play again",
            center + Vec2::new(0.0, 60.0),
            colors::HUD_TEXT,
            20.0,
            Anchor::Center,
        );
        if self.summary.is_some_and(|s| s.new_record) {
            self.label(
                "New high score!",
                center + Vec2::new(0.0, 95.0),
                rgba(frame.colors.level_up, 1.0),
                20.0,
                Anchor::Center,
            );
        }
    }
}

impl Renderer for DrawList {
    fn render(&mut self, frame: &Frame<'_>) {
        self.vertices.clear();
        self.labels.clear();

        self.draw_entities(frame);
        self.draw_particles(frame);
        self.draw_hud(frame);

        if frame.phase == crate::sim::GamePhase::GameOver {
            self.draw_game_over(frame);
        } else {
            self.summary = None;
        }
    }

    fn game_over(&mut self, summary: &GameOverSummary) {
        self.summary = Some(*summary);
    }
}
