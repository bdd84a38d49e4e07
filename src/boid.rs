use std::f32::consts::FRAC_PI_2;

use crate::config::WorldConfig;
use crate::vector::{Vec2, rotate};

#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vec2,
    /// Direction of travel, kept at unit length.
    pub heading: Vec2,
}

/// What a renderer needs to draw one boid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub position: Vec2,
    pub heading: Vec2,
}

impl Boid {
    pub fn new(position: Vec2, heading: Vec2) -> Self {
        Boid { position, heading }
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            position: self.position,
            heading: self.heading,
        }
    }

    /// Corners of the triangle drawn for this boid: the nose sits on the
    /// position, the tail is `body_length` behind it along the heading.
    pub fn glyph(&self, body_length: f32) -> [Vec2; 3] {
        let tail = self.position - self.heading * body_length;
        let side = rotate(self.heading, FRAC_PI_2) * (body_length / 3.0);
        [self.position, tail + side, tail - side]
    }

    /// Moves the boid one tick along its heading.
    pub fn advance(&mut self, config: &WorldConfig) {
        self.position += self.heading * config.speed;
    }

    /// Brings a boid that has left the playfield (plus margin) back in on
    /// the opposite edge. Each axis is checked on its own.
    pub fn wrap_around(&mut self, config: &WorldConfig) {
        let margin = config.boundary_margin;
        if self.position.x > config.width + margin {
            self.position.x -= config.width;
        }
        if self.position.x < -margin {
            self.position.x += config.width;
        }
        if self.position.y > config.height + margin {
            self.position.y -= config.height;
        }
        if self.position.y < -margin {
            self.position.y += config.height;
        }
    }
}
