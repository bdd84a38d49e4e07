//! Draws boids as filled triangles into PNG frames.

use std::path::{Path, PathBuf};

use colors_transform::{Color, Rgb as HexColour};
use image::{ImageError, Rgb, RgbImage};
use thiserror::Error;
use tracing::debug;

use crate::boid::Boid;
use crate::config::WorldConfig;
use crate::vector::{Vec2, vec2};

pub const DEFAULT_BACKGROUND: &str = "#2f4f4f";
pub const DEFAULT_FOREGROUND: &str = "#ffffff";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid colour {value:?}: {message}")]
    Colour { value: String, message: String },
    #[error("failed to write frame {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

pub fn parse_colour(value: &str) -> Result<Rgb<u8>, RenderError> {
    let colour = HexColour::from_hex_str(value).map_err(|err| RenderError::Colour {
        value: value.to_string(),
        message: err.message,
    })?;
    Ok(Rgb([
        colour.get_red().round() as u8,
        colour.get_green().round() as u8,
        colour.get_blue().round() as u8,
    ]))
}

#[derive(Debug, Clone)]
pub struct FrameRenderer {
    width: u32,
    height: u32,
    body_length: f32,
    background: Rgb<u8>,
    foreground: Rgb<u8>,
}

impl FrameRenderer {
    pub fn new(config: &WorldConfig, background: Rgb<u8>, foreground: Rgb<u8>) -> Self {
        FrameRenderer {
            width: config.width.ceil() as u32,
            height: config.height.ceil() as u32,
            body_length: config.body_length,
            background,
            foreground,
        }
    }

    pub fn render(&self, boids: &[Boid]) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, self.background);
        for boid in boids {
            fill_triangle(&mut img, boid.glyph(self.body_length), self.foreground);
        }
        img
    }

    /// Renders `boids` and writes them to `dir/frame_XXXXXXXX.png`.
    pub fn save_frame(&self, boids: &[Boid], dir: &Path, frame: usize) -> Result<PathBuf, RenderError> {
        let path = dir.join(format!("frame_{:0>8}.png", frame));
        self.render(boids)
            .save(&path)
            .map_err(|source| RenderError::Save {
                path: path.clone(),
                source,
            })?;
        debug!(frame, path = %path.display(), "frame written");
        Ok(path)
    }
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Fills every pixel whose centre lies inside the triangle. Parts of the
/// triangle outside the image are clipped.
fn fill_triangle(img: &mut RgbImage, corners: [Vec2; 3], colour: Rgb<u8>) {
    let [a, b, c] = corners;
    let area = edge(a, b, c);
    if area == 0.0 {
        return;
    }

    let min_x = a.x.min(b.x).min(c.x).floor().max(0.0);
    let min_y = a.y.min(b.y).min(c.y).floor().max(0.0);
    let max_x = a.x.max(b.x).max(c.x).ceil().min(img.width() as f32 - 1.0);
    let max_y = a.y.max(b.y).max(c.y).ceil().min(img.height() as f32 - 1.0);
    if min_x > max_x || min_y > max_y {
        return;
    }

    for y in min_y as u32..=max_y as u32 {
        for x in min_x as u32..=max_x as u32 {
            let p = vec2(x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge(b, c, p) / area;
            let w1 = edge(c, a, p) / area;
            let w2 = edge(a, b, p) / area;
            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                img.put_pixel(x, y, colour);
            }
        }
    }
}
