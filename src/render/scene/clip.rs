//! Clipping primitives for the scene backend.
//!
//! The case silhouette arrives as path data in the asset's viewbox space
//! (move/line/cubic/close commands). The scene layer scales it to the live
//! container and clips every object node against it, so stickers dragged
//! past the silhouette visually disappear instead of floating over the
//! background.
//!
//! Where the path data comes from (per phone model) is the host's problem;
//! this module only parses, scales and tests it.

use crate::geometry::ContainerRect;
use glam::Vec2;

/// Subdivision steps when flattening a cubic segment for containment tests.
const CURVE_STEPS: usize = 16;

/// One absolute path command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    CurveTo { c1: Vec2, c2: Vec2, to: Vec2 },
    Close,
}

/// A case-silhouette clip path in its source viewbox space.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipPath {
    commands: Vec<PathCommand>,
    /// Width/height of the coordinate space the commands were authored in.
    viewbox: Vec2,
}

impl ClipPath {
    pub fn new(commands: Vec<PathCommand>, viewbox: Vec2) -> Self {
        Self { commands, viewbox }
    }

    /// Parse SVG-style path data (`M`/`L`/`C`/`Z`, absolute coordinates).
    /// Unknown commands are skipped; `None` if nothing parseable remains.
    pub fn parse(data: &str, viewbox: Vec2) -> Option<Self> {
        let mut commands = Vec::new();
        let mut chars = data.char_indices().peekable();

        while let Some((index, ch)) = chars.next() {
            if !ch.is_ascii_alphabetic() {
                continue;
            }
            // Slice out the argument run up to the next command letter
            let rest = &data[index + ch.len_utf8()..];
            let end = rest
                .find(|c: char| c.is_ascii_alphabetic())
                .unwrap_or(rest.len());
            let args: Vec<f32> = rest[..end]
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .filter_map(|s| s.parse().ok())
                .collect();

            match ch.to_ascii_uppercase() {
                'M' => {
                    if let [x, y, ..] = args[..] {
                        commands.push(PathCommand::MoveTo(Vec2::new(x, y)));
                        // Extra coordinate pairs after a move are implicit lines
                        for pair in args[2..].chunks_exact(2) {
                            commands.push(PathCommand::LineTo(Vec2::new(pair[0], pair[1])));
                        }
                    }
                }
                'L' => {
                    for pair in args.chunks_exact(2) {
                        commands.push(PathCommand::LineTo(Vec2::new(pair[0], pair[1])));
                    }
                }
                'C' => {
                    for sextet in args.chunks_exact(6) {
                        commands.push(PathCommand::CurveTo {
                            c1: Vec2::new(sextet[0], sextet[1]),
                            c2: Vec2::new(sextet[2], sextet[3]),
                            to: Vec2::new(sextet[4], sextet[5]),
                        });
                    }
                }
                'Z' => commands.push(PathCommand::Close),
                _ => {}
            }
        }

        if commands.is_empty() {
            None
        } else {
            Some(Self::new(commands, viewbox))
        }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Flatten to a polygon in container pixels, cubics subdivided.
    pub fn polygon(&self, container: ContainerRect) -> Vec<Vec2> {
        if self.viewbox.x <= 0.0 || self.viewbox.y <= 0.0 {
            return Vec::new();
        }
        let scale = Vec2::new(
            container.width / self.viewbox.x,
            container.height / self.viewbox.y,
        );

        let mut points = Vec::new();
        let mut current = Vec2::ZERO;
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(to) | PathCommand::LineTo(to) => {
                    current = *to;
                    points.push(current * scale);
                }
                PathCommand::CurveTo { c1, c2, to } => {
                    for step in 1..=CURVE_STEPS {
                        let t = step as f32 / CURVE_STEPS as f32;
                        points.push(cubic_point(current, *c1, *c2, *to, t) * scale);
                    }
                    current = *to;
                }
                PathCommand::Close => {}
            }
        }
        points
    }

    /// Even-odd containment test against the scaled silhouette.
    pub fn contains(&self, point: Vec2, container: ContainerRect) -> bool {
        let polygon = self.polygon(container);
        if polygon.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = polygon.len() - 1;
        for i in 0..polygon.len() {
            let (a, b) = (polygon[i], polygon[j]);
            let crosses = (a.y > point.y) != (b.y > point.y);
            if crosses {
                let x_at = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if point.x < x_at {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

fn cubic_point(from: Vec2, c1: Vec2, c2: Vec2, to: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    from * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + to * (t * t * t)
}
