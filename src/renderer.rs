// Renderer struct that draws the particle field each frame: clears the surface,
// draws every particle as a translucent dot, then links close pairs with faint lines.
// Drawing goes through the `Surface` trait so the canvas can be swapped for a
// recording surface in tests.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;
extern crate nalgebra_glm as glm;

use crate::color::Color;
use crate::config::ParticleConfig;
use crate::field::ParticleField;
use crate::particle::Particle;

pub trait Surface {
    /// Resizes the backing store, which also wipes it.
    fn resize(&mut self, width: f64, height: f64);

    fn clear(&mut self, width: f64, height: f64);

    /// Fills a circle at `alpha` opacity without leaving that opacity set afterwards.
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64) -> Result<(), JsValue>;

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64);
}

impl Surface for CanvasRenderingContext2d {
    fn resize(&mut self, width: f64, height: f64) {
        if let Some(canvas) = self.canvas() {
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
        }
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(center[0], center[1], radius, 0.0, PI * 2.0)?;
        self.set_fill_style(&JsValue::from_str(&color.to_hex()));
        self.set_global_alpha(alpha);
        self.fill();
        self.set_global_alpha(1.0);
        Ok(())
    }

    #[allow(deprecated)]
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64) {
        self.begin_path();
        self.set_stroke_style(&JsValue::from_str(&color.to_rgba(alpha)));
        self.set_line_width(width);
        self.move_to(from[0], from[1]);
        self.line_to(to[0], to[1]);
        self.stroke();
    }
}

/// A pair of particles close enough to be joined by a line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub distance: f64,
}

/// Every unordered pair closer than `link_distance`, in `(i, j)` order with `i < j`.
///
/// This is a plain pairwise scan, 3160 checks at 80 particles. It does not
/// scale to large counts.
pub fn links(particles: &[Particle], link_distance: f64) -> Vec<Link> {
    let mut found = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        let a_pos = glm::vec2(a.pos[0], a.pos[1]);
        for b in &particles[i + 1..] {
            let distance = glm::distance(&a_pos, &glm::vec2(b.pos[0], b.pos[1]));
            if distance < link_distance {
                found.push(Link {
                    from: a.pos,
                    to: b.pos,
                    distance,
                });
            }
        }
    }
    found
}

/// Linear fade from `max_alpha` for touching particles to 0 at `link_distance`.
pub fn link_opacity(distance: f64, link_distance: f64, max_alpha: f64) -> f64 {
    (1.0 - distance / link_distance).max(0.0) * max_alpha
}

pub struct Renderer<S: Surface> {
    pub surface: S,
    config: ParticleConfig,
}

impl<S: Surface> Renderer<S> {
    pub fn new(surface: S, config: ParticleConfig) -> Self {
        Renderer { surface, config }
    }

    pub fn render(&mut self, field: &ParticleField) -> Result<(), JsValue> {
        self.surface.clear(field.width(), field.height());

        for p in field.particles() {
            self.surface
                .fill_circle(p.pos, p.radius, p.color, self.config.particle_alpha)?;
        }

        for link in links(field.particles(), self.config.link_distance) {
            let alpha = link_opacity(link.distance, self.config.link_distance, self.config.link_alpha);
            self.surface.stroke_line(
                link.from,
                link.to,
                self.config.link_color,
                alpha,
                self.config.link_width,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Call {
        Resize(f64, f64),
        Clear(f64, f64),
        Circle { center: [f64; 2], radius: f64, color: Color, alpha: f64 },
        Line { from: [f64; 2], to: [f64; 2], alpha: f64 },
    }

    #[derive(Default)]
    pub struct Recording {
        pub calls: Vec<Call>,
    }

    impl Recording {
        pub fn lines(&self) -> Vec<&Call> {
            self.calls.iter().filter(|c| matches!(c, Call::Line { .. })).collect()
        }
    }

    impl Surface for Recording {
        fn resize(&mut self, width: f64, height: f64) {
            self.calls.push(Call::Resize(width, height));
        }

        fn clear(&mut self, width: f64, height: f64) {
            self.calls.push(Call::Clear(width, height));
        }

        fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64) -> Result<(), JsValue> {
            self.calls.push(Call::Circle { center, radius, color, alpha });
            Ok(())
        }

        fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], _color: Color, alpha: f64, _width: f64) {
            self.calls.push(Call::Line { from, to, alpha });
        }
    }

    fn dot(x: f64, y: f64) -> Particle {
        Particle::new(x, y, 0.0, 0.0, 1.5, Color::CYAN)
    }

    #[test]
    fn opacity_bounds() {
        assert_eq!(link_opacity(120.0, 120.0, 0.2), 0.0);
        assert_eq!(link_opacity(0.0, 120.0, 0.2), 0.2);
        assert!((link_opacity(60.0, 120.0, 0.2) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn pairs_at_link_distance_are_not_linked() {
        let particles = [dot(0.0, 0.0), dot(120.0, 0.0), dot(0.0, 119.9)];
        let found = links(&particles, 120.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to, [0.0, 119.9]);
    }

    #[test]
    fn every_pair_checked_once() {
        let particles: Vec<Particle> = (0..5).map(|i| dot(i as f64, 0.0)).collect();
        assert_eq!(links(&particles, 120.0).len(), 10);
    }

    #[test]
    fn draws_clear_then_particles_then_links() {
        let field = ParticleField::from_particles(vec![dot(0.5, 0.5), dot(3.0, 3.0)], 100.0, 100.0);
        let mut renderer = Renderer::new(Recording::default(), ParticleConfig::default());
        renderer.render(&field).unwrap();

        let calls = &renderer.surface.calls;
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], Call::Clear(100.0, 100.0));
        assert_eq!(
            calls[1],
            Call::Circle {
                center: [0.5, 0.5],
                radius: 1.5,
                color: Color::CYAN,
                alpha: 0.6
            }
        );
        match calls[3] {
            Call::Line { from, to, alpha } => {
                assert_eq!((from, to), ([0.5, 0.5], [3.0, 3.0]));
                let expected = (1.0 - 2.5f64.hypot(2.5) / 120.0) * 0.2;
                assert!((alpha - expected).abs() < 1e-12);
                assert!((alpha - 0.194).abs() < 1e-3);
            }
            ref other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn empty_field_only_clears() {
        let field = ParticleField::from_particles(Vec::new(), 10.0, 10.0);
        let mut renderer = Renderer::new(Recording::default(), ParticleConfig::default());
        renderer.render(&field).unwrap();
        assert_eq!(renderer.surface.calls, vec![Call::Clear(10.0, 10.0)]);
        assert!(renderer.surface.lines().is_empty());
    }
}
