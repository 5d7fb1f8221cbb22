// The particle field: every particle alive on the surface plus the surface size.
// Particles are never added or removed one at a time, a resize throws the whole
// collection away and generates a new one.

use rand::Rng;

use crate::config::ParticleConfig;
use crate::particle::Particle;

#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    /// Generates `count` particles over a `width` x `height` surface using the
    /// default ranges and the thread rng.
    pub fn new(count: usize, width: f64, height: f64) -> ParticleField {
        let config = ParticleConfig {
            particle_count: count,
            ..ParticleConfig::default()
        };
        ParticleField::generate(&config, width, height, &mut rand::thread_rng())
    }

    pub fn generate<R: Rng>(
        config: &ParticleConfig,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> ParticleField {
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            let radius = rng.gen::<f64>() * (config.max_radius - config.min_radius) + config.min_radius;
            let pos_x = rng.gen::<f64>() * width;
            let pos_y = rng.gen::<f64>() * height;
            let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
            let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
            let color = if config.palette.is_empty() {
                config.link_color
            } else {
                config.palette[rng.gen_range(0, config.palette.len())]
            };
            particles.push(Particle::new(pos_x, pos_y, vel_x, vel_y, radius, color));
        }

        ParticleField {
            particles,
            width,
            height,
        }
    }

    pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64) -> ParticleField {
        ParticleField {
            particles,
            width,
            height,
        }
    }

    /// Discards every particle and generates the same number again for the new bounds.
    pub fn resize(self, width: f64, height: f64) -> ParticleField {
        ParticleField::new(self.particles.len(), width, height)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}
