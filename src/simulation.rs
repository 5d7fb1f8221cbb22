// Per-frame particle update: pointer repulsion, free movement, bouncing off the
// surface edges and clamping back inside it.

use vecmath::Vector2;

use crate::config::ParticleConfig;
use crate::field::ParticleField;
use crate::particle::Particle;

/// Advances every particle in the field by one frame.
///
/// `pointer` is `None` while the pointer is outside the tracked region, which
/// turns repulsion off entirely.
pub fn step(field: &mut ParticleField, pointer: Option<Vector2<f64>>, config: &ParticleConfig) {
    let bounds = [field.width(), field.height()];
    for particle in field.particles_mut() {
        if let Some(pointer) = pointer {
            let push = repulsion(
                particle.pos,
                pointer,
                config.interaction_radius,
                config.repulsion_strength,
            );
            particle.pos = vecmath::vec2_add(particle.pos, push);
        }
        advance(particle, bounds);
    }
}

/// Displacement pushing a particle at `pos` directly away from `pointer`.
///
/// The push falls off linearly from `strength` at the pointer to zero at
/// `radius`. At zero distance the direction comes from `atan2(0, 0)`, which
/// is `0`, so the particle is pushed towards negative x.
pub fn repulsion(pos: Vector2<f64>, pointer: Vector2<f64>, radius: f64, strength: f64) -> Vector2<f64> {
    let to_pointer = vecmath::vec2_sub(pointer, pos);
    let distance = vecmath::vec2_len(to_pointer);
    if distance >= radius {
        return [0.0, 0.0];
    }

    let force = (radius - distance) / radius;
    let angle = to_pointer[1].atan2(to_pointer[0]);
    vecmath::vec2_scale([-angle.cos(), -angle.sin()], force * strength)
}

fn advance(particle: &mut Particle, bounds: Vector2<f64>) {
    particle.pos = vecmath::vec2_add(particle.pos, particle.vel);
    for axis in 0..2 {
        if particle.pos[axis] < 0.0 || particle.pos[axis] > bounds[axis] {
            particle.vel[axis] *= -1.0;
        }
        particle.pos[axis] = particle.pos[axis].min(bounds[axis]).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(x: f64, y: f64) -> Particle {
        Particle::new(x, y, 0.0, 0.0, 2.0, Color::BLUE)
    }

    fn single(p: Particle, width: f64, height: f64) -> ParticleField {
        ParticleField::from_particles(vec![p], width, height)
    }

    #[test]
    fn particles_stay_in_bounds() {
        let config = ParticleConfig {
            max_speed: 40.0,
            ..ParticleConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::generate(&config, 320.0, 240.0, &mut rng);
        let pointers = [Some([160.0, 120.0]), None, Some([0.0, 0.0]), Some([320.0, 10.0])];

        for frame in 0..500 {
            step(&mut field, pointers[frame % pointers.len()], &config);
            for p in field.particles() {
                assert!(p.pos[0] >= 0.0 && p.pos[0] <= 320.0, "x out of bounds: {:?}", p);
                assert!(p.pos[1] >= 0.0 && p.pos[1] <= 240.0, "y out of bounds: {:?}", p);
            }
        }
    }

    #[test]
    fn reflects_at_right_edge() {
        let config = ParticleConfig::default();
        let mut field = single(Particle::new(99.9, 50.0, 1.0, 0.0, 2.0, Color::BLUE), 100.0, 100.0);
        step(&mut field, None, &config);

        let p = field.particles()[0];
        assert!(p.vel[0] < 0.0);
        assert!(p.pos[0] <= 100.0);
        assert_eq!(p.vel[1], 0.0);
    }

    #[test]
    fn axes_reflect_independently() {
        let config = ParticleConfig::default();
        let mut field = single(Particle::new(0.1, 50.0, -0.25, 0.25, 2.0, Color::BLUE), 100.0, 100.0);
        step(&mut field, None, &config);

        let p = field.particles()[0];
        assert_eq!(p.vel, [0.25, 0.25]);
        assert_eq!(p.pos[0], 0.0);
    }

    #[test]
    fn repulsion_falls_off_with_distance() {
        let config = ParticleConfig::default();
        let pointer = [500.0, 500.0];
        let mut previous = f64::INFINITY;

        for d in (0..150).step_by(5) {
            let mut field = single(still(500.0 + d as f64, 500.0), 1000.0, 1000.0);
            step(&mut field, Some(pointer), &config);
            let moved = field.particles()[0].pos[0] - (500.0 + d as f64);
            assert!(moved.abs() < previous, "distance {} moved {}", d, moved);
            previous = moved.abs();
        }

        for d in &[150.0, 151.0, 400.0] {
            let mut field = single(still(500.0 + d, 500.0), 1000.0, 1000.0);
            step(&mut field, Some(pointer), &config);
            assert_eq!(field.particles()[0].pos, [500.0 + d, 500.0]);
        }
    }

    #[test]
    fn repulsion_points_away_from_pointer() {
        let push = repulsion([100.0, 175.0], [100.0, 100.0], 150.0, 2.0);
        assert!(push[0].abs() < 1e-12);
        assert!((push[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pointer_on_top_of_particle() {
        let config = ParticleConfig::default();
        let mut field = single(still(50.0, 50.0), 100.0, 100.0);
        step(&mut field, Some([50.0, 50.0]), &config);

        let p = field.particles()[0];
        assert!((p.pos[0] - 48.0).abs() < 1e-12);
        assert!((p.pos[1] - 50.0).abs() < 1e-12);
        assert_eq!(p.vel, [0.0, 0.0]);
    }

    #[test]
    fn pointer_at_origin_still_repels() {
        let config = ParticleConfig::default();
        let mut field = single(still(0.0, 10.0), 100.0, 100.0);
        step(&mut field, Some([0.0, 0.0]), &config);
        assert!(field.particles()[0].pos[1] > 10.0);
    }

    #[test]
    fn repulsion_past_edge_is_clamped() {
        let config = ParticleConfig::default();
        let mut field = single(Particle::new(1.0, 50.0, -0.2, 0.0, 2.0, Color::BLUE), 100.0, 100.0);
        step(&mut field, Some([2.0, 50.0]), &config);

        let p = field.particles()[0];
        assert_eq!(p.pos[0], 0.0);
        assert_eq!(p.vel[0], 0.2);
    }

    #[test]
    fn two_particle_scenario_moves_free_particle() {
        let config = ParticleConfig::default();
        let mut field = ParticleField::from_particles(
            vec![
                Particle::new(0.0, 0.0, 0.5, 0.5, 1.0, Color::BLUE),
                still(3.0, 3.0),
            ],
            100.0,
            100.0,
        );
        step(&mut field, None, &config);
        assert_eq!(field.particles()[0].pos, [0.5, 0.5]);
        assert_eq!(field.particles()[1].pos, [3.0, 3.0]);
    }
}
