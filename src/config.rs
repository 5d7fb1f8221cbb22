// Tunables for the particle background and the custom cursor. The defaults are
// the values the site ships with; nothing here is exposed to JS.

use crate::color::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    pub particle_count: usize,
    /// Pointer distance under which particles are pushed away.
    pub interaction_radius: f64,
    /// Displacement applied to a particle sitting right on the pointer.
    pub repulsion_strength: f64,
    /// Each velocity component is drawn from `[-max_speed, max_speed]`.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub palette: Vec<Color>,
    pub particle_alpha: f64,
    pub link_distance: f64,
    /// Opacity of a link between two touching particles.
    pub link_alpha: f64,
    pub link_color: Color,
    pub link_width: f64,
    /// Wrap every step and render in a console timer.
    pub trace_frames: bool,
}

impl ParticleConfig {
    pub const PARTICLE_COUNT: usize = 80;
    pub const INTERACTION_RADIUS: f64 = 150.0;
    pub const REPULSION_STRENGTH: f64 = 2.0;
    pub const MAX_SPEED: f64 = 0.25;
    pub const MIN_RADIUS: f64 = 1.0;
    pub const MAX_RADIUS: f64 = 3.0;
    pub const PARTICLE_ALPHA: f64 = 0.6;
    pub const LINK_DISTANCE: f64 = 120.0;
    pub const LINK_ALPHA: f64 = 0.2;
    pub const LINK_WIDTH: f64 = 1.0;
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig {
            particle_count: Self::PARTICLE_COUNT,
            interaction_radius: Self::INTERACTION_RADIUS,
            repulsion_strength: Self::REPULSION_STRENGTH,
            max_speed: Self::MAX_SPEED,
            min_radius: Self::MIN_RADIUS,
            max_radius: Self::MAX_RADIUS,
            palette: vec![Color::BLUE, Color::VIOLET, Color::CYAN],
            particle_alpha: Self::PARTICLE_ALPHA,
            link_distance: Self::LINK_DISTANCE,
            link_alpha: Self::LINK_ALPHA,
            link_color: Color::BLUE,
            link_width: Self::LINK_WIDTH,
            trace_frames: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CursorConfig {
    /// Fraction of the remaining gap the inner dot closes each frame.
    pub inner_ease: f64,
    pub outer_ease: f64,
    /// Elements that put the cursor in its hover state.
    pub interactive_selector: String,
}

impl CursorConfig {
    pub const INNER_EASE: f64 = 0.2;
    pub const OUTER_EASE: f64 = 0.1;
    pub const INTERACTIVE_SELECTOR: &'static str =
        "a, button, input, textarea, select, [role=\"button\"], .project-card, .social-card";
}

impl Default for CursorConfig {
    fn default() -> Self {
        CursorConfig {
            inner_ease: Self::INNER_EASE,
            outer_ease: Self::OUTER_EASE,
            interactive_selector: Self::INTERACTIVE_SELECTOR.to_owned(),
        }
    }
}
