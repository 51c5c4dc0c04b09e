use bevy::math::Vec3;
use rand::Rng;

pub const MIN_POOL_SIZE: usize = 12;
/// Upper bound on the pool so an absurd severity cannot exhaust memory.
pub const MAX_POOL_SIZE: usize = 10_000;
const PARTICLES_PER_SEVERITY: f32 = 12.0;

/// Vertical offset below which a droplet is recycled.
pub const RECYCLE_FLOOR: f32 = -0.6;
/// Speeds are tuned per frame at this rate and scaled by `delta * REFERENCE_FPS`.
const REFERENCE_FPS: f32 = 60.0;
const FALL_SPEED_PER_SEVERITY: f32 = 0.5;
const HORIZONTAL_JITTER: f32 = 0.001;

const MIN_OPACITY: f32 = 0.15;
const OPACITY_OFFSET: f32 = 0.9;

/// `max(12, floor(severity * 12))`, computed once when the pool is mounted.
pub fn pool_size(severity: f32) -> usize {
    let scaled = (severity * PARTICLES_PER_SEVERITY).floor();
    if !scaled.is_finite() || scaled <= MIN_POOL_SIZE as f32 {
        return MIN_POOL_SIZE;
    }
    (scaled as usize).min(MAX_POOL_SIZE)
}

/// Rendered opacity for a droplet at `vertical` offset below its anchor.
pub fn particle_opacity(vertical: f32) -> f32 {
    (OPACITY_OFFSET + vertical).clamp(MIN_OPACITY, 1.0)
}

/// Sampling ranges for droplet births, as `(min, max)` pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRanges {
    pub spawn_vertical: (f32, f32),
    pub spawn_horizontal: (f32, f32),
    pub fall_speed: (f32, f32),
}

impl Default for ParticleRanges {
    fn default() -> Self {
        Self {
            spawn_vertical: (0.2, 0.6),
            spawn_horizontal: (-0.2, 0.2),
            fall_speed: (0.002, 0.006),
        }
    }
}

impl ParticleRanges {
    fn sample_offset<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            rng.gen_range(self.spawn_horizontal.0..=self.spawn_horizontal.1),
            rng.gen_range(self.spawn_vertical.0..=self.spawn_vertical.1),
            rng.gen_range(self.spawn_horizontal.0..=self.spawn_horizontal.1),
        )
    }
}

/// A single droplet, positioned relative to the emission anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BleedParticle {
    pub offset: Vec3,
    /// Downward speed per reference frame; always positive.
    pub fall_speed: f32,
}

impl BleedParticle {
    pub fn opacity(&self) -> f32 {
        particle_opacity(self.offset.y)
    }

    pub fn world_position(&self, anchor: Vec3) -> Vec3 {
        anchor + self.offset
    }
}

/// Fixed-size droplet pool. Droplets are never removed; a droplet that falls
/// past [`RECYCLE_FLOOR`] is born again near the anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticlePool {
    particles: Vec<BleedParticle>,
    ranges: ParticleRanges,
}

impl ParticlePool {
    pub fn spawn<R: Rng + ?Sized>(severity: f32, rng: &mut R) -> Self {
        Self::spawn_with(pool_size(severity), ParticleRanges::default(), rng)
    }

    pub fn spawn_with<R: Rng + ?Sized>(
        count: usize,
        ranges: ParticleRanges,
        rng: &mut R,
    ) -> Self {
        let particles = (0..count)
            .map(|_| BleedParticle {
                offset: ranges.sample_offset(rng),
                fall_speed: rng.gen_range(ranges.fall_speed.0..=ranges.fall_speed.1),
            })
            .collect();

        Self { particles, ranges }
    }

    pub fn from_particles(particles: Vec<BleedParticle>, ranges: ParticleRanges) -> Self {
        Self { particles, ranges }
    }

    pub fn particles(&self) -> &[BleedParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advances every droplet by `delta` seconds.
    pub fn step<R: Rng + ?Sized>(&mut self, delta: f32, severity: f32, rng: &mut R) {
        let frames = if delta.is_finite() {
            delta.max(0.0) * REFERENCE_FPS
        } else {
            0.0
        };
        let fall_scale = 1.0 + severity.max(0.0) * FALL_SPEED_PER_SEVERITY;

        for particle in &mut self.particles {
            particle.offset.y -= particle.fall_speed * fall_scale * frames;
            particle.offset.x += rng.gen_range(-HORIZONTAL_JITTER..=HORIZONTAL_JITTER) * frames;
            particle.offset.z += rng.gen_range(-HORIZONTAL_JITTER..=HORIZONTAL_JITTER) * frames;

            if particle.offset.y < RECYCLE_FLOOR {
                particle.offset = self.ranges.sample_offset(rng);
            }
        }
    }

    /// World position and opacity of every droplet for the given anchor.
    pub fn render_points(&self, anchor: Vec3) -> impl Iterator<Item = (Vec3, f32)> + '_ {
        self.particles
            .iter()
            .map(move |particle| (particle.world_position(anchor), particle.opacity()))
    }
}
