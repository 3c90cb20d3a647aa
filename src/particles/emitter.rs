//! Particle emitter
//!
//! Particles live in a fixed-capacity ring buffer. Every particle of an
//! emitter shares one lifetime and new ones are always appended behind the
//! youngest, so particles expire strictly oldest-first and retiring from the
//! front of the ring is enough to keep the alive range exact.

use glam::{Vec3, Vec4};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ring::RingBuffer;
use crate::consts::PARTICLE_JITTER;
use crate::error::{Error, Result};
use crate::renderer::vertex::{INDICES_PER_QUAD, ParticleVertex, quad_indices};

/// Relative slack when comparing accumulated time against the emit interval,
/// so float rounding never swallows a spawn that is due
const EMIT_TOLERANCE: f64 = 1e-4;

/// A single particle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub start_velocity: Vec3,
    pub color: Vec4,
    pub size: f32,
    /// Seconds since spawn
    pub age: f32,
}

/// Emitter construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Spawn point for every particle
    pub position: Vec3,
    /// Base start velocity (jittered per particle)
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub start_color: Vec4,
    pub end_color: Vec4,
    pub start_size: f32,
    pub end_size: f32,
    /// Ring buffer capacity
    pub max_particles: usize,
    pub particles_per_second: f32,
    /// Seconds each particle lives
    pub lifetime: f32,
    /// Keep emitting until deactivated; otherwise stop after one lifetime
    pub looping: bool,
    /// Start emitting immediately
    pub active: bool,
    /// Seed for start velocity jitter
    pub seed: u64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::new(0.0, 1.0, 0.0),
            acceleration: Vec3::new(0.0, -1.0, 0.0),
            start_color: Vec4::ONE,
            end_color: Vec4::new(1.0, 1.0, 1.0, 0.0),
            start_size: 0.1,
            end_size: 0.02,
            max_particles: 256,
            particles_per_second: 50.0,
            lifetime: 1.5,
            looping: true,
            active: false,
            seed: 0,
        }
    }
}

impl EmitterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_particles == 0 {
            return Err(Error::ZeroCapacity);
        }
        if !(self.particles_per_second.is_finite() && self.particles_per_second > 0.0) {
            return Err(Error::InvalidEmissionRate(self.particles_per_second));
        }
        if !(self.lifetime.is_finite() && self.lifetime > 0.0) {
            return Err(Error::InvalidLifetime(self.lifetime));
        }
        Ok(())
    }

    pub fn seconds_per_particle(&self) -> f64 {
        1.0 / f64::from(self.particles_per_second)
    }
}

/// A contiguous run of quads to draw with one indexed draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRange {
    pub first_index: u32,
    pub index_count: u32,
}

/// Per-frame particle data for the renderer.
///
/// `vertices` covers every slot of the ring (dead slots hold stale data and
/// are never referenced by `draws`).
#[derive(Debug)]
pub struct ParticleBatch<'a> {
    pub vertices: &'a [ParticleVertex],
    pub indices: &'a [u32],
    /// One range, or two when the alive range wraps (older run first)
    pub draws: Vec<DrawRange>,
}

impl ParticleBatch<'_> {
    pub fn quad_count(&self) -> usize {
        self.draws
            .iter()
            .map(|d| d.index_count as usize / INDICES_PER_QUAD)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct Emitter {
    config: EmitterConfig,
    particles: RingBuffer<Particle>,
    active: bool,
    /// Time owed to the spawner (f64 so long sessions don't drift)
    time_since_emit: f64,
    /// Seconds emitted since the last activation
    active_time: f32,
    rng: Pcg32,
    total_spawned: u64,
    dropped: u64,
    vertices: Vec<ParticleVertex>,
    indices: Vec<u32>,
    vertices_dirty: bool,
}

impl Emitter {
    pub fn new(config: EmitterConfig) -> Result<Self> {
        config.validate()?;

        let capacity = config.max_particles;
        let mut vertices = vec![ParticleVertex::default(); capacity * ParticleVertex::PER_QUAD];
        for quad in vertices.chunks_exact_mut(ParticleVertex::PER_QUAD) {
            for (vertex, uv) in quad.iter_mut().zip(ParticleVertex::CORNERS) {
                vertex.uv = uv;
            }
        }

        Ok(Self {
            particles: RingBuffer::with_capacity(capacity),
            active: config.active,
            time_since_emit: 0.0,
            active_time: 0.0,
            rng: Pcg32::seed_from_u64(config.seed),
            total_spawned: 0,
            dropped: 0,
            vertices,
            indices: quad_indices(capacity),
            vertices_dirty: true,
            config,
        })
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start emitting. Existing particles are untouched.
    pub fn activate(&mut self) {
        if !self.active {
            log::info!("emitter at {:?} activated", self.config.position);
        }
        self.active = true;
        self.active_time = 0.0;
    }

    /// Stop emitting. Live particles keep aging and fade out on their own.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn living_count(&self) -> usize {
        self.particles.len()
    }

    pub fn capacity(&self) -> usize {
        self.particles.capacity()
    }

    /// Particles accepted into the ring since construction
    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    /// Spawns dropped because the ring was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Live particles, oldest first
    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    pub fn ring(&self) -> &RingBuffer<Particle> {
        &self.particles
    }

    /// Static index buffer: six indices per slot, quad `n` at `6n`
    pub fn index_buffer(&self) -> &[u32] {
        &self.indices
    }

    /// Age live particles, retire expired ones, then emit what is due
    pub fn update(&mut self, dt: f32) {
        if self.particles.is_empty() && !self.active {
            return;
        }

        self.age_particles(dt);

        if self.active {
            self.time_since_emit += f64::from(dt);
            let interval = self.config.seconds_per_particle();
            while self.time_since_emit >= interval * (1.0 - EMIT_TOLERANCE) {
                self.spawn_particle();
                self.time_since_emit -= interval;
            }

            if !self.config.looping {
                self.active_time += dt;
                if self.active_time >= self.config.lifetime {
                    log::debug!("emitter at {:?} finished its burst", self.config.position);
                    self.deactivate();
                }
            }
        }

        self.vertices_dirty = true;
    }

    fn age_particles(&mut self, dt: f32) {
        let cfg = &self.config;
        let lifetime = cfg.lifetime;

        for (_, particle) in self.particles.iter_mut() {
            particle.age += dt;
            if particle.age >= lifetime {
                continue;
            }

            let t = particle.age;
            let fraction = t / lifetime;
            particle.color = cfg.start_color.lerp(cfg.end_color, fraction);
            particle.size = cfg.start_size + (cfg.end_size - cfg.start_size) * fraction;
            particle.position =
                cfg.position + particle.start_velocity * t + 0.5 * cfg.acceleration * t * t;
        }

        while self
            .particles
            .front()
            .is_some_and(|p| p.age >= lifetime)
        {
            self.particles.pop_front();
        }
    }

    fn spawn_particle(&mut self) {
        if self.particles.is_full() {
            self.dropped += 1;
            log::trace!("emitter full ({}), spawn dropped", self.capacity());
            return;
        }

        let jitter = Vec3::new(
            self.rng.random_range(-PARTICLE_JITTER..=PARTICLE_JITTER),
            self.rng.random_range(-PARTICLE_JITTER..=PARTICLE_JITTER),
            self.rng.random_range(-PARTICLE_JITTER..=PARTICLE_JITTER),
        );

        let particle = Particle {
            position: self.config.position,
            start_velocity: self.config.velocity + jitter,
            color: self.config.start_color,
            size: self.config.start_size,
            age: 0.0,
        };
        if self.particles.push_back(particle) {
            self.total_spawned += 1;
        }
    }

    /// Expand live particles into quads and describe the draw calls.
    ///
    /// Vertices are only rebuilt when the particles changed since the last call.
    pub fn render_batch(&mut self) -> ParticleBatch<'_> {
        if self.vertices_dirty {
            self.write_vertices();
            self.vertices_dirty = false;
        }

        let (older, wrapped) = self.particles.segments();
        let draws = std::iter::once(older)
            .chain(wrapped)
            .filter(|range| !range.is_empty())
            .map(|range| DrawRange {
                first_index: (range.start * INDICES_PER_QUAD) as u32,
                index_count: (range.len() * INDICES_PER_QUAD) as u32,
            })
            .collect();

        ParticleBatch {
            vertices: &self.vertices,
            indices: &self.indices,
            draws,
        }
    }

    fn write_vertices(&mut self) {
        let raw = self.particles.raw_slots();
        for slot in self.particles.slots() {
            let particle = &raw[slot];
            let base = slot * ParticleVertex::PER_QUAD;
            for vertex in &mut self.vertices[base..base + ParticleVertex::PER_QUAD] {
                vertex.position = particle.position.to_array();
                vertex.color = particle.color.to_array();
                vertex.size = particle.size;
            }
        }
    }
}
