//! Particle effects
//!
//! Emitters own a fixed pool of particles and never allocate after
//! construction. Emission is throttled by rate and silently drops spawns
//! when the pool is exhausted.

pub mod emitter;
pub mod ring;

pub use emitter::{DrawRange, Emitter, EmitterConfig, Particle, ParticleBatch};
pub use ring::RingBuffer;
