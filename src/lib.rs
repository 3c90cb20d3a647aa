//! Air Hockey - a table hockey simulation core
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (transforms, paddles, puck physics, scoring)
//! - `particles`: Ring-buffered particle emitters for score celebrations
//! - `camera`: Free-fly camera with view/projection matrices
//! - `lighting`: Light and shadow-caster data handed to the renderer
//! - `renderer`: Render-data contract consumed by the rendering collaborator
//! - `settings`: Player-facing configuration

pub mod camera;
pub mod error;
pub mod lighting;
pub mod particles;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use camera::Camera;
pub use error::{Error, Result};
pub use settings::{QualityPreset, Settings};

use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Game configuration constants
///
/// Several of these were tuned by eye against the paddle and puck meshes.
/// They are not physical quantities; leave them alone unless the meshes change.
pub mod consts {
    use glam::Vec3;

    /// Table half-extent along x (goal ends)
    pub const TABLE_HALF_X: f32 = 4.0;
    /// Table half-extent along z (side rails)
    pub const TABLE_HALF_Z: f32 = 2.0;
    /// Goal mouth half-width along z
    pub const GOAL_HALF_WIDTH: f32 = 1.0;
    /// |x| past which a puck inside the goal band counts as a goal
    pub const GOAL_LINE_X: f32 = 3.99;

    /// Height the puck rides at (just under paddle height)
    pub const PUCK_Y: f32 = -0.15;
    pub const PUCK_SCALE: f32 = 0.3;
    pub const PUCK_START_SPEED: f32 = 2.0;
    /// Canonical serve direction after a reset (normalized on use)
    pub const PUCK_START_DIRECTION: Vec3 = Vec3::new(1.0, 0.0, 0.5);
    pub const PUCK_RESET_POSITION: Vec3 = Vec3::new(0.0, PUCK_Y, 0.0);
    /// Random serve speed range (per-axis, as in the diagonal serve)
    pub const SERVE_MIN_SPEED: f32 = 1.0;
    pub const SERVE_MAX_SPEED: f32 = 10.0;

    /// Collision radius fudge: (puck.scale.x + paddle.scale.x) * this
    pub const COLLISION_RADIUS_FACTOR: f32 = 0.55;
    /// Fraction of the center offset the puck is pushed out by after a hit
    pub const SEPARATION_FACTOR: f32 = 0.4;
    /// Below this in-plane center distance the contact normal has no in-plane part
    pub const COLLISION_EPSILON: f32 = 1e-5;

    /// Paddle defaults
    pub const PADDLE_RADIUS: f32 = 1.0;
    pub const PADDLE_SCALE: f32 = 0.5;
    pub const PADDLE_Y: f32 = 0.0;
    pub const PADDLE_START_X: f32 = 2.5;
    /// Paddle movement speed (units per second)
    pub const PADDLE_SPEED: f32 = 3.0;
    /// Paddle z travel limit (both players)
    pub const PADDLE_Z_LIMIT: f32 = 1.0;
    /// Paddle x travel, measured from the table center toward the owner's goal
    pub const PADDLE_X_NEAR: f32 = 1.0;
    pub const PADDLE_X_FAR: f32 = 3.5;

    /// Table mesh placement
    pub const TABLE_POSITION: Vec3 = Vec3::new(0.0, -0.5, 1.0);
    pub const TABLE_SCALE: Vec3 = Vec3::new(8.0, 0.5, 4.0);

    /// Uniform per-axis start velocity jitter for spawned particles
    pub const PARTICLE_JITTER: f32 = 0.2;

    /// Camera defaults
    pub const CAMERA_START_POSITION: Vec3 = Vec3::new(0.0, 5.0, -6.0);
    pub const CAMERA_START_PITCH: f32 = 0.7;
    pub const CAMERA_START_YAW: f32 = 0.0;
    /// Camera movement speed (units per second)
    pub const CAMERA_SPEED: f32 = 3.0;
    /// Radians of rotation per unit of mouse delta
    pub const CAMERA_SENSITIVITY: f32 = 0.0075;
    /// Distance moved per mouse wheel notch
    pub const CAMERA_WHEEL_STEP: f32 = 0.5;
    pub const CAMERA_FOV_Y: f32 = 0.25 * std::f32::consts::PI;
    pub const CAMERA_ASPECT: f32 = 1280.0 / 720.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 100.0;
}

/// One of the two players. Player one defends the -x goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Score signal value (1 or 2); "no score" is 0
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Index into per-player arrays
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Sign of the x axis pointing at this player's own goal
    pub fn goal_side(self) -> f32 {
        match self {
            Player::One => -1.0,
            Player::Two => 1.0,
        }
    }
}

/// Integer score signal for a `check_score` result: 0, 1 or 2
#[inline]
pub fn score_signal(scorer: Option<Player>) -> u8 {
    scorer.map_or(0, Player::number)
}

/// Matrix in the layout uploaded to shader constant buffers (column-major)
pub type GpuMatrix = [[f32; 4]; 4];

#[inline]
pub fn to_gpu_matrix(m: Mat4) -> GpuMatrix {
    m.to_cols_array_2d()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_signal() {
        assert_eq!(score_signal(None), 0);
        assert_eq!(score_signal(Some(Player::One)), 1);
        assert_eq!(score_signal(Some(Player::Two)), 2);
    }

    #[test]
    fn test_player_sides() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert!(Player::One.goal_side() < 0.0);
        assert!(Player::Two.goal_side() > 0.0);
    }
}
