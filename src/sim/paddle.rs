//! Player paddles

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::transform::{Drawable, MaterialHandle, MeshHandle, Transform};
use crate::Player;
use crate::consts::*;

/// Rectangle (in the xz plane) a paddle may travel within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementBounds {
    /// Minimum (x, z)
    pub min: Vec2,
    /// Maximum (x, z)
    pub max: Vec2,
}

impl MovementBounds {
    /// Default travel area for a player: their own half, z within the rails
    pub fn for_player(player: Player) -> Self {
        let side = player.goal_side();
        let (a, b) = (side * PADDLE_X_NEAR, side * PADDLE_X_FAR);
        Self {
            min: Vec2::new(a.min(b), -PADDLE_Z_LIMIT),
            max: Vec2::new(a.max(b), PADDLE_Z_LIMIT),
        }
    }

    pub fn clamp(&self, x: f32, z: f32) -> (f32, f32) {
        (x.clamp(self.min.x, self.max.x), z.clamp(self.min.y, self.max.y))
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.y && z <= self.max.y
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub player: Player,
    pub transform: Transform,
    /// Nominal collision radius (the puck uses scale-based radii)
    pub radius: f32,
    pub bounds: MovementBounds,
    mesh: MeshHandle,
    material: MaterialHandle,
}

impl Paddle {
    /// Paddle at its starting spot on the player's side
    pub fn new(player: Player, mesh: MeshHandle, material: MaterialHandle) -> Self {
        let mut transform = Transform::new();
        transform.set_scale(PADDLE_SCALE, PADDLE_SCALE, PADDLE_SCALE);
        transform.set_position(player.goal_side() * PADDLE_START_X, PADDLE_Y, 0.0);

        Self {
            player,
            transform,
            radius: PADDLE_RADIUS,
            bounds: MovementBounds::for_player(player),
            mesh,
            material,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    /// Move by (dx, dz) in the table plane, staying inside the movement bounds.
    ///
    /// The world matrix is left for the per-frame `update_world_matrix` pass.
    pub fn slide(&mut self, dx: f32, dz: f32) {
        self.transform.move_absolute(dx, 0.0, dz);
        let pos = self.transform.position();
        if !self.bounds.contains(pos.x, pos.z) {
            let (x, z) = self.bounds.clamp(pos.x, pos.z);
            self.transform.set_position(x, pos.y, z);
        }
    }
}

impl Drawable for Paddle {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    fn material(&self) -> MaterialHandle {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle(player: Player) -> Paddle {
        Paddle::new(player, MeshHandle(0), MaterialHandle(0))
    }

    #[test]
    fn test_paddle_defaults() {
        let p1 = paddle(Player::One);
        let p2 = paddle(Player::Two);
        assert_eq!(p1.radius(), 1.0);
        assert!((p1.position().x + 2.5).abs() < 1e-6);
        assert!((p2.position().x - 2.5).abs() < 1e-6);
        assert_eq!(p1.transform.scale(), Vec3::splat(PADDLE_SCALE));
    }

    #[test]
    fn test_bounds_per_side() {
        let b1 = MovementBounds::for_player(Player::One);
        let b2 = MovementBounds::for_player(Player::Two);
        assert!(b1.max.x < 0.0);
        assert!(b2.min.x > 0.0);
        assert!(b1.contains(-2.5, 0.0));
        assert!(!b1.contains(2.5, 0.0));
    }

    #[test]
    fn test_slide_clamps_z() {
        let mut p = paddle(Player::One);
        p.slide(0.0, 5.0);
        assert!((p.position().z - PADDLE_Z_LIMIT).abs() < 1e-6);
        p.slide(0.0, -10.0);
        assert!((p.position().z + PADDLE_Z_LIMIT).abs() < 1e-6);
    }

    #[test]
    fn test_slide_clamps_x_to_own_half() {
        let mut p = paddle(Player::Two);
        p.slide(-10.0, 0.0);
        assert!((p.position().x - PADDLE_X_NEAR).abs() < 1e-6);
    }

    #[test]
    fn test_slide_within_bounds_defers_matrix() {
        let mut p = paddle(Player::One);
        let before = p.world_matrix();
        p.slide(0.0, 0.25);
        assert_eq!(p.world_matrix(), before);
        p.transform.update_world_matrix();
        assert_ne!(p.world_matrix(), before);
    }
}
