//! Puck physics: integration, rail bounces, paddle hits and goal detection

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{WallContact, bounce_off_walls, contact_radius, puck_paddle_collision, reflect};
use super::paddle::Paddle;
use super::transform::{Drawable, MaterialHandle, MeshHandle, Transform};
use crate::Player;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puck {
    pub transform: Transform,
    /// Unit travel direction, y always 0
    direction: Vec3,
    speed: f32,
    /// direction * speed, refreshed every update
    velocity: Vec3,
    mesh: MeshHandle,
    material: MaterialHandle,
}

impl Puck {
    /// Puck at center ice in the canonical serve state
    pub fn new(mesh: MeshHandle, material: MaterialHandle) -> Self {
        let mut transform = Transform::new();
        transform.set_scale(PUCK_SCALE, PUCK_SCALE, PUCK_SCALE);

        let mut puck = Self {
            transform,
            direction: Vec3::ZERO,
            speed: 0.0,
            velocity: Vec3::ZERO,
            mesh,
            material,
        };
        puck.reset();
        puck
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set travel direction; flattened onto the table and normalized
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
        self.velocity = self.direction * self.speed;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.velocity = self.direction * self.speed;
    }

    /// Set velocity directly; splits into direction and speed
    pub fn set_velocity(&mut self, velocity: Vec3) {
        let v = Vec3::new(velocity.x, 0.0, velocity.z);
        self.speed = v.length();
        self.direction = v.normalize_or_zero();
        self.velocity = self.direction * self.speed;
    }

    /// Place the puck on the table surface at (x, z)
    pub fn place(&mut self, x: f32, z: f32) {
        self.transform.set_position(x, PUCK_Y, z);
    }

    /// Advance one frame.
    ///
    /// Rails are checked on the pre-move position so the bounced direction
    /// applies to this frame's step.
    pub fn update(&mut self, dt: f32) -> WallContact {
        let mut position = self.transform.position();
        let contact = bounce_off_walls(&mut position, &mut self.direction);

        self.direction.y = 0.0;
        self.direction = self.direction.normalize_or_zero();
        self.velocity = self.direction * self.speed;

        position += self.velocity * dt;
        position.y = PUCK_Y;
        self.transform.set_position(position.x, position.y, position.z);

        if contact.any() {
            log::trace!("puck bounced off rail at ({:.2}, {:.2})", position.x, position.z);
        }
        contact
    }

    /// Reflect off a paddle if overlapping, then push clear of it.
    ///
    /// Returns true on a hit.
    pub fn collide_with(&mut self, paddle: &Paddle) -> bool {
        let radius = contact_radius(self.transform.scale().x, paddle.transform.scale().x);
        let result = puck_paddle_collision(self.position(), paddle.position(), radius);
        if !result.hit {
            return false;
        }

        let mut direction = reflect(self.direction, result.normal);
        direction.y = 0.0;
        self.direction = direction.normalize_or_zero();
        self.velocity = self.direction * self.speed;

        // Anti-stick: shove the puck out along the center offset
        let push = Vec3::new(result.offset.x, 0.0, result.offset.z) * SEPARATION_FACTOR;
        let position = self.position() + push;
        self.transform.set_position(position.x, PUCK_Y, position.z);

        log::debug!(
            "puck hit by {:?} paddle at distance {:.3}",
            paddle.player,
            result.distance
        );
        true
    }

    /// Detect a goal. On a goal the puck is reset and the scorer returned.
    pub fn check_score(&mut self) -> Option<Player> {
        let pos = self.position();
        if pos.z.abs() >= GOAL_HALF_WIDTH {
            return None;
        }

        let scorer = if pos.x > GOAL_LINE_X {
            // Into player two's goal
            Player::One
        } else if pos.x < -GOAL_LINE_X {
            Player::Two
        } else {
            return None;
        };

        self.reset();
        Some(scorer)
    }

    /// Center the puck and restore the canonical serve direction and speed
    pub fn reset(&mut self) {
        let p = PUCK_RESET_POSITION;
        self.transform.set_position(p.x, p.y, p.z);
        self.direction = PUCK_START_DIRECTION.normalize();
        self.speed = PUCK_START_SPEED;
        self.velocity = self.direction * self.speed;
    }

    /// Diagonal serve at a random speed and random signs per axis
    pub fn random_serve<R: Rng>(&mut self, rng: &mut R) {
        let component = rng.random_range(SERVE_MIN_SPEED..=SERVE_MAX_SPEED);
        let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sz = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.set_velocity(Vec3::new(sx * component, 0.0, sz * component));
    }
}

impl Drawable for Puck {
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
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn puck() -> Puck {
        Puck::new(MeshHandle(1), MaterialHandle(0))
    }

    fn paddle(player: Player) -> Paddle {
        Paddle::new(player, MeshHandle(0), MaterialHandle(0))
    }

    #[test]
    fn test_reset_state() {
        let p = puck();
        assert_eq!(p.position(), PUCK_RESET_POSITION);
        assert!((p.direction().length() - 1.0).abs() < 1e-6);
        assert_eq!(p.direction().y, 0.0);
        assert_eq!(p.speed(), PUCK_START_SPEED);
    }

    #[test]
    fn test_wall_reflection_on_update() {
        let mut p = puck();
        p.transform.set_position(4.01, PUCK_Y, 0.0);
        p.set_direction(Vec3::X);
        p.set_speed(0.0);

        let contact = p.update(1.0 / 60.0);
        assert!(contact.x);
        assert_eq!(p.direction().x, -1.0);
        assert_eq!(p.position().x, 4.0);
    }

    #[test]
    fn test_bounce_applies_same_frame() {
        let mut p = puck();
        p.transform.set_position(4.01, PUCK_Y, 0.0);
        p.set_direction(Vec3::X);
        p.set_speed(1.0);

        p.update(0.1);
        assert!(p.position().x < 4.0);
        assert!((p.position().x - 3.9).abs() < 1e-5);
    }

    #[test]
    fn test_update_pins_height_and_integrates() {
        let mut p = puck();
        p.transform.set_position(0.0, 3.0, 0.0);
        p.set_direction(Vec3::new(0.0, 5.0, 1.0));
        p.set_speed(2.0);

        p.update(0.5);
        assert_eq!(p.position().y, PUCK_Y);
        assert!((p.position().z - 1.0).abs() < 1e-6);
        assert_eq!(p.velocity().y, 0.0);
        assert!((p.velocity() - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);
    }

    #[test]
    fn test_score_player_one() {
        let mut p = puck();
        p.place(4.0, 0.0);
        assert_eq!(p.check_score(), Some(Player::One));
        assert_eq!(p.position(), PUCK_RESET_POSITION);
    }

    #[test]
    fn test_score_player_two() {
        let mut p = puck();
        p.place(-4.0, 0.5);
        assert_eq!(p.check_score(), Some(Player::Two));
        assert_eq!(crate::score_signal(Some(Player::Two)), 2);
    }

    #[test]
    fn test_no_score_outside_goal_band() {
        let mut p = puck();
        p.place(4.0, 1.5);
        assert_eq!(p.check_score(), None);
        assert_eq!(p.position().x, 4.0);
    }

    #[test]
    fn test_no_score_midfield() {
        let mut p = puck();
        p.place(3.5, 0.0);
        assert_eq!(p.check_score(), None);
    }

    #[test]
    fn test_paddle_collision_reflects_and_separates() {
        let pad = paddle(Player::Two);
        let pad_pos = pad.position();

        let mut p = puck();
        p.place(pad_pos.x - 0.3, pad_pos.z);
        p.set_direction(Vec3::X);

        let before_dir = p.direction();
        let before_dist = (p.position() - pad_pos).length();
        let normal = (p.position() - pad_pos).normalize();

        assert!(p.collide_with(&pad));

        let after_dist = (p.position() - pad_pos).length();
        assert!(after_dist >= before_dist);
        // Normal component flips sign
        assert!(before_dir.dot(normal) < 0.0);
        assert!(p.direction().dot(normal) > 0.0);
        assert_eq!(p.direction().y, 0.0);
        assert!(p.direction().x < 0.0);
    }

    #[test]
    fn test_paddle_collision_miss_leaves_puck_alone() {
        let pad = paddle(Player::One);
        let mut p = puck();
        let before = p.position();
        assert!(!p.collide_with(&pad));
        assert_eq!(p.position(), before);
    }

    #[test]
    fn test_puck_under_paddle_is_pushed_out() {
        let pad = paddle(Player::One);
        let pad_pos = pad.position();
        let mut p = puck();
        p.place(pad_pos.x, pad_pos.z);
        p.set_speed(0.0);

        let mut hits = 0;
        for _ in 0..10 {
            if p.collide_with(&pad) {
                hits += 1;
            }
        }
        // Separates within a few pushes, toward the center line
        assert!(hits > 0 && hits < 10, "hits = {hits}");
        assert!(!p.collide_with(&pad));
        assert!(p.position().x > pad_pos.x);
        assert_eq!(p.position().y, PUCK_Y);
    }

    #[test]
    fn test_random_serve_is_diagonal() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut p = puck();
        for _ in 0..20 {
            p.random_serve(&mut rng);
            let d = p.direction();
            assert!((d.x.abs() - d.z.abs()).abs() < 1e-5);
            assert!(p.speed() >= SERVE_MIN_SPEED * std::f32::consts::SQRT_2 - 1e-4);
            assert!(p.speed() <= SERVE_MAX_SPEED * std::f32::consts::SQRT_2 + 1e-4);
        }
    }
}
