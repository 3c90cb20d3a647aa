//! Collision detection and response for the puck
//!
//! Only two kinds of contact exist on the table: the axis-aligned rails and
//! circle-vs-circle contact between puck and paddle.

use glam::Vec3;

use crate::consts::*;

/// Result of a puck/paddle overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit contact normal pointing from the paddle toward the puck
    pub normal: Vec3,
    /// Center offset (puck - paddle), used for the push-out correction.
    /// Always has a non-zero table-plane component on a hit.
    pub offset: Vec3,
    /// Center distance at the time of the check
    pub distance: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec3::ZERO,
            offset: Vec3::ZERO,
            distance: 0.0,
        }
    }
}

/// Effective contact distance for two scaled meshes.
///
/// Uses the x scale of each mesh times the tuned `COLLISION_RADIUS_FACTOR`.
#[inline]
pub fn contact_radius(puck_scale_x: f32, paddle_scale_x: f32) -> f32 {
    (puck_scale_x + paddle_scale_x) * COLLISION_RADIUS_FACTOR
}

/// In-plane direction from a paddle toward the center line
fn toward_center(paddle_pos: Vec3) -> Vec3 {
    if paddle_pos.x > 0.0 { -Vec3::X } else { Vec3::X }
}

/// Check the puck center against a paddle center.
///
/// Puck and paddle ride at different heights, so stacked centers still have
/// a vertical offset but no usable in-plane normal. That case is resolved
/// with a fixed normal toward the center line, and the offset is replaced by
/// that normal at contact distance so the push-out separates them.
pub fn puck_paddle_collision(puck_pos: Vec3, paddle_pos: Vec3, radius: f32) -> CollisionResult {
    let offset = puck_pos - paddle_pos;
    let distance = offset.length();

    if distance >= radius {
        return CollisionResult::miss();
    }

    let planar = Vec3::new(offset.x, 0.0, offset.z);
    if planar.length() < COLLISION_EPSILON {
        let normal = toward_center(paddle_pos);
        return CollisionResult {
            hit: true,
            normal,
            offset: normal * radius,
            distance,
        };
    }

    CollisionResult {
        hit: true,
        normal: offset / distance,
        offset,
        distance,
    }
}

/// Reflect a direction off a surface
///
/// Standard reflection: d' = d - 2(d·n)n
#[inline]
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * direction.dot(normal) * normal
}

/// Which rails a position is past, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub x: bool,
    pub z: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.x || self.z
    }
}

/// Bounce a direction off the table rails and clamp the position onto them.
///
/// A component only flips when it points out of the table, so a puck that
/// sits past a rail while already heading back in is not turned around again.
pub fn bounce_off_walls(position: &mut Vec3, direction: &mut Vec3) -> WallContact {
    let mut contact = WallContact::default();

    if position.x.abs() > TABLE_HALF_X {
        let side = position.x.signum();
        direction.x = -side * direction.x.abs();
        position.x = side * TABLE_HALF_X;
        contact.x = true;
    }

    if position.z.abs() > TABLE_HALF_Z {
        let side = position.z.signum();
        direction.z = -side * direction.z.abs();
        position.z = side * TABLE_HALF_Z;
        contact.z = true;
    }

    contact
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_head_on() {
        let d = Vec3::new(1.0, 0.0, 0.0);
        let n = Vec3::new(-1.0, 0.0, 0.0);
        let r = reflect(d, n);
        assert!((r.x + 1.0).abs() < 1e-6);
        assert!(r.z.abs() < 1e-6);
    }

    #[test]
    fn test_reflect_glancing_keeps_tangent() {
        let d = Vec3::new(1.0, 0.0, 1.0).normalize();
        let n = Vec3::new(0.0, 0.0, -1.0);
        let r = reflect(d, n);
        assert!((r.x - d.x).abs() < 1e-6);
        assert!((r.z + d.z).abs() < 1e-6);
    }

    #[test]
    fn test_contact_radius() {
        assert!((contact_radius(0.3, 0.5) - 0.44).abs() < 1e-6);
    }

    #[test]
    fn test_collision_hit_and_miss() {
        let hit = puck_paddle_collision(Vec3::new(0.3, 0.0, 0.0), Vec3::ZERO, 0.44);
        assert!(hit.hit);
        assert!((hit.normal - Vec3::X).length() < 1e-6);

        let miss = puck_paddle_collision(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, 0.44);
        assert!(!miss.hit);
    }

    #[test]
    fn test_stacked_centers_push_toward_center_line() {
        let paddle = Vec3::new(2.5, PADDLE_Y, 0.0);
        let puck = Vec3::new(2.5, PUCK_Y, 0.0);
        let result = puck_paddle_collision(puck, paddle, 0.44);
        assert!(result.hit);
        assert_eq!(result.normal, -Vec3::X);
        assert!(Vec3::new(result.offset.x, 0.0, result.offset.z).length() > 0.0);

        let left = puck_paddle_collision(Vec3::new(-2.5, PUCK_Y, 0.0), Vec3::new(-2.5, 0.0, 0.0), 0.44);
        assert_eq!(left.normal, Vec3::X);
    }

    #[test]
    fn test_fully_coincident_centers_still_separate() {
        let result = puck_paddle_collision(Vec3::ONE, Vec3::ONE, 0.44);
        assert!(result.hit);
        assert_eq!(result.normal, -Vec3::X);
        assert!((result.offset.length() - 0.44).abs() < 1e-6);
    }

    #[test]
    fn test_wall_bounce_x() {
        let mut pos = Vec3::new(4.01, 0.0, 0.0);
        let mut dir = Vec3::X;
        let contact = bounce_off_walls(&mut pos, &mut dir);
        assert!(contact.x && !contact.z);
        assert_eq!(pos.x, 4.0);
        assert_eq!(dir.x, -1.0);
    }

    #[test]
    fn test_wall_bounce_negative_z() {
        let mut pos = Vec3::new(0.0, 0.0, -2.5);
        let mut dir = Vec3::new(0.6, 0.0, -0.8);
        let contact = bounce_off_walls(&mut pos, &mut dir);
        assert!(contact.z);
        assert_eq!(pos.z, -2.0);
        assert!((dir.z - 0.8).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_wall_no_double_flip() {
        let mut pos = Vec3::new(4.2, 0.0, 0.0);
        let mut dir = -Vec3::X;
        bounce_off_walls(&mut pos, &mut dir);
        assert_eq!(dir.x, -1.0);
    }

    #[test]
    fn test_inside_table_untouched() {
        let mut pos = Vec3::new(1.0, 0.0, 1.0);
        let mut dir = Vec3::X;
        assert!(!bounce_off_walls(&mut pos, &mut dir).any());
        assert_eq!(dir, Vec3::X);
    }
}
