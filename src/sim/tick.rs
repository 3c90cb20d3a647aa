//! Per-frame update
//!
//! Order within a frame: input, puck move, paddle collisions (player one
//! then two), goal check, emitter switching, emitter update, camera update.
//! A goal is only ever tested against the puck position after both paddle
//! collisions have been resolved.

use glam::Vec2;

use super::state::{GameEvent, GameState};
use crate::Player;
use crate::consts::CAMERA_WHEEL_STEP;

/// Keys held this frame.
///
/// Normal play: W/S and A/D move paddle one, I/K and J/L paddle two.
/// Debug camera: W/S forward/back, A/D strafe, E/Q up/down; paddles stay put.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
    pub q: bool,
    pub e: bool,
    pub i: bool,
    pub j: bool,
    pub k: bool,
    pub l: bool,
}

/// Mouse state for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseInput {
    /// Cursor movement since last frame (pixels, y down)
    pub delta: Vec2,
    pub left_held: bool,
    pub right_held: bool,
    /// Wheel notches; positive scrolls away from the user
    pub wheel: f32,
}

/// Input snapshot for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub keys: HeldKeys,
    pub mouse: MouseInput,
    /// Toggle the debug camera (edge-triggered: set only on the press frame)
    pub toggle_debug: bool,
}

/// -1, 0 or 1 from a pair of opposing keys
fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

fn move_paddles(state: &mut GameState, keys: &HeldKeys, dt: f32) {
    let step = state.paddle_speed * dt;
    let controls = [
        (Player::One, axis(keys.a, keys.d), axis(keys.s, keys.w)),
        (Player::Two, axis(keys.j, keys.l), axis(keys.k, keys.i)),
    ];
    for (player, x, z) in controls {
        if x != 0.0 || z != 0.0 {
            state.paddles[player.index()].slide(x * step, z * step);
        }
    }
}

fn drive_camera(state: &mut GameState, input: &TickInput, dt: f32) {
    let keys = &input.keys;
    let camera = &mut state.camera;

    if keys.w {
        camera.move_forward(dt);
    }
    if keys.s {
        camera.move_back(dt);
    }
    if keys.a {
        camera.strafe_left(dt);
    }
    if keys.d {
        camera.strafe_right(dt);
    }
    if keys.e {
        camera.move_up(dt);
    }
    if keys.q {
        camera.move_down(dt);
    }

    let mouse = &input.mouse;
    if mouse.left_held {
        camera.rotate(mouse.delta.y, mouse.delta.x);
    }
    if mouse.right_held {
        if mouse.delta.x < 0.0 {
            camera.strafe_left(dt);
        } else if mouse.delta.x > 0.0 {
            camera.strafe_right(dt);
        }
        // Screen y grows downward
        if mouse.delta.y < 0.0 {
            camera.move_up(dt);
        } else if mouse.delta.y > 0.0 {
            camera.move_down(dt);
        }
    }
    if mouse.wheel != 0.0 {
        camera.move_forward_by(CAMERA_WHEEL_STEP * mouse.wheel.signum());
    }
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.frame += 1;

    if input.toggle_debug {
        state.toggle_debug_camera();
    }

    if state.debug_camera {
        drive_camera(state, input, dt);
    } else {
        move_paddles(state, &input.keys, dt);
    }
    for paddle in &mut state.paddles {
        paddle.transform.update_world_matrix();
    }

    if state.puck.update(dt).any() {
        state.events.push(GameEvent::WallBounce);
    }

    for paddle in &state.paddles {
        if state.puck.collide_with(paddle) {
            state.events.push(GameEvent::PaddleHit {
                player: paddle.player,
            });
        }
    }

    if let Some(scorer) = state.puck.check_score() {
        state.record_goal(scorer);
    }

    for emitter in &mut state.emitters {
        emitter.update(dt);
    }

    state.camera.update();
}
