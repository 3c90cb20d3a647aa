//! Game state and the scene it owns
//!
//! Everything the frame loop mutates lives here: paddles, puck, table,
//! celebration emitters, camera, lights and the scoreboard.

use glam::{Vec3, Vec4};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::paddle::Paddle;
use super::puck::Puck;
use super::transform::Entity;
use crate::Player;
use crate::camera::{Camera, Projection};
use crate::consts::*;
use crate::error::Result;
use crate::lighting::{DirectionalLight, PointLight, ShadowCaster};
use crate::particles::{Emitter, EmitterConfig};
use crate::renderer::{CameraData, DrawItem, FrameSnapshot, ShadowData, colors};
use crate::settings::Settings;

/// Mesh and material slots the renderer is expected to provide
pub mod assets {
    use crate::sim::transform::{MaterialHandle, MeshHandle};

    pub const PADDLE_MESH: MeshHandle = MeshHandle(0);
    pub const PUCK_MESH: MeshHandle = MeshHandle(1);
    pub const TABLE_MESH: MeshHandle = MeshHandle(2);

    pub const PADDLE_ONE_MATERIAL: MaterialHandle = MaterialHandle(0);
    pub const PADDLE_TWO_MATERIAL: MaterialHandle = MaterialHandle(1);
    pub const PUCK_MATERIAL: MaterialHandle = MaterialHandle(2);
    pub const TABLE_MATERIAL: MaterialHandle = MaterialHandle(3);
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Puck crossed into a goal; the puck has already been re-served
    Goal { scorer: Player },
    PaddleHit { player: Player },
    WallBounce,
    /// Debug free-fly camera switched on or off
    CameraMode { debug: bool },
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Indexed by `Player::index`
    pub paddles: [Paddle; 2],
    pub puck: Puck,
    pub table: Entity,
    /// Goal celebration emitter per player (empty when particles are off)
    pub emitters: Vec<Emitter>,
    pub camera: Camera,
    pub directional_light: DirectionalLight,
    pub point_light: PointLight,
    pub shadow_caster: ShadowCaster,
    /// Frames simulated
    pub frame: u64,
    pub(super) scores: [u32; 2],
    pub(super) debug_camera: bool,
    pub(super) events: Vec<GameEvent>,
    pub(super) paddle_speed: f32,
    random_serve: bool,
    rng: Pcg32,
}

/// Celebration burst above the goal `scorer` shot into
fn celebration_config(scorer: Player, settings: &Settings) -> EmitterConfig {
    let (start, end) = match scorer {
        Player::One => (colors::PLAYER_ONE_START, colors::PLAYER_ONE_END),
        Player::Two => (colors::PLAYER_TWO_START, colors::PLAYER_TWO_END),
    };
    let goal_x = scorer.opponent().goal_side() * (TABLE_HALF_X - 0.5);

    EmitterConfig {
        position: Vec3::new(goal_x, 0.0, 0.0),
        velocity: Vec3::new(0.0, 2.0, 0.0),
        acceleration: Vec3::new(0.0, -2.0, 0.0),
        start_color: Vec4::from_array(start),
        end_color: Vec4::from_array(end),
        start_size: 0.15,
        end_size: 0.02,
        max_particles: settings.max_particles(),
        particles_per_second: settings.quality.emission_rate(),
        lifetime: 1.5,
        looping: false,
        active: false,
        seed: settings.seed.wrapping_add(scorer.index() as u64 + 1),
    }
}

impl GameState {
    pub fn new(settings: &Settings) -> Result<Self> {
        let paddles = [
            Paddle::new(Player::One, assets::PADDLE_MESH, assets::PADDLE_ONE_MATERIAL),
            Paddle::new(Player::Two, assets::PADDLE_MESH, assets::PADDLE_TWO_MATERIAL),
        ];

        let mut table = Entity::new(assets::TABLE_MESH, assets::TABLE_MATERIAL);
        table
            .transform
            .set_position(TABLE_POSITION.x, TABLE_POSITION.y, TABLE_POSITION.z);
        table
            .transform
            .set_scale(TABLE_SCALE.x, TABLE_SCALE.y, TABLE_SCALE.z);

        let emitters = if settings.max_particles() > 0 {
            [Player::One, Player::Two]
                .into_iter()
                .map(|p| Emitter::new(celebration_config(p, settings)))
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        let mut camera = Camera::new(Projection::default());
        camera.set_speed(settings.camera_speed);
        camera.set_sensitivity_scale(settings.mouse_sensitivity);

        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let mut puck = Puck::new(assets::PUCK_MESH, assets::PUCK_MATERIAL);
        if settings.random_serve {
            puck.random_serve(&mut rng);
        }

        log::info!(
            "Game ready: quality {}, {} particles per emitter, seed {}",
            settings.quality.as_str(),
            settings.max_particles(),
            settings.seed
        );

        Ok(Self {
            paddles,
            puck,
            table,
            emitters,
            camera,
            directional_light: DirectionalLight::default(),
            point_light: PointLight::default(),
            shadow_caster: ShadowCaster::default(),
            frame: 0,
            scores: [0; 2],
            debug_camera: false,
            events: Vec::new(),
            paddle_speed: settings.paddle_speed,
            random_serve: settings.random_serve,
            rng,
        })
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        &self.paddles[player.index()]
    }

    /// Goals scored, indexed by `Player::index`
    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    /// Events from the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Whether the keyboard and mouse currently drive the camera
    pub fn debug_camera(&self) -> bool {
        self.debug_camera
    }

    pub fn emitter(&self, player: Player) -> Option<&Emitter> {
        self.emitters.get(player.index())
    }

    pub(super) fn toggle_debug_camera(&mut self) {
        self.debug_camera = !self.debug_camera;
        log::info!(
            "Debug camera {}",
            if self.debug_camera { "on" } else { "off" }
        );
        self.events.push(GameEvent::CameraMode {
            debug: self.debug_camera,
        });
    }

    /// Tally a goal, start the scorer's celebration and stop the other one.
    ///
    /// The puck has already been reset by `check_score`.
    pub(super) fn record_goal(&mut self, scorer: Player) {
        self.scores[scorer.index()] += 1;

        if let Some(emitter) = self.emitters.get_mut(scorer.index()) {
            emitter.activate();
        }
        if let Some(emitter) = self.emitters.get_mut(scorer.opponent().index()) {
            emitter.deactivate();
        }

        if self.random_serve {
            self.puck.random_serve(&mut self.rng);
        }

        log::info!(
            "Goal for player {}! Score {} - {}",
            scorer.number(),
            self.scores[0],
            self.scores[1]
        );
        self.events.push(GameEvent::Goal { scorer });
    }

    /// Pack the current frame for the renderer
    pub fn snapshot(&mut self) -> FrameSnapshot<'_> {
        let draws = vec![
            DrawItem::from_drawable(&self.table),
            DrawItem::from_drawable(&self.paddles[0]),
            DrawItem::from_drawable(&self.paddles[1]),
            DrawItem::from_drawable(&self.puck),
        ];

        let position = self.camera.position();
        FrameSnapshot {
            draws,
            camera: CameraData {
                view: self.camera.gpu_view_matrix(),
                projection: self.camera.gpu_projection_matrix(),
                position: position.to_array(),
            },
            directional_light: self.directional_light,
            point_light: self.point_light,
            shadow: ShadowData {
                view: crate::to_gpu_matrix(self.shadow_caster.view_matrix()),
                projection: crate::to_gpu_matrix(self.shadow_caster.projection_matrix()),
            },
            particles: self.emitters.iter_mut().map(Emitter::render_batch).collect(),
        }
    }
}
