//! Frame-stepped simulation
//!
//! Pure game logic with no rendering or platform dependencies:
//! - Input arrives as a per-frame snapshot
//! - Seeded RNG only
//! - Fixed update order (see `tick`)

pub mod collision;
pub mod paddle;
pub mod puck;
pub mod state;
pub mod tick;
pub mod transform;

pub use collision::{CollisionResult, WallContact, puck_paddle_collision, reflect};
pub use paddle::{MovementBounds, Paddle};
pub use puck::Puck;
pub use state::{GameEvent, GameState, assets};
pub use tick::{HeldKeys, MouseInput, TickInput, tick};
pub use transform::{Drawable, Entity, MaterialHandle, MeshHandle, Transform};
