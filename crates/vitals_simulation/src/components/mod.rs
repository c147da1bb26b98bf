//! ECS Components для entity со здоровьем
//!
//! Организация по доменам:
//! - health: health record (current/max, baseline regen, cool-down), Dead marker
//! - regen: regen ledger + state machine (RegenSource, RegenLedger, RegenState)
//! - player: player control marker (Player)

pub mod health;
pub mod player;
pub mod regen;

// Re-exports для удобного импорта
pub use health::*;
pub use player::*;
pub use regen::*;
