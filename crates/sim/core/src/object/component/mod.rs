//! Attachable per-object behaviors.

mod ai_movement;
mod combat;
mod hitpoint;
mod monster_combat;
mod movement;

pub use ai_movement::AiMovement;
pub use combat::Combat;
pub use hitpoint::Hitpoint;
pub use monster_combat::MonsterCombat;
pub use movement::Movement;
