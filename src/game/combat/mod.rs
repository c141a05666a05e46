// Combat: incoming attacks and their resolution against a stat block
//
// - `hazard`: one incoming attack instance
// - `damage`: the resolver that rolls and applies it
// - `requirements`: the gate a power must pass before it can start

pub mod damage;
pub mod hazard;
pub mod requirements;

pub use damage::{DamageResolver, HitOutcome};
pub use hazard::{Element, Hazard};
pub use requirements::{check_requirements, GateFailure};
