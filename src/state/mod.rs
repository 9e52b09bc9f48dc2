pub mod phase;
pub mod proposal;
pub mod timer;

pub use phase::{Phase, PhaseEvent, Step};
pub use proposal::{EvasionSession, Proposal};
pub use timer::PhaseTimer;
