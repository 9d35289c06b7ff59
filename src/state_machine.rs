//! Turn scheduling state machine
//!
//! Pure transitions in the Elm Architecture style: the runtime feeds events
//! in and performs the effects that come out.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{AgentSlot, Phase, RunState, TurnStep};
pub use transition::{transition, TransitionError};
