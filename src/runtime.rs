//! Runtime for executing a run
//!
//! Owns the run state and performs the effects the state machine asks for:
//! context assembly, backend calls, presentation and pacing.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::DuetRuntime;
pub use traits::*;
