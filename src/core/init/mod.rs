pub mod builtin;
pub mod sequencer;
pub mod state;
pub mod subsystem;

pub use sequencer::InitializationSequencer;
pub use state::InitState;
pub use subsystem::{FailurePolicy, InitContext, Subsystem, SubsystemEntry};
