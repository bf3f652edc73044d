// ─── Map Shell Core ───
// Bring-up and event plumbing between the host process and the native
// mapping engine.
//
// Architecture:
//   core/
//     paths      : Settings / storage / private / temp directories
//     native     : Calls into the native engine
//     init/      : Two-phase init state machine + subsystem tables
//     dispatch   : Native task handles → main loop, FIFO
//     lifecycle  : Foreground/background transitions
//     downloads  : Download status relay → user notifications
//     jobs       : Job type → scheduler id registry
//     state/     : Shell config + application state

pub mod dispatch;
pub mod downloads;
pub mod error;
pub mod init;
pub mod jobs;
pub mod lifecycle;
pub mod native;
pub mod paths;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
