//! Power sequencing
//!
//! The authoritative power-on/power-off behavior of the radio. The state
//! machine is explicit, finite, and deterministic; the sequencers are pure
//! polled logic so the whole module runs on the host.

pub mod events;
pub mod machine;
pub mod reason;
pub mod sequencer;

pub use events::PowerEvent;
pub use machine::PowerState;
pub use reason::{
    mark_running, mark_shutdown, mark_soft_reset, unexpected_shutdown, BackupRegisters,
    PowerReason, ResetFlags, ResetKind,
};
pub use sequencer::{
    boot_path, shutdown_step, BootPath, ShutdownStep, StartupSequencer, StartupStep,
};
