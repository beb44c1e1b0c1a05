//! Independent watchdog abstraction
//!
//! The timeout is fixed when the chip glue constructs the watchdog.
//! Once started it cannot be stopped; the shutdown wait-for-release
//! loop must keep feeding it, exactly as the power sequencer's
//! `WaitRelease` step demands.

/// Independent watchdog
pub trait Watchdog {
    /// Start the watchdog; it runs until the next reset
    fn start(&mut self);

    /// Feed the watchdog, restarting the timeout
    fn feed(&mut self);
}
