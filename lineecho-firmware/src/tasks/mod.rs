//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

#[cfg(feature = "legacy-isr")]
pub mod arm;
#[cfg(not(any(feature = "legacy-isr", feature = "polled")))]
pub mod echo_rx;
#[cfg(not(any(feature = "legacy-isr", feature = "polled")))]
pub mod echo_tx;

#[cfg(feature = "legacy-isr")]
pub use arm::arm_task;
#[cfg(not(any(feature = "legacy-isr", feature = "polled")))]
pub use echo_rx::echo_rx_task;
#[cfg(not(any(feature = "legacy-isr", feature = "polled")))]
pub use echo_tx::echo_tx_task;
