//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod dispatch;
pub mod ports;
pub mod presenter;

// Re-export use cases
pub use dispatch::{CommandDispatcher, DispatchOutcome, CMD_CANCEL, CMD_UPDATE};
pub use presenter::NotificationPresenter;
