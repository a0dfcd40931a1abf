//! FocusCapsule - persistent focus-timer notification CLI
//!
//! This crate keeps a single ongoing desktop notification in sync with a
//! focus timer: countdowns, count-ups, pauses, and completion percentage,
//! updated in place rather than stacking new notifications.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Timer requests, notification content rules, value objects, and errors
//! - **Application**: The presenter engine, command dispatcher, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (notify-rust, log fallback, XDG config)
//! - **CLI**: Command-line interface, the daemon bridge, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
