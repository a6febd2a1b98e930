//! Canonical record names shared across the firmware.
//!
//! Services create their record under one of these names at start-up;
//! applications open them by the same constant.

/// Input service: a `PubSub` of key events.
pub const INPUT_EVENTS: &str = "input_events";
/// GUI service.
pub const GUI: &str = "gui";
/// LED, vibro and sound notifications.
pub const NOTIFICATION: &str = "notification";
/// Storage service.
pub const STORAGE: &str = "storage";
/// Modal dialogs.
pub const DIALOGS: &str = "dialogs";
/// Power and battery state.
pub const POWER: &str = "power";
/// Application loader.
pub const LOADER: &str = "loader";
/// Command line interface.
pub const CLI: &str = "cli";
/// Remote procedure calls.
pub const RPC: &str = "rpc";
