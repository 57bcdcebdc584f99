//! System orchestration, configuration, startup and shutdown logic.

pub mod config;
pub mod kiosk_system;
pub mod tracing;

pub use self::config::*;
pub use self::kiosk_system::*;
pub use self::tracing::*;
