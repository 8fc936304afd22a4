//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Key input mapping
//! - Frame time to gravity steps
//! - Wall-clock timestamps
//! - The wasm-facing game handle

pub mod driver;
pub mod input;
pub mod session;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::FixedStep;
pub use input::{KeyAction, map_key};
pub use session::Session;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
