//! Platform layer
//!
//! - `web`: wasm-bindgen host for a browser canvas (LocalStorage high score)
//! - `autopilot`: scripted input source for headless runs and demos

pub mod autopilot;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use autopilot::Autopilot;
