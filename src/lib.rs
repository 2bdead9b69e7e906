//! Palette Tuner
//!
//! Shell of the HSLuv palette tuning page: configuration, logging, and the
//! decorative title animation wired to the browser DOM or, natively, to a
//! terminal demo.

pub mod config;
pub mod constants;
pub mod logging;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
