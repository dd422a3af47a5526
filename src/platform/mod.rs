//! Platform abstraction layer
//!
//! The simulation is platform-free; this layer adapts it to a host:
//! - `web`: wasm-bindgen entry points for the browser (pointer, menu, frame
//!   callbacks in; JSON snapshots out)
//!
//! The native build drives `sim` directly from `main.rs`.

#[cfg(target_arch = "wasm32")]
pub mod web;
