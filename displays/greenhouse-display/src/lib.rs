//! Display abstraction traits and shared components for the greenhouse
//!
//! This crate provides:
//! - `DisplayBackend` trait for different display types (OLED, console, etc.)
//! - `Screen`, a character buffer for text-mode displays
//! - `Renderer`, which paints the five controller screens from a snapshot
//!
//! # Architecture
//!
//! The controller hands the renderer a read-only `Snapshot` once per
//! refresh. The renderer fills a `Screen`, which any backend can draw
//! without knowing what the screen shows.

#![no_std]

pub mod backend;
pub mod renderer;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayBackendExt, DisplayError};
pub use renderer::Renderer;
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
