//! Miller Visualizer Frontend
//!
//! egui application: notation input, parser dispatch, and the 3D viewport.

mod app;
pub mod client;
pub mod config;
pub mod viewport;
mod viewport_state;

pub use app::MillerApp;
