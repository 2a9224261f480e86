//! Core traits for the renderer system.

mod sub_renderer;

pub use sub_renderer::*;
