//! Live viewer for a progressive, block-based renderer.
//!
//! The renderer fills the frame buffer of a [`core::context::RenderContext`]
//! block by block on worker threads. Each finished block goes through a
//! [`core::display::DisplaySync`] into a dirty-block queue; the
//! [`core::display::DisplayLoop`] on the display thread drains that queue
//! into its texture, applies the gamma pass and presents.

pub mod core;
pub mod displays;
pub mod renderers;
