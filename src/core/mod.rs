pub mod base;
pub mod context;
pub mod display;
pub mod error;
pub mod geometry;
pub mod misc;
pub mod options;
pub mod render;
pub mod rng;
pub mod scene;
