mod renderer;

pub use renderer::*;
