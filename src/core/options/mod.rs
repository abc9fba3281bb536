mod config;
mod render_options;

pub use config::*;
pub use render_options::*;
