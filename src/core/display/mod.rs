mod dirty_queue;
mod display;
mod display_loop;
mod input;
mod multiple_display;
mod synchronizer;
mod texture;

pub use dirty_queue::*;
pub use display::*;
pub use display_loop::*;
pub use input::*;
pub use multiple_display::*;
pub use synchronizer::*;
pub use texture::*;
