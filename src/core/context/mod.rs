mod frame_block;
mod pixmap;
mod render_context;

pub use frame_block::*;
pub use pixmap::*;
pub use render_context::*;
