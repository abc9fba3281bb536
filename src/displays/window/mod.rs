mod window_display;

pub use window_display::*;
