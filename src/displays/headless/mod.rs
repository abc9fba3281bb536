mod headless_display;

pub use headless_display::*;
