pub mod headless;
#[cfg(feature = "window")]
pub mod window;

pub use headless::HeadlessDisplay;
#[cfg(feature = "window")]
pub use window::WindowDisplay;
