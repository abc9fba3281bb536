mod preview;

pub use preview::*;
