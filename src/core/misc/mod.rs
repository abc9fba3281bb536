mod progressreporter;

pub use progressreporter::*;
