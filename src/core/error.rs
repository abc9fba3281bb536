use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed options; fatal before rendering starts.
    Config,
    /// Display/composite stage failures; fatal, never retried.
    Display,
    /// Failures raised by the renderer or its worker threads.
    Render,
    Io,
}

#[derive(Debug, Clone)]
pub struct CalaError {
    pub kind: ErrorKind,
    pub msg: String,
}

impl CalaError {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        CalaError {
            kind,
            msg: String::from(msg),
        }
    }

    pub fn config(msg: &str) -> Self {
        return Self::new(ErrorKind::Config, msg);
    }

    pub fn display(msg: &str) -> Self {
        return Self::new(ErrorKind::Display, msg);
    }

    pub fn render(msg: &str) -> Self {
        return Self::new(ErrorKind::Render, msg);
    }

    pub fn is_config(&self) -> bool {
        return self.kind == ErrorKind::Config;
    }
}

impl fmt::Display for CalaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            ErrorKind::Config => "configuration error",
            ErrorKind::Display => "display error",
            ErrorKind::Render => "render error",
            ErrorKind::Io => "io error",
        };
        write!(f, "{}: {}", prefix, self.msg)
    }
}

impl std::error::Error for CalaError {}

impl From<std::io::Error> for CalaError {
    fn from(value: std::io::Error) -> Self {
        return Self::new(ErrorKind::Io, &value.to_string());
    }
}

impl From<image::ImageError> for CalaError {
    fn from(value: image::ImageError) -> Self {
        return Self::new(ErrorKind::Display, &value.to_string());
    }
}
