//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the sceneview crate.
///
/// Per-frame failures inside [`Viewport::draw`](crate::viewport::Viewport::draw)
/// are absorbed and logged; this type surfaces from setup and configuration
/// calls.
#[derive(Debug)]
pub enum ViewportError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// The requested renderer plugin is not known to the factory.
    UnknownRenderer(String),
    /// Renderer construction failed inside the factory.
    RendererInit(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::UnknownRenderer(id) => {
                write!(f, "unknown renderer plugin: {id}")
            }
            Self::RendererInit(msg) => {
                write!(f, "renderer initialization failed: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for ViewportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for ViewportError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for ViewportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err = ViewportError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "viewport.toml",
        ));
        assert_eq!(err.to_string(), "I/O error: viewport.toml");
        assert!(err.source().is_some());
    }

    #[test]
    fn unknown_renderer_names_the_plugin() {
        let err = ViewportError::UnknownRenderer("storm".to_owned());
        assert_eq!(err.to_string(), "unknown renderer plugin: storm");
        assert!(err.source().is_none());
    }
}
