//! CLI error types.

use mdlit_config::ConfigError;
use mdlit_renderer::{RenderError, UnknownExtension};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Extension(#[from] UnknownExtension),

    #[error("{0}")]
    Unresolved(String),
}
