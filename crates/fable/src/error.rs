//! CLI error types.

use fable_config::ConfigError;
use fable_content::KeyError;
use fable_widget::WidgetError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Key(#[from] KeyError),

    #[error("{0}")]
    Widget(#[from] WidgetError),

    #[error("{0}")]
    Validation(String),
}
