//! Widget error types.

use fable_content::KeyError;

/// Error returned by widget and registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    /// Tab identifier is not one of the widget's tabs.
    #[error("unknown tab: {0:?}")]
    UnknownTab(String),
    /// Operation needs a language but the tab has none.
    #[error("tab {0:?} has no language assigned")]
    Unassigned(String),
    /// Widget fable fields do not form a valid content key.
    #[error("invalid fable: {0}")]
    Key(#[from] KeyError),
}
