use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by a component's action.
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Help requested.")]
    Help,

    #[error("{}: {}", .component, .message)]
    Flag { component: String, message: String },

    #[error("Error writing usage of `{}`: {}", .component, .original)]
    Output {
        component: String,
        original: std::io::Error,
    },

    #[error("Error parsing usage template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering usage template: {}", .0)]
    Render(#[from] RenderError),

    #[error("Operation cancelled.")]
    Cancelled,

    #[error(transparent)]
    Action(ActionError),
}

impl Error {
    pub fn flag(component: String, message: String) -> Self {
        Self::Flag { component, message }
    }

    pub fn output(component: String, original: std::io::Error) -> Self {
        Self::Output {
            component,
            original,
        }
    }

    pub fn action<E: Into<ActionError>>(error: E) -> Self {
        Self::Action(error.into())
    }

    /// Whether the error reports bad flags rather than a failure of the
    /// invoked command.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::Flag { .. })
    }
}
