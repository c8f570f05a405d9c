//! Cancellation context threaded through every action.

use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Execution context handed to each action.
///
/// Dispatch itself never looks at it; long running leaves poll
/// [`Context::check`] or [`Context::is_cancelled`] to stop early.
#[derive(Clone, Debug, Default)]
pub struct Context {
    token: CancellationToken,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: CancellationToken) -> Self {
        Self { token }
    }

    /// A context cancelled together with this one, but which can also be
    /// cancelled on its own.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] once the context has been cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }

    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}
