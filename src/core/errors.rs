use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error a middleware uses to surface its own failure.
pub type BoxError = Box<dyn StdError + Send + Sync>;

///
/// Everything that can terminate a chain run early. A `Middleware` variant is
/// passed through every enclosing continuation untouched; `CalledMoreThanOnce`
/// marks a usage bug in a middleware rather than a data error.
///
#[derive(Debug, Error)]
pub enum ChainError {
    /// A middleware invoked its `next` continuation a second time.
    #[error("a middleware invoked its next continuation more than once")]
    CalledMoreThanOnce,

    /// An error raised by a middleware, propagated unchanged.
    #[error(transparent)]
    Middleware(#[from] BoxError),
}

impl ChainError {
    ///
    /// Wrap a middleware's own error for propagation through the chain.
    ///
    pub fn middleware<E: Into<BoxError>>(err: E) -> Self {
        ChainError::Middleware(err.into())
    }

    pub fn is_called_more_than_once(&self) -> bool {
        matches!(self, ChainError::CalledMoreThanOnce)
    }
}
