pub mod chain;
pub mod errors;
pub mod macros;
pub mod middleware;

pub use chain::{compose, Chain, Composed};
pub use errors::{BoxError, ChainError};
pub use middleware::{Middleware, MiddlewareResult, MiddlewareReturnValue, Next, NextStatus};
